// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The client event loop tying transport, core, and input together.

use tokio::sync::mpsc;

use prism_proto::{wire, ActionMessage, ACTION_REQUEST_LAYERS};
use prism_scene_port::{PointerNdc, SceneRenderer, UiSurface};

use crate::conn::ConnectionManager;
use crate::endpoint::{ClientConfig, EndpointRing};
use crate::sync::{InputEvent, SyncCore};
use crate::ClientError;

/// Cloneable handle for feeding user input into a running [`SyncClient`].
///
/// Sends are fire-and-forget; events queue until the loop applies them.
/// Once the client stops, sends are silently dropped.
#[derive(Clone, Debug)]
pub struct InputHandle {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl InputHandle {
    /// Report a pointer pick in the 3D view.
    pub fn pick(&self, pointer: PointerNdc) {
        let _ = self.tx.send(InputEvent::Pick(pointer));
    }

    /// Report a click on a layer-list entry.
    pub fn layer_clicked(&self, path: impl Into<String>) {
        let _ = self.tx.send(InputEvent::LayerClicked(path.into()));
    }

    /// Forward a control action to the server (best-effort).
    pub fn action(&self, action: ActionMessage) {
        let _ = self.tx.send(InputEvent::Action(action));
    }

    /// Ask the server for a fresh layer listing.
    pub fn request_layers(&self) {
        self.action(ActionMessage::new(ACTION_REQUEST_LAYERS));
    }
}

/// A connected (or connecting) stage-mirror client.
///
/// Owns the connection manager and the sync core; [`Self::run`] drives both
/// from a single loop, so all state mutation is serialized without locks.
pub struct SyncClient<R, U> {
    conn: ConnectionManager,
    core: SyncCore<R, U>,
    input_rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl<R: SceneRenderer, U: UiSurface> SyncClient<R, U> {
    /// Build a client from connection settings and the two collaborators.
    ///
    /// Fails only if the config yields no candidate endpoints, which cannot
    /// happen through [`ClientConfig::candidates`].
    pub fn new(
        config: &ClientConfig,
        renderer: R,
        ui: U,
    ) -> Result<(Self, InputHandle), ClientError> {
        let ring = EndpointRing::new(config.candidates())?;
        let (tx, input_rx) = mpsc::unbounded_channel();
        let client = Self {
            conn: ConnectionManager::new(ring),
            core: SyncCore::new(renderer, ui),
            input_rx,
        };
        Ok((client, InputHandle { tx }))
    }

    /// Connect and run the event loop until every [`InputHandle`] is gone.
    ///
    /// Transport loss never ends the loop; the connection manager retries
    /// forever on its fixed delay.
    pub async fn run(mut self) {
        self.conn.connect();
        loop {
            tokio::select! {
                ev = self.conn.next_event() => {
                    match ev {
                        Some(ev) => self.core.handle_transport(ev),
                        // The manager owns both channel ends; unreachable
                        // while it is alive.
                        None => break,
                    }
                }
                input = self.input_rx.recv() => {
                    match input {
                        Some(input) => {
                            if let Some(action) = self.core.handle_input(input) {
                                self.send_action(&action);
                            }
                        }
                        // Every handle dropped: the client has no caller
                        // left and shuts down.
                        None => break,
                    }
                }
            }
        }
        tracing::info!("sync client stopped");
    }

    fn send_action(&self, action: &ActionMessage) {
        match wire::encode_action(action) {
            Ok(text) => self.conn.send(text),
            Err(err) => tracing::warn!(%err, "failed to encode action"),
        }
    }
}
