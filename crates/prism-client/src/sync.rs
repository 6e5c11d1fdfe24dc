// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The single-writer core that applies every event to the mirror.

use prism_proto::ActionMessage;
use prism_scene_port::{PointerNdc, SceneRenderer, UiSurface};

use crate::conn::TransportEvent;
use crate::highlight::HighlightCoordinator;
use crate::mirror::SceneMirror;
use crate::router::{ClientEvent, MessageRouter};

/// User input delivered to the core through an [`crate::InputHandle`].
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer pick in the 3D view, in normalized device coordinates.
    Pick(PointerNdc),
    /// A click on a layer-list entry.
    LayerClicked(String),
    /// A control-panel action to forward to the server.
    Action(ActionMessage),
}

/// Owns all mutable client state and applies events one at a time.
///
/// Only the event loop in [`crate::SyncClient::run`] calls into the core,
/// so every transition runs to completion before the next event is looked
/// at. The core itself is transport-free; outbound messages are returned
/// to the caller to send.
pub struct SyncCore<R, U> {
    router: MessageRouter,
    mirror: SceneMirror,
    highlight: HighlightCoordinator,
    renderer: R,
    ui: U,
}

impl<R: SceneRenderer, U: UiSurface> SyncCore<R, U> {
    /// A core with an empty mirror, wired to the given collaborators.
    pub fn new(renderer: R, ui: U) -> Self {
        Self {
            router: MessageRouter::new(),
            mirror: SceneMirror::new(),
            highlight: HighlightCoordinator::new(),
            renderer,
            ui,
        }
    }

    /// Apply one transport event.
    pub fn handle_transport(&mut self, ev: TransportEvent) {
        match ev {
            TransportEvent::Opened { .. } => self.ui.set_status("Connected"),
            TransportEvent::Failed { .. } => self.ui.set_status("Connection error"),
            TransportEvent::Closed { .. } => {
                // A header must never pair across sessions.
                self.router.reset();
                self.ui.set_status("Disconnected");
            }
            TransportEvent::Text(text) => {
                if let Some(event) = self.router.handle_text(&text) {
                    self.apply(event);
                }
            }
            TransportEvent::Binary(bytes) => {
                if let Some(event) = self.router.handle_binary(&bytes) {
                    self.apply(event);
                }
            }
            TransportEvent::RetryElapsed => {}
        }
    }

    fn apply(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::UiBuild(controls) => self.ui.build_controls(&controls),
            ClientEvent::SceneLayers(raw) => {
                self.mirror.set_layers(&raw);
                self.ui.set_layer_list(self.mirror.layers());
                // The rebuilt list starts unhighlighted.
                self.highlight.reassert(&mut self.renderer, &mut self.ui);
            }
            ClientEvent::SceneUpdate { path, vertices } => {
                self.mirror.apply_update(&path, vertices, &mut self.renderer);
                // Replaced geometry keeps its selection.
                self.highlight.reassert(&mut self.renderer, &mut self.ui);
            }
            ClientEvent::StageInfo {
                up_axis,
                meters_per_unit,
            } => self
                .mirror
                .set_stage(up_axis, meters_per_unit, &mut self.renderer),
            ClientEvent::UiAck(action) => {
                self.ui.set_status(&format!("Ack: {action}"));
            }
            ClientEvent::ServerError(reason) => {
                tracing::warn!(%reason, "server reported an error");
                self.ui.set_status(&format!("Server error: {reason}"));
            }
        }
    }

    /// Apply one input event; returns an action to send upstream, if any.
    pub fn handle_input(&mut self, input: InputEvent) -> Option<ActionMessage> {
        match input {
            InputEvent::Pick(pointer) => {
                let hit = self.mirror.hit_test(pointer, &self.renderer);
                self.highlight.select(hit, &mut self.renderer, &mut self.ui);
                None
            }
            InputEvent::LayerClicked(path) => {
                self.highlight
                    .select(Some(path), &mut self.renderer, &mut self.ui);
                None
            }
            InputEvent::Action(action) => Some(action),
        }
    }

    /// The currently selected path, if any.
    pub fn selection(&self) -> Option<&str> {
        self.highlight.selection()
    }

    /// Read access to the mirror, for adapters and tests.
    pub fn mirror(&self) -> &SceneMirror {
        &self.mirror
    }
}
