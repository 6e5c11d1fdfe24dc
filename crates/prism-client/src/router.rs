// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Inbound frame classification and header/payload pairing.

use prism_proto::wire;
use prism_proto::{ServerMessage, SceneUpdateHeader};
use prism_scene_port::{ControlDef, UpAxis};

/// A routed, fully-assembled event ready for the sync core to apply.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// Build (or rebuild) the control panel.
    UiBuild(Vec<ControlDef>),
    /// Replace the layer listing.
    SceneLayers(Vec<String>),
    /// The server acknowledged an action.
    UiAck(String),
    /// Replace the geometry of one scene object.
    SceneUpdate {
        /// Target scene-object path.
        path: String,
        /// Decoded vertex positions, three floats per vertex.
        vertices: Vec<f32>,
    },
    /// Stage axis/scale metadata.
    StageInfo {
        /// World up axis.
        up_axis: UpAxis,
        /// Uniform scale factor for incoming geometry.
        meters_per_unit: f32,
    },
    /// Server-reported error (status only).
    ServerError(String),
}

/// Pairs each `SCENE_UPDATE` header with the binary frame that follows it
/// and turns self-contained commands into [`ClientEvent`]s directly.
///
/// Holds at most one pending header. A second header before any binary
/// frame replaces the first; a binary frame with no pending header is
/// dropped. Routing never touches mirror or selection state.
#[derive(Debug, Default)]
pub struct MessageRouter {
    pending: Option<SceneUpdateHeader>,
}

impl MessageRouter {
    /// A router with no pending header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a geometry header is waiting for its payload.
    pub fn has_pending_header(&self) -> bool {
        self.pending.is_some()
    }

    /// Discard any pending header. Called on disconnect so a stale header
    /// can never pair with a payload from the next session.
    pub fn reset(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("discarding unpaired scene-update header");
        }
    }

    /// Route a text frame. Returns `None` for unknown commands, malformed
    /// frames, and headers (which wait for their payload).
    pub fn handle_text(&mut self, text: &str) -> Option<ClientEvent> {
        let msg = match wire::decode_text(text) {
            Ok(Some(msg)) => msg,
            Ok(None) => {
                tracing::debug!("ignoring unknown command");
                return None;
            }
            Err(err) => {
                tracing::warn!(%err, "dropping malformed text frame");
                return None;
            }
        };
        match msg {
            ServerMessage::UiBuild { controls } => Some(ClientEvent::UiBuild(controls)),
            ServerMessage::SceneLayers { layers } => Some(ClientEvent::SceneLayers(layers)),
            ServerMessage::UiAck { action } => Some(ClientEvent::UiAck(action)),
            ServerMessage::SceneUpdate(header) => {
                if let Some(stale) = self.pending.replace(header) {
                    tracing::debug!(path = %stale.path, "scene-update header superseded");
                }
                None
            }
            ServerMessage::StageInfo(info) => Some(ClientEvent::StageInfo {
                up_axis: UpAxis::from_token(&info.up_axis),
                meters_per_unit: info.meters_per_unit,
            }),
            ServerMessage::Error { reason } => Some(ClientEvent::ServerError(reason)),
        }
    }

    /// Route a binary frame, consuming the pending header.
    ///
    /// A frame with no pending header is dropped without logging; that race
    /// is normal around reconnects. The header is cleared unconditionally,
    /// so a decode of unexpected length cannot leave it armed for a later
    /// payload.
    pub fn handle_binary(&mut self, bytes: &[u8]) -> Option<ClientEvent> {
        let header = self.pending.take()?;
        let vertices = wire::decode_vertices(bytes);
        if let Some(expected) = header.vertex_count {
            let got = (vertices.len() / 3) as u64;
            if got != expected {
                tracing::debug!(expected, got, "vertex count differs from header");
            }
        }
        Some(ClientEvent::SceneUpdate {
            path: header.path,
            vertices,
        })
    }
}
