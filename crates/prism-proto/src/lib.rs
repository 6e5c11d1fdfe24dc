// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wire schema for the Prism stage mirror.
//!
//! The server pushes JSON text frames tagged by a `cmd` field, plus raw
//! binary frames carrying dense little-endian f32 vertex buffers. A
//! `SCENE_UPDATE` text frame announces metadata for the geometry in the
//! immediately following binary frame (header/payload pairing); all other
//! commands are self-contained.
//!
//! Decoding distinguishes three outcomes: a typed message, an unknown
//! command (dropped silently by callers), and a malformed frame (logged and
//! dropped). See [`wire::decode_text`].

use prism_scene_port::ControlDef;
use serde::{Deserialize, Serialize};

pub mod wire;

/// Placeholder target path used when a `SCENE_UPDATE` header omits `path`.
pub const DEFAULT_MESH_PATH: &str = "/World/TestMesh";

/// Well-known outbound action requesting a fresh layer listing.
pub const ACTION_REQUEST_LAYERS: &str = "request_layers";

fn default_mesh_path() -> String {
    DEFAULT_MESH_PATH.to_owned()
}

fn default_meters_per_unit() -> f32 {
    1.0
}

fn default_up_axis() -> String {
    "Y".to_owned()
}

/// Header announcing the geometry carried by the next binary frame.
///
/// Only `path` affects client behavior; the remaining fields are advisory
/// metadata the server includes for debugging and tooling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneUpdateHeader {
    /// Target scene-object path; defaults to [`DEFAULT_MESH_PATH`].
    #[serde(default = "default_mesh_path")]
    pub path: String,
    /// Prim type, e.g. `"mesh"`.
    #[serde(rename = "type", default)]
    pub prim_type: Option<String>,
    /// Update kind, e.g. `"full_update"`.
    #[serde(default)]
    pub action: Option<String>,
    /// Vertex count the server expects the payload to carry.
    #[serde(default)]
    pub vertex_count: Option<u64>,
    /// Authored face count before triangulation.
    #[serde(default)]
    pub face_count: Option<u64>,
    /// Components per vertex (always 3 today).
    #[serde(default)]
    pub components: Option<u32>,
}

/// Stage metadata the server sends once after connect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageInfo {
    /// Uniform meters-per-unit scale factor for incoming geometry.
    #[serde(default = "default_meters_per_unit")]
    pub meters_per_unit: f32,
    /// Up-axis token, `"Y"` or `"Z"`.
    #[serde(default = "default_up_axis")]
    pub up_axis: String,
}

/// Server → client messages, tagged by the `cmd` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum ServerMessage {
    /// Control-panel description (forwarded to the UI collaborator).
    #[serde(rename = "UI_BUILD")]
    UiBuild {
        /// Control descriptors, in display order.
        #[serde(default)]
        controls: Vec<ControlDef>,
    },
    /// Geometry header; the payload follows in the next binary frame.
    #[serde(rename = "SCENE_UPDATE")]
    SceneUpdate(SceneUpdateHeader),
    /// Acknowledgement of a client action.
    #[serde(rename = "UI_ACK")]
    UiAck {
        /// The acknowledged action identifier.
        action: String,
    },
    /// Current scene layer listing, in server order.
    #[serde(rename = "SCENE_LAYERS")]
    SceneLayers {
        /// Raw display strings, one per layer.
        #[serde(default)]
        layers: Vec<String>,
    },
    /// Stage axis/scale metadata.
    #[serde(rename = "STAGE_INFO")]
    StageInfo(StageInfo),
    /// Server-reported error (status only, never fatal).
    #[serde(rename = "ERROR")]
    Error {
        /// Human-readable reason, e.g. `"unknown_action"`.
        reason: String,
    },
}

impl ServerMessage {
    /// Canonical `cmd` string for this message variant.
    pub fn cmd_name(&self) -> &'static str {
        match self {
            ServerMessage::UiBuild { .. } => "UI_BUILD",
            ServerMessage::SceneUpdate(_) => "SCENE_UPDATE",
            ServerMessage::UiAck { .. } => "UI_ACK",
            ServerMessage::SceneLayers { .. } => "SCENE_LAYERS",
            ServerMessage::StageInfo(_) => "STAGE_INFO",
            ServerMessage::Error { .. } => "ERROR",
        }
    }
}

/// Client → server action message.
///
/// Sent only while the connection is open; delivery is best-effort.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionMessage {
    /// Action identifier (from a control descriptor or a well-known name).
    pub action: String,
    /// Optional value for continuous controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl ActionMessage {
    /// A bare action with no value.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            value: None,
        }
    }

    /// An action carrying a value.
    pub fn with_value(action: impl Into<String>, value: f64) -> Self {
        Self {
            action: action.into(),
            value: Some(value),
        }
    }
}
