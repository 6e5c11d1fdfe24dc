// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Frame encode/decode helpers.
//!
//! Text frames are JSON objects tagged by `cmd`; binary frames are dense
//! little-endian f32 position buffers with no framing of their own.

use serde_json::Value;
use thiserror::Error;

use crate::{ActionMessage, ServerMessage};

/// Error decoding a text frame.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The frame is not valid JSON, or a recognized command is missing
    /// required fields.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The frame is valid JSON but not an object.
    #[error("text frame is not a JSON object")]
    NotAnObject,
}

/// Decode a text frame.
///
/// Returns `Ok(Some(_))` for a recognized command, `Ok(None)` for an object
/// whose `cmd` is absent or unrecognized (callers drop these silently), and
/// `Err(_)` for malformed frames (callers log and drop, with no other side
/// effects).
pub fn decode_text(text: &str) -> Result<Option<ServerMessage>, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let Some(cmd) = value.get("cmd").and_then(Value::as_str) else {
        return Ok(None);
    };
    match cmd {
        "UI_BUILD" | "SCENE_UPDATE" | "UI_ACK" | "SCENE_LAYERS" | "STAGE_INFO" | "ERROR" => {
            Ok(Some(serde_json::from_value(value)?))
        }
        _ => Ok(None),
    }
}

/// Decode a binary payload as little-endian f32 positions.
///
/// Trailing bytes short of a full float are ignored.
pub fn decode_vertices(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Encode a binary payload from f32 positions (little-endian).
pub fn encode_vertices(positions: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(positions.len() * 4);
    for p in positions {
        out.extend_from_slice(&p.to_le_bytes());
    }
    out
}

/// Encode an outbound action message to JSON text.
pub fn encode_action(msg: &ActionMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(msg)
}

/// Encode a server message to JSON text (used by tests and tooling).
pub fn encode_message(msg: &ServerMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneUpdateHeader, StageInfo, DEFAULT_MESH_PATH};
    use prism_scene_port::ControlDef;

    #[test]
    fn decodes_every_recognized_command() {
        let cases = [
            r#"{"cmd":"UI_BUILD","controls":[]}"#,
            r#"{"cmd":"SCENE_UPDATE","path":"/A"}"#,
            r#"{"cmd":"UI_ACK","action":"request_layers"}"#,
            r#"{"cmd":"SCENE_LAYERS","layers":["/World (Xform)"]}"#,
            r#"{"cmd":"STAGE_INFO","meters_per_unit":0.01,"up_axis":"Z"}"#,
            r#"{"cmd":"ERROR","reason":"unknown_action"}"#,
        ];
        for text in cases {
            let msg = decode_text(text).unwrap().unwrap();
            assert!(text.contains(msg.cmd_name()), "wrong variant for {text}");
        }
    }

    #[test]
    fn scene_update_header_defaults_its_path() {
        let msg = decode_text(r#"{"cmd":"SCENE_UPDATE"}"#).unwrap().unwrap();
        match msg {
            ServerMessage::SceneUpdate(header) => {
                assert_eq!(header.path, DEFAULT_MESH_PATH);
                assert_eq!(header.vertex_count, None);
            }
            other => panic!("expected SceneUpdate, got {other:?}"),
        }
    }

    #[test]
    fn scene_update_header_carries_full_metadata() {
        let text = r#"{"cmd":"SCENE_UPDATE","path":"/World/TestMesh","type":"mesh",
                       "action":"full_update","vertex_count":39,"face_count":13,"components":3}"#;
        let msg = decode_text(text).unwrap().unwrap();
        match msg {
            ServerMessage::SceneUpdate(SceneUpdateHeader {
                prim_type,
                action,
                vertex_count,
                face_count,
                components,
                ..
            }) => {
                assert_eq!(prim_type.as_deref(), Some("mesh"));
                assert_eq!(action.as_deref(), Some("full_update"));
                assert_eq!(vertex_count, Some(39));
                assert_eq!(face_count, Some(13));
                assert_eq!(components, Some(3));
            }
            other => panic!("expected SceneUpdate, got {other:?}"),
        }
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        assert!(decode_text(r#"{"cmd":"SCENE_DELTA","ops":[]}"#)
            .unwrap()
            .is_none());
        // No cmd at all classifies the same way.
        assert!(decode_text(r#"{"layers":[]}"#).unwrap().is_none());
        assert!(decode_text(r#"{"cmd":42}"#).unwrap().is_none());
    }

    #[test]
    fn malformed_frames_error() {
        assert!(decode_text("{not json").is_err());
        assert!(decode_text("[1,2,3]").is_err());
        // Recognized command missing a required field is malformed too.
        assert!(decode_text(r#"{"cmd":"UI_ACK"}"#).is_err());
    }

    #[test]
    fn stage_info_defaults() {
        let msg = decode_text(r#"{"cmd":"STAGE_INFO"}"#).unwrap().unwrap();
        assert_eq!(
            msg,
            ServerMessage::StageInfo(StageInfo {
                meters_per_unit: 1.0,
                up_axis: "Y".to_owned(),
            })
        );
    }

    #[test]
    fn controls_deserialize_inside_ui_build() {
        let text = r#"{"cmd":"UI_BUILD","controls":[
            {"type":"button","action":"request_layers","label":"Refresh"},
            {"type":"dial","action":"spin"}
        ]}"#;
        let msg = decode_text(text).unwrap().unwrap();
        match msg {
            ServerMessage::UiBuild { controls } => {
                assert_eq!(controls.len(), 2);
                assert_eq!(controls[0].caption(), "Refresh");
                assert_eq!(controls[1], ControlDef::Unknown);
            }
            other => panic!("expected UiBuild, got {other:?}"),
        }
    }

    #[test]
    fn vertices_round_trip_little_endian() {
        let verts = [-0.4f32, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.7, 0.0];
        let bytes = encode_vertices(&verts);
        assert_eq!(bytes.len(), 36);
        assert_eq!(decode_vertices(&bytes), verts);
    }

    #[test]
    fn trailing_payload_bytes_are_ignored() {
        let mut bytes = encode_vertices(&[1.0f32, 2.0, 3.0]);
        bytes.extend_from_slice(&[0xde, 0xad]);
        assert_eq!(decode_vertices(&bytes), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn action_message_omits_missing_value() {
        let bare = encode_action(&ActionMessage::new("request_layers")).unwrap();
        assert_eq!(bare, r#"{"action":"request_layers"}"#);

        let valued = encode_action(&ActionMessage::with_value("set_speed", 2.5)).unwrap();
        assert_eq!(valued, r#"{"action":"set_speed","value":2.5}"#);
    }
}
