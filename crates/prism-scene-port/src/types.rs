// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Small shared value types for the port contracts.

/// Stage up axis, as authored on the server side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpAxis {
    /// Y is up (the default when the server reports nothing usable).
    #[default]
    Y,
    /// Z is up.
    Z,
}

impl UpAxis {
    /// Parse a wire token ("Y"/"Z", case-insensitive). Anything else falls
    /// back to [`UpAxis::Y`].
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("z") {
            UpAxis::Z
        } else {
            UpAxis::Y
        }
    }

    /// Canonical token for this axis.
    pub fn as_str(self) -> &'static str {
        match self {
            UpAxis::Y => "Y",
            UpAxis::Z => "Z",
        }
    }
}

/// Pointer position in normalized device coordinates, both components in
/// `[-1, 1]` with +y up. Adapters convert from whatever pixel space they own.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerNdc {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl PointerNdc {
    /// Construct from raw components.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
