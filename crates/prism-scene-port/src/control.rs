// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Control descriptors delivered by `UI_BUILD` messages.
//!
//! The sync core forwards these to the UI surface untouched; only the UI
//! adapter interprets them. Serde derives live here because the descriptors
//! cross the wire verbatim (the protocol crate embeds them as-is).

use serde::{Deserialize, Serialize};

fn default_max() -> f64 {
    1.0
}

fn default_step() -> f64 {
    0.1
}

/// One on-screen control requested by the server.
///
/// Servers may introduce new control types at any time; those deserialize as
/// [`ControlDef::Unknown`] and are ignored by UI surfaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlDef {
    /// A push button that fires its action when clicked.
    Button {
        /// Action identifier sent back to the server on click.
        #[serde(default)]
        action: String,
        /// Optional display label (falls back to the action identifier).
        #[serde(default)]
        label: Option<String>,
    },
    /// A slider that reports its value as it changes.
    Slider {
        /// Action identifier sent back with each value change.
        #[serde(default)]
        action: String,
        /// Optional display label (falls back to the action identifier).
        #[serde(default)]
        label: Option<String>,
        /// Initial value.
        #[serde(default)]
        value: f64,
        /// Inclusive lower bound.
        #[serde(default)]
        min: f64,
        /// Inclusive upper bound.
        #[serde(default = "default_max")]
        max: f64,
        /// Step increment.
        #[serde(default = "default_step")]
        step: f64,
    },
    /// A control type this client does not understand.
    #[serde(other)]
    Unknown,
}

impl ControlDef {
    /// Display caption: the label when present, otherwise the action.
    pub fn caption(&self) -> &str {
        match self {
            ControlDef::Button { action, label } | ControlDef::Slider { action, label, .. } => {
                label.as_deref().unwrap_or(action)
            }
            ControlDef::Unknown => "",
        }
    }
}
