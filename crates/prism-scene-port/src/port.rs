// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port traits defining the renderer and UI surface contracts.

use crate::{ControlDef, LayerEntry, PointerNdc, TriangleSoup, UpAxis};

/// Scene rendering port.
///
/// The sync core pushes prepared geometry and highlight state in; the only
/// query a renderer answers is the ray cast behind [`Self::hit_test`].
///
/// # Contract
///
/// - `apply_update` for an already-known path replaces that object's
///   geometry in place; object identity (and any highlight on it) survives.
/// - `set_highlight` with a path the renderer does not know is a no-op, not
///   an error.
/// - Nothing here may block or fail; renderers are best-effort.
pub trait SceneRenderer {
    /// Replace (or create) the object at `path` with prepared geometry.
    fn apply_update(&mut self, path: &str, soup: &TriangleSoup);

    /// Cast a ray through the pointer position and return the path of the
    /// nearest intersected object, if any.
    fn hit_test(&self, pointer: PointerNdc) -> Option<String>;

    /// Mark exactly the given path as selected (`None` clears).
    fn set_highlight(&mut self, path: Option<&str>);

    /// Configure the stage up axis and meters-per-unit factor.
    ///
    /// Geometry delivered through [`Self::apply_update`] arrives already
    /// scaled; this call is for camera/grid configuration only.
    fn set_up_axis_and_scale(&mut self, axis: UpAxis, meters_per_unit: f32);
}

/// Textual UI surface port.
///
/// Displays connection status, the layer list, and the current highlight.
/// Entry clicks flow back to the core through whatever input plumbing the
/// adapter owns; this trait is push-only.
pub trait UiSurface {
    /// Show a one-line connection/status message.
    fn set_status(&mut self, text: &str);

    /// Replace the layer list, preserving the given order.
    fn set_layer_list(&mut self, entries: &[LayerEntry]);

    /// Mark exactly the given path's entry as selected (`None` clears).
    /// Unknown paths are a no-op.
    fn set_highlighted_entry(&mut self, path: Option<&str>);

    /// Rebuild the server-driven control panel.
    fn build_controls(&mut self, controls: &[ControlDef]);
}
