// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Logging adapters for running the sync core without a window.

use prism_scene_port::{
    ControlDef, LayerEntry, PointerNdc, SceneRenderer, TriangleSoup, UiSurface, UpAxis,
};
use tracing::info;

/// Renderer that reports applied geometry instead of drawing it.
///
/// There is no window, so nothing is ever under the pointer and
/// `hit_test` always misses.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl SceneRenderer for LogRenderer {
    fn apply_update(&mut self, path: &str, soup: &TriangleSoup) {
        let bounds = soup.bounds();
        info!(
            path,
            vertices = soup.vertex_count(),
            triangles = soup.triangle_count(),
            radius = bounds.radius,
            "scene update applied"
        );
    }

    fn hit_test(&self, _pointer: PointerNdc) -> Option<String> {
        None
    }

    fn set_highlight(&mut self, path: Option<&str>) {
        match path {
            Some(path) => info!(path, "highlighted"),
            None => info!("highlight cleared"),
        }
    }

    fn set_up_axis_and_scale(&mut self, axis: UpAxis, meters_per_unit: f32) {
        info!(up_axis = axis.as_str(), meters_per_unit, "stage configured");
    }
}

/// UI surface that reports server-driven UI state to the log.
#[derive(Debug, Default)]
pub struct LogUi;

impl UiSurface for LogUi {
    fn set_status(&mut self, text: &str) {
        info!(status = text, "status");
    }

    fn set_layer_list(&mut self, entries: &[LayerEntry]) {
        info!(count = entries.len(), "layer list replaced");
        for entry in entries {
            info!(label = %entry.label, path = %entry.path, "layer");
        }
    }

    fn set_highlighted_entry(&mut self, path: Option<&str>) {
        if let Some(path) = path {
            info!(path, "layer entry highlighted");
        }
    }

    fn build_controls(&mut self, controls: &[ControlDef]) {
        info!(count = controls.len(), "control panel rebuilt");
        for control in controls {
            info!(caption = control.caption(), "control");
        }
    }
}
