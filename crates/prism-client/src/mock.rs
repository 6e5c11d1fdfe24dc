// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless renderer and UI adapters for tests.
//!
//! Both mocks share their state through `Arc<Mutex<_>>`, so a clone taken
//! before handing the mock to the core stays valid for inspection while the
//! core drives the original.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use prism_scene_port::{
    ControlDef, LayerEntry, PointerNdc, SceneRenderer, TriangleSoup, UiSurface, UpAxis,
};

#[derive(Debug, Default)]
struct RendererState {
    meshes: HashMap<String, TriangleSoup>,
    highlighted: Option<String>,
    highlight_calls: Vec<Option<String>>,
    stage: Option<(UpAxis, f32)>,
    next_hit: Option<String>,
}

/// In-memory [`SceneRenderer`] recording everything pushed into it.
#[derive(Clone, Debug, Default)]
pub struct MockRenderer {
    state: Arc<Mutex<RendererState>>,
}

impl MockRenderer {
    /// An empty mock renderer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RendererState> {
        self.state.lock().expect("mock renderer state poisoned")
    }

    /// Arm the value the next `hit_test` calls return.
    pub fn set_next_hit(&self, hit: Option<String>) {
        self.lock().next_hit = hit;
    }

    /// Vertex count of the mesh at `path`, if one was applied.
    pub fn mesh_vertex_count(&self, path: &str) -> Option<usize> {
        self.lock().meshes.get(path).map(TriangleSoup::vertex_count)
    }

    /// Paths of every applied mesh, sorted.
    pub fn mesh_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().meshes.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// The currently highlighted path.
    pub fn highlighted(&self) -> Option<String> {
        self.lock().highlighted.clone()
    }

    /// Every `set_highlight` argument seen, in order.
    pub fn highlight_calls(&self) -> Vec<Option<String>> {
        self.lock().highlight_calls.clone()
    }

    /// Forget highlight state and call history (not meshes).
    pub fn clear_highlight_state(&self) {
        let mut state = self.lock();
        state.highlighted = None;
        state.highlight_calls.clear();
    }

    /// The last stage configuration pushed, if any.
    pub fn stage(&self) -> Option<(UpAxis, f32)> {
        self.lock().stage
    }
}

impl SceneRenderer for MockRenderer {
    fn apply_update(&mut self, path: &str, soup: &TriangleSoup) {
        self.lock().meshes.insert(path.to_owned(), soup.clone());
    }

    fn hit_test(&self, _pointer: PointerNdc) -> Option<String> {
        self.lock().next_hit.clone()
    }

    fn set_highlight(&mut self, path: Option<&str>) {
        let mut state = self.lock();
        state.highlighted = path.map(str::to_owned);
        state.highlight_calls.push(path.map(str::to_owned));
    }

    fn set_up_axis_and_scale(&mut self, axis: UpAxis, meters_per_unit: f32) {
        self.lock().stage = Some((axis, meters_per_unit));
    }
}

#[derive(Debug, Default)]
struct UiState {
    status: Vec<String>,
    layers: Vec<LayerEntry>,
    highlighted: Option<String>,
    highlight_calls: Vec<Option<String>>,
    controls: Vec<ControlDef>,
}

/// In-memory [`UiSurface`] recording everything pushed into it.
#[derive(Clone, Debug, Default)]
pub struct MockUi {
    state: Arc<Mutex<UiState>>,
}

impl MockUi {
    /// An empty mock UI.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, UiState> {
        self.state.lock().expect("mock ui state poisoned")
    }

    /// The most recent status line (empty before any update).
    pub fn status(&self) -> String {
        self.lock().status.last().cloned().unwrap_or_default()
    }

    /// Every status line seen, in order.
    pub fn status_history(&self) -> Vec<String> {
        self.lock().status.clone()
    }

    /// Paths of the current layer list, in display order.
    pub fn layer_paths(&self) -> Vec<String> {
        self.lock().layers.iter().map(|e| e.path.clone()).collect()
    }

    /// The currently highlighted entry path.
    pub fn highlighted(&self) -> Option<String> {
        self.lock().highlighted.clone()
    }

    /// Every `set_highlighted_entry` argument seen, in order.
    pub fn highlight_calls(&self) -> Vec<Option<String>> {
        self.lock().highlight_calls.clone()
    }

    /// Captions of the current control panel, in display order.
    pub fn control_captions(&self) -> Vec<String> {
        self.lock()
            .controls
            .iter()
            .map(|c| c.caption().to_owned())
            .collect()
    }
}

impl UiSurface for MockUi {
    fn set_status(&mut self, text: &str) {
        self.lock().status.push(text.to_owned());
    }

    fn set_layer_list(&mut self, entries: &[LayerEntry]) {
        self.lock().layers = entries.to_vec();
    }

    fn set_highlighted_entry(&mut self, path: Option<&str>) {
        let mut state = self.lock();
        state.highlighted = path.map(str::to_owned);
        state.highlight_calls.push(path.map(str::to_owned));
    }

    fn build_controls(&mut self, controls: &[ControlDef]) {
        self.lock().controls = controls.to_vec();
    }
}
