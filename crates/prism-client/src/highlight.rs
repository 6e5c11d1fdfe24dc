// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single owner of the current selection.
//!
//! Both collaborators (3D view, layer list) are updated on every change so
//! they can never disagree about what is selected. Collaborators receive a
//! clear before a new selection is set; they never have to diff.

use prism_scene_port::{SceneRenderer, UiSurface};

/// Owns the one selected path and mirrors it into both collaborators.
#[derive(Debug, Default)]
pub struct HighlightCoordinator {
    selected: Option<String>,
}

impl HighlightCoordinator {
    /// A coordinator with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected path, if any.
    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select `path` (or clear with `None`), updating both collaborators.
    ///
    /// Selecting the already-selected path re-asserts it rather than
    /// toggling, so a repeated pick is harmless.
    pub fn select<R: SceneRenderer, U: UiSurface>(
        &mut self,
        path: Option<String>,
        renderer: &mut R,
        ui: &mut U,
    ) {
        if path == self.selected {
            self.reassert(renderer, ui);
            return;
        }
        // Clear first so collaborators hold at most one highlight at a time.
        renderer.set_highlight(None);
        ui.set_highlighted_entry(None);
        self.selected = path;
        if self.selected.is_some() {
            self.reassert(renderer, ui);
        }
        tracing::debug!(selected = ?self.selected, "selection changed");
    }

    /// Re-push the current selection into both collaborators.
    ///
    /// Called after content refreshes (geometry replaced, layer list
    /// rebuilt) so the highlight survives them. Unknown paths no-op inside
    /// the collaborators.
    pub fn reassert<R: SceneRenderer, U: UiSurface>(&self, renderer: &mut R, ui: &mut U) {
        renderer.set_highlight(self.selected.as_deref());
        ui.set_highlighted_entry(self.selected.as_deref());
    }
}
