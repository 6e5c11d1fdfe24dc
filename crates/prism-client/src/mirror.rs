// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Authoritative local copy of the remote scene.

use std::collections::HashMap;

use prism_scene_port::{LayerEntry, PointerNdc, SceneRenderer, TriangleSoup, UpAxis};

/// One mirrored scene object.
#[derive(Clone, Debug)]
pub struct SceneObject {
    soup: TriangleSoup,
}

impl SceneObject {
    /// The object's current geometry.
    pub fn soup(&self) -> &TriangleSoup {
        &self.soup
    }
}

/// Path-keyed mirror of the remote scene.
///
/// Geometry updates are whole-object replacement: each update discards the
/// previous geometry at that path. Stage scale is applied to positions as
/// they arrive, so everything downstream works in scaled space.
#[derive(Debug)]
pub struct SceneMirror {
    objects: HashMap<String, SceneObject>,
    layers: Vec<LayerEntry>,
    up_axis: UpAxis,
    meters_per_unit: f32,
}

impl Default for SceneMirror {
    fn default() -> Self {
        Self {
            objects: HashMap::new(),
            layers: Vec::new(),
            up_axis: UpAxis::default(),
            meters_per_unit: 1.0,
        }
    }
}

impl SceneMirror {
    /// An empty mirror with identity scale and Y up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record stage metadata and forward it to the renderer.
    ///
    /// A scale of exactly zero is replaced with 1.0; any other value passes
    /// through untouched. Already-mirrored geometry keeps the scale it
    /// arrived under.
    pub fn set_stage<R: SceneRenderer>(
        &mut self,
        up_axis: UpAxis,
        meters_per_unit: f32,
        renderer: &mut R,
    ) {
        self.up_axis = up_axis;
        self.meters_per_unit = if meters_per_unit == 0.0 {
            tracing::warn!("zero stage scale, using 1.0");
            1.0
        } else {
            meters_per_unit
        };
        renderer.set_up_axis_and_scale(self.up_axis, self.meters_per_unit);
        tracing::info!(
            up_axis = self.up_axis.as_str(),
            meters_per_unit = self.meters_per_unit,
            "stage metadata applied"
        );
    }

    /// Replace the geometry at `path` and push it to the renderer.
    pub fn apply_update<R: SceneRenderer>(
        &mut self,
        path: &str,
        vertices: Vec<f32>,
        renderer: &mut R,
    ) {
        let soup = TriangleSoup::from_positions(vertices, self.meters_per_unit);
        tracing::debug!(
            path,
            vertices = soup.vertex_count(),
            triangles = soup.triangle_count(),
            "scene object replaced"
        );
        renderer.apply_update(path, &soup);
        self.objects.insert(path.to_owned(), SceneObject { soup });
    }

    /// Replace the layer index from raw server strings.
    pub fn set_layers(&mut self, raw: &[String]) {
        self.layers = raw.iter().map(|s| LayerEntry::parse(s)).collect();
    }

    /// Ask the renderer what the pointer is over.
    pub fn hit_test<R: SceneRenderer>(&self, pointer: PointerNdc, renderer: &R) -> Option<String> {
        renderer.hit_test(pointer)
    }

    /// The mirrored object at `path`, if any.
    pub fn object(&self, path: &str) -> Option<&SceneObject> {
        self.objects.get(path)
    }

    /// Number of mirrored objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// The current layer index, in server order.
    pub fn layers(&self) -> &[LayerEntry] {
        &self.layers
    }

    /// Current world up axis.
    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    /// Current geometry scale factor.
    pub fn meters_per_unit(&self) -> f32 {
        self.meters_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockRenderer;

    const TRI: [f32; 9] = [-0.4, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.7, 0.0];

    #[test]
    fn update_replaces_geometry_wholesale() {
        let mut mirror = SceneMirror::new();
        let mut renderer = MockRenderer::new();

        mirror.apply_update("/World/Box", TRI.to_vec(), &mut renderer);
        assert_eq!(mirror.object("/World/Box").unwrap().soup().vertex_count(), 3);

        let two_tris: Vec<f32> = TRI.iter().chain(TRI.iter()).copied().collect();
        mirror.apply_update("/World/Box", two_tris, &mut renderer);
        assert_eq!(mirror.object("/World/Box").unwrap().soup().vertex_count(), 6);
        assert_eq!(mirror.object_count(), 1);
        assert_eq!(renderer.mesh_vertex_count("/World/Box"), Some(6));
    }

    #[test]
    fn stage_scale_applies_to_later_updates_only() {
        let mut mirror = SceneMirror::new();
        let mut renderer = MockRenderer::new();

        mirror.apply_update("/Before", TRI.to_vec(), &mut renderer);
        mirror.set_stage(UpAxis::Z, 0.5, &mut renderer);
        mirror.apply_update("/After", TRI.to_vec(), &mut renderer);

        let before = mirror.object("/Before").unwrap().soup().positions()[3];
        let after = mirror.object("/After").unwrap().soup().positions()[3];
        assert_eq!(before, 0.4);
        assert_eq!(after, 0.2);
        assert_eq!(mirror.up_axis(), UpAxis::Z);
    }

    #[test]
    fn zero_scale_is_replaced_with_identity() {
        let mut mirror = SceneMirror::new();
        let mut renderer = MockRenderer::new();
        mirror.set_stage(UpAxis::Y, 0.0, &mut renderer);
        assert_eq!(mirror.meters_per_unit(), 1.0);
    }

    #[test]
    fn only_exactly_zero_falls_back_to_identity() {
        let mut mirror = SceneMirror::new();
        let mut renderer = MockRenderer::new();
        mirror.set_stage(UpAxis::Y, -2.0, &mut renderer);
        assert_eq!(mirror.meters_per_unit(), -2.0);
        mirror.set_stage(UpAxis::Y, 0.001, &mut renderer);
        assert_eq!(mirror.meters_per_unit(), 0.001);
    }

    #[test]
    fn layers_parse_path_from_first_token() {
        let mut mirror = SceneMirror::new();
        mirror.set_layers(&[
            "/World (Xform)".to_owned(),
            "/World/Props/Chair 4 verts".to_owned(),
        ]);
        assert_eq!(mirror.layers()[0].path, "/World");
        assert_eq!(mirror.layers()[1].path, "/World/Props/Chair");
        assert_eq!(mirror.layers()[1].label, "/World/Props/Chair 4 verts");
    }

    #[test]
    fn hit_test_delegates_to_the_renderer() {
        let mirror = SceneMirror::new();
        let mut renderer = MockRenderer::new();
        renderer.set_next_hit(Some("/World/Box".to_owned()));
        assert_eq!(
            mirror.hit_test(PointerNdc { x: 0.0, y: 0.0 }, &renderer),
            Some("/World/Box".to_owned())
        );
    }
}
