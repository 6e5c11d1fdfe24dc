// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Triangle-soup geometry prepared for rendering.
//!
//! Scene geometry arrives as a flat position buffer with no shared-vertex
//! indexing: every 3 consecutive floats form one vertex, every 9 one
//! triangle. Normals and bounds are recomputed here on every update so the
//! renderer can stay dumb.

use glam::Vec3;

/// Bounding sphere of a position buffer: AABB center, max-distance radius.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingSphere {
    /// Center of the axis-aligned bounding box.
    pub center: [f32; 3],
    /// Distance from the center to the farthest vertex.
    pub radius: f32,
}

/// A non-indexed triangle mesh with per-vertex flat normals and bounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleSoup {
    positions: Vec<f32>,
    normals: Vec<f32>,
    bounds: BoundingSphere,
}

impl TriangleSoup {
    /// Build a soup from a flat position buffer, applying `scale` uniformly
    /// to every coordinate first.
    ///
    /// Trailing floats short of a full vertex are dropped. Vertices short of
    /// a full triangle keep zero normals.
    pub fn from_positions(mut positions: Vec<f32>, scale: f32) -> Self {
        positions.truncate(positions.len() - positions.len() % 3);
        if scale != 1.0 {
            for p in &mut positions {
                *p *= scale;
            }
        }
        let normals = flat_normals(&positions);
        let bounds = bounding_sphere(&positions);
        Self {
            positions,
            normals,
            bounds,
        }
    }

    /// Number of vertices (positions / 3). No indexing: this is also the
    /// draw count.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// Flat position buffer, xyz per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat normal buffer, parallel to [`Self::positions`].
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Bounding sphere of the position buffer.
    pub fn bounds(&self) -> BoundingSphere {
        self.bounds
    }
}

fn vertex(positions: &[f32], i: usize) -> Vec3 {
    Vec3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2])
}

/// Per-vertex normals for a triangle soup: the face normal of each complete
/// triangle, replicated to its three vertices (flat shading, matching what
/// recomputing normals on non-indexed geometry yields).
fn flat_normals(positions: &[f32]) -> Vec<f32> {
    let mut normals = vec![0.0f32; positions.len()];
    let vert_count = positions.len() / 3;
    for tri in 0..vert_count / 3 {
        let a = vertex(positions, tri * 3);
        let b = vertex(positions, tri * 3 + 1);
        let c = vertex(positions, tri * 3 + 2);
        let n = (b - a).cross(c - a).normalize_or_zero();
        for v in 0..3 {
            let base = (tri * 3 + v) * 3;
            normals[base] = n.x;
            normals[base + 1] = n.y;
            normals[base + 2] = n.z;
        }
    }
    normals
}

fn bounding_sphere(positions: &[f32]) -> BoundingSphere {
    let vert_count = positions.len() / 3;
    if vert_count == 0 {
        return BoundingSphere::default();
    }
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for i in 0..vert_count {
        let v = vertex(positions, i);
        min = min.min(v);
        max = max.max(v);
    }
    let center = (min + max) * 0.5;
    let mut radius_sq = 0.0f32;
    for i in 0..vert_count {
        radius_sq = radius_sq.max(center.distance_squared(vertex(positions, i)));
    }
    BoundingSphere {
        center: center.to_array(),
        radius: radius_sq.sqrt(),
    }
}
