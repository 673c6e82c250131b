//! Bounds and normal recompute after displacement

use glam::Vec3;
use procmesh_core::{Bounds, MeshData};
use rayon::prelude::*;

/// Tight axis-aligned bounds from a parallel min/max reduction.
///
/// An empty mesh keeps its current bounds.
pub fn recalculate_bounds(mesh: &mut MeshData) {
    if mesh.vertices.is_empty() {
        return;
    }

    let (min, max) = mesh
        .vertices
        .par_iter()
        .map(|&v| (v, v))
        .reduce(
            || (Vec3::INFINITY, Vec3::NEG_INFINITY),
            |(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)),
        );

    mesh.bounds = Bounds::from_min_max(min, max);
}

/// Smooth per-vertex normals: every triangle's normalized
/// `(v2 - v1) × (v3 - v1)` is accumulated on its three corners and the sums
/// are normalized. Vertices no triangle references keep their normal.
pub fn recalculate_normals(mesh: &mut MeshData) {
    let vertices = &mesh.vertices;
    let face_normals: Vec<Vec3> = mesh
        .triangles
        .par_chunks_exact(3)
        .map(|tri| {
            let v1 = vertices[tri[0] as usize];
            let v2 = vertices[tri[1] as usize];
            let v3 = vertices[tri[2] as usize];
            (v2 - v1).cross(v3 - v1).normalize_or_zero()
        })
        .collect();

    let mut sums = vec![Vec3::ZERO; vertices.len()];
    for (tri, normal) in mesh.triangles.chunks_exact(3).zip(&face_normals) {
        for &index in tri {
            sums[index as usize] += *normal;
        }
    }

    mesh.normals
        .par_iter_mut()
        .zip(sums.par_iter())
        .for_each(|(normal, sum)| *normal = sum.normalize_or(*normal));
}
