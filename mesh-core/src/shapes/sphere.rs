//! Sphere creator: a unit cube lattice warped onto the unit sphere

use glam::Vec3;

use super::{cube, orientation, scale_and_offset};
use crate::request::MeshRequest;
use crate::types::MeshData;

pub(super) fn create(request: &MeshRequest) -> MeshData {
    let mut mesh = cube::create(request, 0.0, false);

    for i in 0..mesh.vertices.len() {
        let on_cube = 2.0 * mesh.vertices[i] - Vec3::ONE;
        let on_sphere = cube_to_sphere(on_cube);

        mesh.normals[i] = on_sphere * orientation(&mesh, i, request.forward_facing);
        mesh.vertices[i] = 0.5 * (Vec3::ONE + on_sphere);
    }

    scale_and_offset(&mut mesh, request.size, request.offset);
    mesh
}

/// Map a point of the `[-1, 1]³` cube surface onto the unit sphere with
/// roughly equal-area cells.
pub fn cube_to_sphere(p: Vec3) -> Vec3 {
    let sq = p * p;
    Vec3::new(
        p.x * (1.0 - sq.y / 2.0 - sq.z / 2.0 + sq.y * sq.z / 3.0).sqrt(),
        p.y * (1.0 - sq.x / 2.0 - sq.z / 2.0 + sq.x * sq.z / 3.0).sqrt(),
        p.z * (1.0 - sq.x / 2.0 - sq.y / 2.0 + sq.x * sq.y / 3.0).sqrt(),
    )
}
