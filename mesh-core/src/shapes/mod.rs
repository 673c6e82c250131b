//! Shape creators
//!
//! Each creator describes its lattice and face table, hands them to the
//! vertex builder and triangulator, then runs its own post-process.
//! All shapes finish with scale-and-offset unless built as a sub-step of
//! another shape.

mod cube;
mod plane;
mod sphere;

use glam::Vec3;
use tracing::debug;

use crate::error::MeshError;
use crate::request::{MeshRequest, ShapeKind};
use crate::triangulation::{FaceDescriptor, TriangulationParams, triangulate};
use crate::types::{Bounds, MeshData};
use crate::vertices::{Lattice, build_vertex_groups};

pub use cube::{CubeLattice, cube_faces};
pub use plane::{PlaneLattice, plane_face};
pub use sphere::cube_to_sphere;

/// Build the mesh described by `request`.
///
/// The request is validated first; the optional post-process hook runs
/// last, on the finished mesh.
pub fn create_mesh(request: &MeshRequest) -> Result<MeshData, MeshError> {
    request.validate()?;

    let mut mesh = match request.shape {
        ShapeKind::Plane { axis } => plane::create(request, axis),
        ShapeKind::Cube { roundness } => cube::create(request, roundness, true),
        ShapeKind::Sphere => sphere::create(request),
    };

    if let Some(post_process) = request.post_process {
        post_process(&mut mesh);
    }

    debug!(
        "Created {} '{}': resolution={}, {} vertices, {} indices",
        request.shape.name(),
        request.name,
        request.resolution,
        mesh.vertex_count(),
        mesh.triangles.len()
    );

    Ok(mesh)
}

/// Shared creator pipeline: vertex groups, then triangles with normals/UVs
fn tessellate<L: Lattice>(
    request: &MeshRequest,
    lattice: &L,
    faces: &[FaceDescriptor],
    base_edge_slot: Option<usize>,
) -> MeshData {
    let build = build_vertex_groups(lattice, request.backface_culling);
    let params = TriangulationParams {
        resolution: request.resolution as usize,
        forward_facing: request.forward_facing,
        backface_culling: request.backface_culling,
        base_edge_slot,
    };

    let mut mesh = MeshData::from_groups(
        request.name.clone(),
        build.groups.clone(),
        build.exclusion_map.clone(),
        build.slot_count,
        build.backface_culling,
    );
    mesh.triangles = triangulate(faces, &build, &params, &mut mesh.normals, &mut mesh.uv);
    mesh
}

/// Map unit-lattice positions into the requested box:
/// `v = -size / 2 + offset + v * size`, bounds = `(offset, size)`
fn scale_and_offset(mesh: &mut MeshData, size: Vec3, offset: Vec3) {
    let origin = -0.5 * size + offset;
    for v in &mut mesh.vertices {
        *v = origin + *v * size;
    }
    mesh.bounds = Bounds::new(offset, size);
}

/// Sign that turns an outward normal into the normal stored at `vertex`:
/// negative for inside-out meshes and for the mirrored backface half.
fn orientation(mesh: &MeshData, vertex: usize, forward_facing: bool) -> f32 {
    let facing = if forward_facing { 1.0 } else { -1.0 };
    if vertex < mesh.front_vertex_count() {
        facing
    } else {
        -facing
    }
}
