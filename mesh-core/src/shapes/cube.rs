//! Cube creator
//!
//! Raw lattice layout: `raw = z * edge² + x * edge + y`. The dense
//! `(resolution + 1)³` lattice loses its `(resolution - 1)³` interior points;
//! every surviving point owns one slot per face it lies on.

use glam::Vec3;

use super::{orientation, scale_and_offset, tessellate};
use crate::axis::Plane;
use crate::request::MeshRequest;
use crate::triangulation::{FaceDescriptor, FaceLattice, FaceUv, TraversalOrder};
use crate::types::MeshData;
use crate::vertices::Lattice;

#[derive(Debug, Clone, Copy)]
pub struct CubeLattice {
    resolution: usize,
    edge: usize,
    quad: usize,
}

impl CubeLattice {
    pub fn new(resolution: usize) -> Self {
        let edge = resolution + 1;
        Self {
            resolution,
            edge,
            quad: edge * edge,
        }
    }

    /// Integer lattice coordinates `[x, y, z]` of a raw index
    pub fn coords(&self, raw: usize) -> [usize; 3] {
        [(raw / self.edge) % self.edge, raw % self.edge, raw / self.quad]
    }

    fn is_boundary(&self, c: usize) -> bool {
        c == 0 || c == self.resolution
    }
}

impl Lattice for CubeLattice {
    fn group_count(&self) -> usize {
        self.quad * self.edge - self.excluded_count()
    }

    fn excluded_count(&self) -> usize {
        (self.resolution - 1).pow(3)
    }

    fn position(&self, raw: usize) -> Vec3 {
        let [x, y, z] = self.coords(raw);
        Vec3::new(x as f32, y as f32, z as f32) / self.resolution as f32
    }

    fn is_excluded(&self, raw: usize) -> bool {
        self.coords(raw).iter().all(|&c| !self.is_boundary(c))
    }

    fn group_size(&self, raw: usize) -> usize {
        self.coords(raw)
            .iter()
            .filter(|&&c| self.is_boundary(c))
            .count()
    }
}

/// Face table of the cube, front/back pairs per plane.
///
/// Triangle-space rows and columns per pair: XY faces walk x by y, XZ faces
/// z by x, YZ faces z by y.
pub fn cube_faces(resolution: usize) -> [FaceDescriptor; 6] {
    let r = resolution;
    let edge = r + 1;
    let quad = edge * edge;

    let face = |traversal, lattice, normal, uv, plane: Plane| FaceDescriptor {
        traversal,
        lattice,
        normal,
        uv,
        axis_slot: plane.slot(),
    };
    let uv = |swap, flip_u, flip_v| FaceUv {
        swap,
        flip_u,
        flip_v,
    };

    use TraversalOrder::{Clockwise as Cw, CounterClockwise as Ccw};
    [
        // XY at z = 0
        face(
            Ccw,
            FaceLattice::new(0, edge, 1),
            Vec3::NEG_Z,
            uv(false, false, false),
            Plane::Xy,
        ),
        // XY at z = r
        face(
            Cw,
            FaceLattice::new(r * quad, edge, 1),
            Vec3::Z,
            uv(false, true, false),
            Plane::Xy,
        ),
        // XZ at y = 0
        face(
            Ccw,
            FaceLattice::new(0, quad, edge),
            Vec3::NEG_Y,
            uv(true, false, true),
            Plane::Xz,
        ),
        // XZ at y = r
        face(
            Cw,
            FaceLattice::new(r, quad, edge),
            Vec3::Y,
            uv(true, false, false),
            Plane::Xz,
        ),
        // YZ at x = 0
        face(
            Cw,
            FaceLattice::new(0, quad, 1),
            Vec3::NEG_X,
            uv(false, true, false),
            Plane::Yz,
        ),
        // YZ at x = r
        face(
            Ccw,
            FaceLattice::new(r * edge, quad, 1),
            Vec3::X,
            uv(false, false, false),
            Plane::Yz,
        ),
    ]
}

/// Build a unit cube; `finalize` applies scale/offset and is off when the
/// cube is an intermediate step of another shape.
pub(super) fn create(request: &MeshRequest, roundness: f32, finalize: bool) -> MeshData {
    let resolution = request.resolution as usize;
    let lattice = CubeLattice::new(resolution);
    let faces = cube_faces(resolution);

    let mut mesh = tessellate(request, &lattice, &faces, Some(Plane::Xy.slot()));
    round_edges(&mut mesh, roundness, request.forward_facing);

    if finalize {
        scale_and_offset(&mut mesh, request.size, request.offset);
    }
    mesh
}

/// Pull every vertex onto a box shrunk by `roundness / 2`, then push it back
/// out by the same amount along the clamp direction. Face interiors stay
/// flat; edges and corners become cylinder and sphere patches.
fn round_edges(mesh: &mut MeshData, roundness: f32, forward_facing: bool) {
    if roundness <= 0.0 {
        return;
    }

    let half = 0.5 * roundness;
    let core_min = Vec3::splat(half);
    let core_max = Vec3::splat(1.0 - half);

    for i in 0..mesh.vertices.len() {
        let point = mesh.vertices[i];
        let inner = point.clamp(core_min, core_max);
        let direction = (point - inner).normalize_or_zero();

        mesh.vertices[i] = inner + direction * half;
        mesh.normals[i] = direction * orientation(mesh, i, forward_facing);
    }
}
