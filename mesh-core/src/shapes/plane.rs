//! Plane creator

use glam::Vec3;

use super::{scale_and_offset, tessellate};
use crate::axis::Plane;
use crate::request::MeshRequest;
use crate::triangulation::{FaceDescriptor, FaceLattice, FaceUv, TraversalOrder};
use crate::types::{Bounds, MeshData};
use crate::vertices::Lattice;

/// `(resolution + 1)²` grid on the virtual XY plane, `x = i % edge`, `y = i / edge`
#[derive(Debug, Clone, Copy)]
pub struct PlaneLattice {
    resolution: usize,
    edge: usize,
}

impl PlaneLattice {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            edge: resolution + 1,
        }
    }
}

impl Lattice for PlaneLattice {
    fn group_count(&self) -> usize {
        self.edge * self.edge
    }

    fn position(&self, raw: usize) -> Vec3 {
        let step = 1.0 / self.resolution as f32;
        Vec3::new((raw % self.edge) as f32, (raw / self.edge) as f32, 0.0) * step
    }
}

/// The single face of a plane: identity lattice mapping, facing -Z
pub fn plane_face(resolution: usize) -> FaceDescriptor {
    FaceDescriptor {
        traversal: TraversalOrder::Clockwise,
        lattice: FaceLattice::new(0, resolution + 1, 1),
        normal: Vec3::NEG_Z,
        uv: FaceUv {
            swap: true,
            ..FaceUv::default()
        },
        axis_slot: 0,
    }
}

pub(super) fn create(request: &MeshRequest, axis: Plane) -> MeshData {
    let resolution = request.resolution as usize;
    let lattice = PlaneLattice::new(resolution);
    let faces = [plane_face(resolution)];

    let mut mesh = tessellate(request, &lattice, &faces, None);
    scale_and_offset(&mut mesh, request.size, request.offset);
    remap_to(&mut mesh, axis, request.offset, request.size);
    mesh
}

/// Rotate the finished virtual-XY plane onto `axis` around `offset`
fn remap_to(mesh: &mut MeshData, axis: Plane, offset: Vec3, size: Vec3) {
    if axis == Plane::VIRTUAL {
        return;
    }

    for v in &mut mesh.vertices {
        *v = axis.from_virtual(*v - offset) + offset;
    }
    for n in &mut mesh.normals {
        *n = axis.from_virtual(*n);
    }

    mesh.bounds = Bounds::new(offset, axis.extent(size.x, size.y));
}
