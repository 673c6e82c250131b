//! Collision shapes derived from the generated mesh

use glam::Vec3;
use procmesh_core::MeshData;
use serde::{Deserialize, Serialize};

/// Which collider the host keeps in sync with the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColliderKind {
    #[default]
    None,
    Bounds,
    Mesh,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    /// Axis-aligned box matching the mesh bounds
    Box { center: Vec3, size: Vec3 },
    /// Triangle soup copied from the final buffers
    Mesh { positions: Vec<Vec3>, indices: Vec<u32> },
}

impl Collider {
    /// Build the collider of the requested kind, or `None` for [`ColliderKind::None`]
    pub fn from_mesh(kind: ColliderKind, mesh: &MeshData) -> Option<Self> {
        match kind {
            ColliderKind::None => None,
            ColliderKind::Bounds => Some(Collider::Box {
                center: mesh.bounds.center,
                size: mesh.bounds.size,
            }),
            ColliderKind::Mesh => Some(Collider::Mesh {
                positions: mesh.vertices.clone(),
                indices: mesh.triangles.clone(),
            }),
        }
    }

    pub fn kind(&self) -> ColliderKind {
        match self {
            Collider::Box { .. } => ColliderKind::Bounds,
            Collider::Mesh { .. } => ColliderKind::Mesh,
        }
    }
}
