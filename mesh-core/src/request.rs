//! Mesh generation requests

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::axis::Plane;
use crate::error::MeshError;
use crate::types::MeshData;

/// Highest accepted resolution (quads per face edge)
pub const MAX_RESOLUTION: u32 = 256;

/// Hook run on the finished mesh, after scale/offset
pub type PostProcess = fn(&mut MeshData);

/// Shape to build, with its shape-specific parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ShapeKind {
    /// Flat grid on one of the principal planes
    Plane {
        #[serde(default = "default_plane_axis")]
        axis: Plane,
    },
    /// Six-face box, optionally with rounded edges (roundness 0..=1)
    Cube {
        #[serde(default)]
        roundness: f32,
    },
    /// Cube lattice projected onto the unit sphere
    Sphere,
}

fn default_plane_axis() -> Plane {
    Plane::Xz
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Plane { .. } => "plane",
            ShapeKind::Cube { .. } => "cube",
            ShapeKind::Sphere => "sphere",
        }
    }
}

/// Immutable description of one mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRequest {
    pub name: String,
    #[serde(flatten)]
    pub shape: ShapeKind,
    /// Quads per face edge
    pub resolution: u32,
    /// Extent per axis; planes use X and Y of the virtual plane
    pub size: Vec3,
    #[serde(default)]
    pub offset: Vec3,
    #[serde(default = "default_true")]
    pub forward_facing: bool,
    #[serde(default = "default_true")]
    pub backface_culling: bool,
    #[serde(skip)]
    pub post_process: Option<PostProcess>,
}

fn default_true() -> bool {
    true
}

impl MeshRequest {
    pub fn new(name: impl Into<String>, shape: ShapeKind, resolution: u32, size: Vec3) -> Self {
        Self {
            name: name.into(),
            shape,
            resolution,
            size,
            offset: Vec3::ZERO,
            forward_facing: true,
            backface_culling: true,
            post_process: None,
        }
    }

    /// Plane request; `size` is measured on the plane itself
    pub fn plane(name: impl Into<String>, resolution: u32, size: Vec2, axis: Plane) -> Self {
        Self::new(
            name,
            ShapeKind::Plane { axis },
            resolution,
            Plane::VIRTUAL.extent(size.x, size.y),
        )
    }

    pub fn cube(name: impl Into<String>, resolution: u32, size: Vec3, roundness: f32) -> Self {
        Self::new(name, ShapeKind::Cube { roundness }, resolution, size)
    }

    pub fn sphere(name: impl Into<String>, resolution: u32, size: Vec3) -> Self {
        Self::new(name, ShapeKind::Sphere, resolution, size)
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_forward_facing(mut self, forward_facing: bool) -> Self {
        self.forward_facing = forward_facing;
        self
    }

    pub fn with_backface_culling(mut self, backface_culling: bool) -> Self {
        self.backface_culling = backface_culling;
        self
    }

    pub fn with_post_process(mut self, post_process: PostProcess) -> Self {
        self.post_process = Some(post_process);
        self
    }

    /// Check argument ranges before any geometry is built
    pub fn validate(&self) -> Result<(), MeshError> {
        if !(1..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(MeshError::ResolutionOutOfRange(self.resolution));
        }

        let used = match self.shape {
            ShapeKind::Plane { .. } => [true, true, false],
            ShapeKind::Cube { .. } | ShapeKind::Sphere => [true, true, true],
        };
        // A plane has no thickness; its third component must stay zero
        let size = self.size.to_array();
        let size_ok = size
            .iter()
            .zip(used)
            .all(|(&s, used)| s.is_finite() && if used { s > 0.0 } else { s == 0.0 });
        if !size_ok {
            return Err(MeshError::InvalidSize(size));
        }

        if !self.offset.is_finite() {
            return Err(MeshError::NonFiniteOffset(self.offset.to_array()));
        }

        if let ShapeKind::Cube { roundness } = self.shape
            && !(0.0..=1.0).contains(&roundness)
        {
            return Err(MeshError::RoundnessOutOfRange(roundness));
        }

        Ok(())
    }
}
