//! Principal planes
//!
//! Planes are always tessellated on the virtual XY plane and remapped onto
//! the requested plane afterwards. Cube faces reuse the same enum to pick
//! which slot of a shared vertex group they own.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three principal planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    /// Spanned by X and Y, normal along Z
    #[default]
    Xy,
    /// Spanned by Y and Z, normal along X
    Yz,
    /// Spanned by X and Z, normal along Y
    Xz,
}

impl Plane {
    /// Plane every plane mesh is built on before remapping
    pub const VIRTUAL: Plane = Plane::Xy;

    pub const ALL: [Plane; 3] = [Plane::Xy, Plane::Yz, Plane::Xz];

    /// Vertex-group slot owned by a cube face lying on this plane.
    ///
    /// Corners own three slots, one per plane, in this order. Edges own two
    /// and clamp to the last one; the XY seam with YZ faces is corrected by
    /// the triangulator.
    pub const fn slot(self) -> usize {
        match self {
            Plane::Xz => 0,
            Plane::Yz => 1,
            Plane::Xy => 2,
        }
    }

    /// Map a point from the virtual XY plane onto this plane.
    ///
    /// The virtual Z component is the out-of-plane coordinate. Each mapping is
    /// a proper rotation, so triangle winding relative to the normal survives.
    pub fn from_virtual(self, v: Vec3) -> Vec3 {
        match self {
            Plane::Xy => v,
            Plane::Yz => Vec3::new(v.z, v.x, v.y),
            Plane::Xz => Vec3::new(v.x, -v.z, v.y),
        }
    }

    /// Lift a 2D extent into 3D on this plane
    pub fn extent(self, x: f32, y: f32) -> Vec3 {
        match self {
            Plane::Xy => Vec3::new(x, y, 0.0),
            Plane::Yz => Vec3::new(0.0, x, y),
            Plane::Xz => Vec3::new(x, 0.0, y),
        }
    }
}

impl std::fmt::Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Plane::Xy => "XY",
            Plane::Yz => "YZ",
            Plane::Xz => "XZ",
        };
        f.write_str(name)
    }
}
