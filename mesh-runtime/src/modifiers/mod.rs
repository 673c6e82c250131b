//! Vertex modifiers
//!
//! A modifier displaces every vertex along the Y axis of its own frame,
//! then the mesh bounds and normals are recomputed from the new positions.
//!
//! # Example
//! ```
//! use glam::Vec2;
//! use procmesh_core::{MeshRequest, Plane, create_mesh};
//! use procmesh_runtime::modifiers::{MeshModifier, SineModifier, WaveProfile};
//!
//! let mut mesh = create_mesh(&MeshRequest::plane("water", 16, Vec2::ONE, Plane::Xz))?;
//! let wave = SineModifier::new(WaveProfile { amplitude: 0.1, ..WaveProfile::default() });
//! wave.modify(&mut mesh, 0.5);
//! # Ok::<(), procmesh_core::MeshError>(())
//! ```

mod ripple;
mod sine;

use std::f32::consts::TAU;

use glam::{Affine3A, EulerRot, Quat, Vec3};
use procmesh_core::MeshData;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::recalculate::{recalculate_bounds, recalculate_normals};

pub use ripple::RippleModifier;
pub use sine::SineModifier;

/// Sample count of debug polylines
pub const DEBUG_SEGMENTS: usize = 64;

/// Smallest frame scale magnitude; the frame must stay invertible
pub const MIN_FRAME_SCALE: f32 = 1e-4;

/// `amplitude * sin(2π * frequency * (argument + time)) * exp(-falloff * |argument|)`
pub fn falloff_sin_2pi(amplitude: f32, frequency: f32, falloff: f32, argument: f32, time: f32) -> f32 {
    let wave = amplitude * (TAU * frequency * (argument + time)).sin();
    wave * (-falloff * argument.abs()).exp()
}

/// Damped sine shared by all modifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveProfile {
    pub amplitude: f32,
    /// Waves per unit of distance
    pub frequency: f32,
    /// Exponential decay away from the frame origin
    pub falloff: f32,
    /// Phase speed; the wave is shifted by `speed * time`
    pub speed: f32,
}

impl Default for WaveProfile {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency: 1.0,
            falloff: 0.0,
            speed: 0.0,
        }
    }
}

impl WaveProfile {
    /// Height of the wave at `argument` after `time` seconds
    pub fn sample(&self, argument: f32, time: f32) -> f32 {
        falloff_sin_2pi(
            self.amplitude,
            self.frequency,
            self.falloff,
            argument,
            self.speed * time,
        )
    }
}

/// Placement of a modifier inside mesh space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierFrame {
    pub translation: Vec3,
    /// Euler angles in degrees, applied Y, X, then Z
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl Default for ModifierFrame {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl ModifierFrame {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Replace degenerate scale components with `±MIN_FRAME_SCALE`
    pub fn sanitized(mut self) -> Self {
        let scale = self.scale.to_array().map(|s| {
            if !s.is_finite() {
                1.0
            } else if s.abs() < MIN_FRAME_SCALE {
                MIN_FRAME_SCALE.copysign(s)
            } else {
                s
            }
        });
        let scale = Vec3::from_array(scale);
        if scale != self.scale {
            warn!("Modifier frame scale {} clamped to {}", self.scale, scale);
            self.scale = scale;
        }
        self
    }

    /// Modifier space -> mesh space
    pub fn to_mesh(&self) -> Affine3A {
        let r = self.rotation_degrees;
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            r.y.to_radians(),
            r.x.to_radians(),
            r.z.to_radians(),
        );
        Affine3A::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }

    /// Mesh space -> modifier space
    pub fn to_local(&self) -> Affine3A {
        self.to_mesh().inverse()
    }
}

/// A vertex displacement evaluated in the modifier's local frame.
///
/// Implementors provide the height function; [`MeshModifier::modify`]
/// handles the frame change, the parallel displacement and the recompute of
/// bounds and normals.
pub trait MeshModifier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn frame(&self) -> &ModifierFrame;

    /// Y offset for a vertex at `local` (modifier space)
    fn height_at(&self, local: Vec3, time: f32) -> f32;

    /// Wave profile sampled in modifier space and mapped to mesh space, for
    /// debug drawing
    fn debug_polyline(&self, time: f32) -> Vec<Vec3>;

    /// Displace the mesh in place and refresh its bounds and normals
    fn modify(&self, mesh: &mut MeshData, time: f32) {
        let to_mesh = self.frame().to_mesh();
        let to_local = to_mesh.inverse();

        mesh.vertices.par_iter_mut().for_each(|vertex| {
            let mut local = to_local.transform_point3(*vertex);
            local.y += self.height_at(local, time);
            *vertex = to_mesh.transform_point3(local);
        });

        recalculate_bounds(mesh);
        recalculate_normals(mesh);
    }
}

/// Serializable modifier description, as found in manifests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModifierSettings {
    Sine(SineModifier),
    Ripple(RippleModifier),
}

impl ModifierSettings {
    pub fn into_modifier(self) -> Box<dyn MeshModifier> {
        match self {
            ModifierSettings::Sine(sine) => {
                let frame = sine.frame;
                Box::new(sine.with_frame(frame))
            }
            ModifierSettings::Ripple(ripple) => {
                let frame = ripple.frame;
                Box::new(ripple.with_frame(frame).sanitized())
            }
        }
    }
}
