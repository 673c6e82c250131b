//! Radial ripple around the local Y axis

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{DEBUG_SEGMENTS, MeshModifier, ModifierFrame, WaveProfile};

/// Displaces `y` by the wave evaluated at the vertex's XZ distance from the
/// frame origin. Distances are clamped to `[inner_radius, outer_radius]`,
/// so the surface is flat inside the inner ring and outside the outer ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleModifier {
    #[serde(flatten)]
    pub wave: WaveProfile,
    #[serde(default)]
    pub inner_radius: f32,
    #[serde(default = "default_outer_radius")]
    pub outer_radius: f32,
    #[serde(default)]
    pub frame: ModifierFrame,
}

fn default_outer_radius() -> f32 {
    1.0
}

impl Default for RippleModifier {
    fn default() -> Self {
        Self {
            wave: WaveProfile::default(),
            inner_radius: 0.0,
            outer_radius: default_outer_radius(),
            frame: ModifierFrame::default(),
        }
    }
}

impl RippleModifier {
    pub fn new(wave: WaveProfile, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            wave,
            inner_radius,
            outer_radius,
            frame: ModifierFrame::default(),
        }
        .sanitized()
    }

    /// Degenerate scale components are clamped so the frame stays invertible
    pub fn with_frame(mut self, frame: ModifierFrame) -> Self {
        self.frame = frame.sanitized();
        self
    }

    /// Clamp radii to be non-negative with `inner <= outer`
    pub fn sanitized(mut self) -> Self {
        self.outer_radius = self.outer_radius.max(0.0);
        let inner = self.inner_radius.clamp(0.0, self.outer_radius);
        if inner != self.inner_radius {
            warn!(
                "Ripple inner radius {} clamped to {} (outer radius {})",
                self.inner_radius, inner, self.outer_radius
            );
            self.inner_radius = inner;
        }
        self
    }

    /// Clamped radial distance of a local point
    pub fn ring_distance(&self, local: Vec3) -> f32 {
        Vec2::new(local.x, local.z)
            .length()
            .max(self.inner_radius)
            .min(self.outer_radius)
    }
}

impl MeshModifier for RippleModifier {
    fn name(&self) -> &str {
        "ripple"
    }

    fn frame(&self) -> &ModifierFrame {
        &self.frame
    }

    fn height_at(&self, local: Vec3, time: f32) -> f32 {
        self.wave.sample(self.ring_distance(local), time)
    }

    /// Radial profile from the inner to the outer ring along local +X
    fn debug_polyline(&self, time: f32) -> Vec<Vec3> {
        let to_mesh = self.frame.to_mesh();
        let step = (self.outer_radius - self.inner_radius) / DEBUG_SEGMENTS as f32;

        (0..=DEBUG_SEGMENTS)
            .map(|i| {
                let x = self.inner_radius + i as f32 * step;
                to_mesh.transform_point3(Vec3::new(x, self.wave.sample(x, time), 0.0))
            })
            .collect()
    }
}
