//! Travelling sine wave along the local X axis

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{DEBUG_SEGMENTS, MeshModifier, ModifierFrame, WaveProfile};

/// Displaces `y` by the wave evaluated at the vertex's local `x`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SineModifier {
    #[serde(flatten)]
    pub wave: WaveProfile,
    #[serde(default)]
    pub frame: ModifierFrame,
}

impl SineModifier {
    pub fn new(wave: WaveProfile) -> Self {
        Self {
            wave,
            frame: ModifierFrame::default(),
        }
    }

    /// Degenerate scale components are clamped so the frame stays invertible
    pub fn with_frame(mut self, frame: ModifierFrame) -> Self {
        self.frame = frame.sanitized();
        self
    }
}

impl MeshModifier for SineModifier {
    fn name(&self) -> &str {
        "sine"
    }

    fn frame(&self) -> &ModifierFrame {
        &self.frame
    }

    fn height_at(&self, local: Vec3, time: f32) -> f32 {
        self.wave.sample(local.x, time)
    }

    /// One unit of the wave centred on the frame origin
    fn debug_polyline(&self, time: f32) -> Vec<Vec3> {
        let to_mesh = self.frame.to_mesh();
        let step = 1.0 / DEBUG_SEGMENTS as f32;

        (0..DEBUG_SEGMENTS)
            .map(|i| {
                let x = -0.5 + i as f32 * step;
                to_mesh.transform_point3(Vec3::new(x, self.wave.sample(x, time), 0.0))
            })
            .collect()
    }
}
