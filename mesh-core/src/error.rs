//! Request validation errors

use thiserror::Error;

use crate::request::MAX_RESOLUTION;

/// Argument-range failure raised before any geometry is built.
///
/// Generation is deterministic, so a request that fails validation will
/// fail again until its inputs change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("resolution must be in 1..={MAX_RESOLUTION}, got {0}")]
    ResolutionOutOfRange(u32),

    #[error("size must be finite and positive on used axes, zero otherwise, got {0:?}")]
    InvalidSize([f32; 3]),

    #[error("roundness must be in 0.0..=1.0, got {0}")]
    RoundnessOutOfRange(f32),

    #[error("offset must be finite, got {0:?}")]
    NonFiniteOffset([f32; 3]),
}
