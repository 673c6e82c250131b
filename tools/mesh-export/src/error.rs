//! Export failures that callers may want to match on

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("mesh asset truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("mesh asset has {0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: u32 },

    #[error("OBJ export needs quad-ordered triangles (multiple of 6 indices), got {0}")]
    NotQuads(usize),
}
