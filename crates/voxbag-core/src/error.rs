use thiserror::Error;

/// Errors raised while building chunks, indices and worlds.
///
/// Voxel reads and writes never produce these; out-of-range access is
/// reported through `Option`/`bool` returns instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoxbagError {
    #[error("invalid chunk dimensions {width}x{height}x{depth}: every axis must be positive and the volume must fit in memory")]
    InvalidDimensions { width: u32, height: u32, depth: u32 },

    #[error("failed to parse world config RON: {0}")]
    ConfigParse(String),

    #[error("failed to serialize world config RON: {0}")]
    ConfigSerialize(String),

    #[error("chunk index capacity must be at least 1")]
    ZeroCapacity,

    #[error("invalid generator parameters: {0}")]
    InvalidGenerator(String),
}
