pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;
pub mod voxel;

pub use codec::{BlockCodec, BlockFields, ColorCodec, ColorFields, VoxelCodec};
pub use config::WorldConfig;
pub use error::VoxbagError;
pub use types::{ChunkCoord, ChunkDims, Corner, LocalCoord, Rgba, Voxel, WorldCoord};
