use crate::types::{ChunkCoord, ChunkDims, LocalCoord, WorldCoord};
use glam::IVec3;

/// Floor division for a positive divisor: rounds toward negative infinity.
#[inline]
pub fn floor_div(a: i32, b: i32) -> i32 {
    debug_assert!(b > 0, "chunk extents are always positive");
    a.div_euclid(b)
}

/// Floor modulo for a positive divisor: always in `[0, b)`.
#[inline]
pub fn floor_mod(a: i32, b: i32) -> i32 {
    debug_assert!(b > 0, "chunk extents are always positive");
    a.rem_euclid(b)
}

/// Convert a world-space voxel coordinate to its containing chunk coordinate.
pub fn world_to_chunk(world: WorldCoord, dims: ChunkDims) -> ChunkCoord {
    let size = dims.as_ivec3();
    IVec3::new(
        floor_div(world.x, size.x),
        floor_div(world.y, size.y),
        floor_div(world.z, size.z),
    )
}

/// Convert a world-space voxel coordinate to its local offset within a chunk.
pub fn world_to_local(world: WorldCoord, dims: ChunkDims) -> LocalCoord {
    let size = dims.as_ivec3();
    IVec3::new(
        floor_mod(world.x, size.x),
        floor_mod(world.y, size.y),
        floor_mod(world.z, size.z),
    )
}

/// Both halves of the translation at once.
#[inline]
pub fn split_world(world: WorldCoord, dims: ChunkDims) -> (ChunkCoord, LocalCoord) {
    (world_to_chunk(world, dims), world_to_local(world, dims))
}

/// World-space position of a chunk's local origin.
/// Wraps at the extreme edges of the i32 range instead of overflowing.
pub fn chunk_origin(chunk: ChunkCoord, dims: ChunkDims) -> WorldCoord {
    let size = dims.as_ivec3();
    IVec3::new(
        chunk.x.wrapping_mul(size.x),
        chunk.y.wrapping_mul(size.y),
        chunk.z.wrapping_mul(size.z),
    )
}

/// Convert a chunk coordinate and local offset back to world-space.
pub fn chunk_local_to_world(chunk: ChunkCoord, local: LocalCoord, dims: ChunkDims) -> WorldCoord {
    let origin = chunk_origin(chunk, dims);
    IVec3::new(
        origin.x.wrapping_add(local.x),
        origin.y.wrapping_add(local.y),
        origin.z.wrapping_add(local.z),
    )
}

/// Flat index of `local` inside a chunk of `dims`, or None when out of bounds.
#[inline]
pub fn flat_index(local: LocalCoord, dims: ChunkDims) -> Option<usize> {
    dims.flat_index(local)
}
