//! Single source of truth for shared constants.
//! Bit layouts for both voxel encodings and the default chunk shape.

/// Default chunk width (x axis) in voxels.
pub const DEFAULT_CHUNK_WIDTH: u32 = 16;

/// Default chunk height (y axis) in voxels.
pub const DEFAULT_CHUNK_HEIGHT: u32 = 32;

/// Default chunk depth (z axis) in voxels.
pub const DEFAULT_CHUNK_DEPTH: u32 = 16;

/// Smallest LRU capacity that keeps a full 3x3x3 chunk neighbourhood resident.
pub const MIN_RECOMMENDED_CHUNK_CAPACITY: usize = 27;

// --- 32-bit block word ---
//   [0:7]   corner mask
//   [8:19]  block type (12 bits)
//   [20:27] decoration (8 bits)
//   [28:30] unused
//   [31]    active

/// Bit position of the active flag.
pub const ACTIVE_SHIFT: u32 = 31;
/// Mask of the active flag in place.
pub const ACTIVE_MASK: u32 = 1 << ACTIVE_SHIFT;

/// Bit offset of the block type field.
pub const BLOCK_TYPE_SHIFT: u32 = 8;
/// Width mask of the block type field (12 bits, 0..=4095).
pub const BLOCK_TYPE_BITS: u32 = 0x0FFF;
/// Mask of the block type field in place.
pub const BLOCK_TYPE_MASK: u32 = BLOCK_TYPE_BITS << BLOCK_TYPE_SHIFT;

/// Bit offset of the decoration field.
pub const DECORATION_SHIFT: u32 = 20;
/// Width mask of the decoration field (8 bits).
pub const DECORATION_BITS: u32 = 0xFF;
/// Mask of the decoration field in place.
pub const DECORATION_MASK: u32 = DECORATION_BITS << DECORATION_SHIFT;

/// Bit offset of the corner mask.
pub const CORNER_SHIFT: u32 = 0;
/// Width mask of the corner field (one bit per cube corner).
pub const CORNER_BITS: u32 = 0xFF;
/// Mask of the corner field in place.
pub const CORNER_MASK: u32 = CORNER_BITS << CORNER_SHIFT;

/// Number of cube corners tracked per voxel.
pub const CORNER_COUNT: u8 = 8;

/// Largest storable block type.
pub const MAX_BLOCK_TYPE: u16 = BLOCK_TYPE_BITS as u16;

// --- 44-bit colour word (stored in a u64) ---
//   [0:3]   active nibble (non-zero = active)
//   [4:11]  corner mask
//   [12:19] alpha
//   [20:27] blue
//   [28:35] green
//   [36:43] red

pub const COLOR_ACTIVE_MASK: u64 = 0xF;
pub const COLOR_CORNER_SHIFT: u32 = 4;
pub const COLOR_ALPHA_SHIFT: u32 = 12;
pub const COLOR_BLUE_SHIFT: u32 = 20;
pub const COLOR_GREEN_SHIFT: u32 = 28;
pub const COLOR_RED_SHIFT: u32 = 36;

/// Every bit a colour word may carry.
pub const COLOR_WORD_MASK: u64 = 0xFFF_FFFF_FFFF;
