//! Bit packing for the canonical 32-bit voxel word.
//!
//! Bit layout:
//!   [0:7]   corner mask, one bit per `Corner`
//!   [8:19]  block type (12 bits)
//!   [20:27] decoration (8 bits)
//!   [28:30] unused, preserved by every setter
//!   [31]    active flag
//!
//! The word is unsigned, so an active voxel compares and prints as a large
//! positive number. Values wider than their field are masked, never rejected.

use crate::constants::*;
use crate::types::Voxel;

/// Whether the active bit is set.
#[inline]
pub fn get_active(word: Voxel) -> bool {
    word & ACTIVE_MASK != 0
}

/// Set or clear the active bit.
#[inline]
pub fn set_active(word: Voxel, active: bool) -> Voxel {
    (word & !ACTIVE_MASK) | ((active as u32) << ACTIVE_SHIFT)
}

/// 12-bit block type.
#[inline]
pub fn get_block_type(word: Voxel) -> u16 {
    ((word >> BLOCK_TYPE_SHIFT) & BLOCK_TYPE_BITS) as u16
}

/// Store `value` (masked to 12 bits) in the block type field.
#[inline]
pub fn set_block_type(word: Voxel, value: u16) -> Voxel {
    (word & !BLOCK_TYPE_MASK) | ((value as u32 & BLOCK_TYPE_BITS) << BLOCK_TYPE_SHIFT)
}

/// 8-bit decoration overlay.
#[inline]
pub fn get_decoration(word: Voxel) -> u8 {
    ((word >> DECORATION_SHIFT) & DECORATION_BITS) as u8
}

/// Store the decoration overlay.
#[inline]
pub fn set_decoration(word: Voxel, value: u8) -> Voxel {
    (word & !DECORATION_MASK) | ((value as u32) << DECORATION_SHIFT)
}

/// All eight corner bits as one byte.
#[inline]
pub fn get_corner(word: Voxel) -> u8 {
    ((word >> CORNER_SHIFT) & CORNER_BITS) as u8
}

/// Replace all eight corner bits.
#[inline]
pub fn set_corner(word: Voxel, mask: u8) -> Voxel {
    (word & !CORNER_MASK) | ((mask as u32) << CORNER_SHIFT)
}

/// State of one corner. Positions outside 0..8 read as `false`.
#[inline]
pub fn get_corner_bit(word: Voxel, position: u8) -> bool {
    position < CORNER_COUNT && (get_corner(word) >> position) & 1 != 0
}

/// Set or clear one corner. Positions outside 0..8 leave the word unchanged.
#[inline]
pub fn set_corner_bit(word: Voxel, position: u8, raised: bool) -> Voxel {
    if position >= CORNER_COUNT {
        return word;
    }
    let bit = 1u8 << position;
    let corners = get_corner(word);
    set_corner(word, if raised { corners | bit } else { corners & !bit })
}

/// Pack every field into a fresh word.
pub fn pack(active: bool, block_type: u16, decoration: u8, corner: u8) -> Voxel {
    let word = set_active(0, active);
    let word = set_block_type(word, block_type);
    let word = set_decoration(word, decoration);
    set_corner(word, corner)
}

/// Unpack every field: (active, block_type, decoration, corner).
pub fn unpack(word: Voxel) -> (bool, u16, u8, u8) {
    (
        get_active(word),
        get_block_type(word),
        get_decoration(word),
        get_corner(word),
    )
}
