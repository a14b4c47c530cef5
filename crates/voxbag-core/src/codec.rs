//! Voxel encodings behind a common strategy trait.
//!
//! Chunks and worlds are generic over a `VoxelCodec`, so the word layout is
//! picked once (by type) when a world is built. `BlockCodec` is the default
//! 32-bit block/decoration layout; `ColorCodec` is the 44-bit RGBA layout.

use std::fmt::Debug;
use std::hash::Hash;

use crate::constants::*;
use crate::types::{Corner, Rgba, Voxel};
use crate::voxel;

/// Fields shared by every encoding: occupancy and the corner mask.
pub trait VoxelCodec: Copy + Default + Debug + 'static {
    /// Storage word. A zeroed word is an inactive voxel with all fields 0.
    type Word: bytemuck::Pod + Default + Eq + Hash + Debug + Send + Sync;

    /// Short name for logs and reports.
    const NAME: &'static str;

    fn is_active(word: Self::Word) -> bool;
    fn with_active(word: Self::Word, active: bool) -> Self::Word;

    fn corners(word: Self::Word) -> u8;
    fn with_corners(word: Self::Word, mask: u8) -> Self::Word;

    fn corner(word: Self::Word, corner: Corner) -> bool {
        Self::corners(word) & (1 << corner.bit()) != 0
    }

    fn with_corner(word: Self::Word, corner: Corner, raised: bool) -> Self::Word {
        let bit = 1u8 << corner.bit();
        let mask = Self::corners(word);
        Self::with_corners(word, if raised { mask | bit } else { mask & !bit })
    }
}

/// Encodings that carry a material id and a decoration overlay.
pub trait BlockFields: VoxelCodec {
    fn block_type(word: Self::Word) -> u16;
    fn with_block_type(word: Self::Word, value: u16) -> Self::Word;

    fn decoration(word: Self::Word) -> u8;
    fn with_decoration(word: Self::Word, value: u8) -> Self::Word;
}

/// Encodings that carry colour channels.
pub trait ColorFields: VoxelCodec {
    fn rgba(word: Self::Word) -> Rgba;
    fn with_rgba(word: Self::Word, color: Rgba) -> Self::Word;
}

/// 32-bit active/block type/decoration/corner layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockCodec;

impl VoxelCodec for BlockCodec {
    type Word = Voxel;
    const NAME: &'static str = "block32";

    #[inline]
    fn is_active(word: Voxel) -> bool {
        voxel::get_active(word)
    }

    #[inline]
    fn with_active(word: Voxel, active: bool) -> Voxel {
        voxel::set_active(word, active)
    }

    #[inline]
    fn corners(word: Voxel) -> u8 {
        voxel::get_corner(word)
    }

    #[inline]
    fn with_corners(word: Voxel, mask: u8) -> Voxel {
        voxel::set_corner(word, mask)
    }
}

impl BlockFields for BlockCodec {
    #[inline]
    fn block_type(word: Voxel) -> u16 {
        voxel::get_block_type(word)
    }

    #[inline]
    fn with_block_type(word: Voxel, value: u16) -> Voxel {
        voxel::set_block_type(word, value)
    }

    #[inline]
    fn decoration(word: Voxel) -> u8 {
        voxel::get_decoration(word)
    }

    #[inline]
    fn with_decoration(word: Voxel, value: u8) -> Voxel {
        voxel::set_decoration(word, value)
    }
}

/// 44-bit colour layout held in a `u64`; bits 44..63 stay zero.
///
/// The active state is a nibble: any non-zero value reads as active, and
/// writes store exactly 1 or 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCodec;

impl ColorCodec {
    #[inline]
    fn channel(word: u64, shift: u32) -> u8 {
        ((word >> shift) & 0xFF) as u8
    }

    #[inline]
    fn with_channel(word: u64, shift: u32, value: u8) -> u64 {
        (word & !(0xFFu64 << shift)) | ((value as u64) << shift)
    }

    /// Red channel.
    pub fn red(word: u64) -> u8 {
        Self::channel(word, COLOR_RED_SHIFT)
    }

    /// Green channel.
    pub fn green(word: u64) -> u8 {
        Self::channel(word, COLOR_GREEN_SHIFT)
    }

    /// Blue channel.
    pub fn blue(word: u64) -> u8 {
        Self::channel(word, COLOR_BLUE_SHIFT)
    }

    /// Alpha channel.
    pub fn alpha(word: u64) -> u8 {
        Self::channel(word, COLOR_ALPHA_SHIFT)
    }

    /// Word with the red channel replaced.
    pub fn with_red(word: u64, value: u8) -> u64 {
        Self::with_channel(word, COLOR_RED_SHIFT, value)
    }

    /// Word with the green channel replaced.
    pub fn with_green(word: u64, value: u8) -> u64 {
        Self::with_channel(word, COLOR_GREEN_SHIFT, value)
    }

    /// Word with the blue channel replaced.
    pub fn with_blue(word: u64, value: u8) -> u64 {
        Self::with_channel(word, COLOR_BLUE_SHIFT, value)
    }

    /// Word with the alpha channel replaced.
    pub fn with_alpha(word: u64, value: u8) -> u64 {
        Self::with_channel(word, COLOR_ALPHA_SHIFT, value)
    }
}

impl VoxelCodec for ColorCodec {
    type Word = u64;
    const NAME: &'static str = "rgba44";

    #[inline]
    fn is_active(word: u64) -> bool {
        word & COLOR_ACTIVE_MASK != 0
    }

    #[inline]
    fn with_active(word: u64, active: bool) -> u64 {
        (word & !COLOR_ACTIVE_MASK) | active as u64
    }

    #[inline]
    fn corners(word: u64) -> u8 {
        Self::channel(word, COLOR_CORNER_SHIFT)
    }

    #[inline]
    fn with_corners(word: u64, mask: u8) -> u64 {
        Self::with_channel(word, COLOR_CORNER_SHIFT, mask)
    }
}

impl ColorFields for ColorCodec {
    fn rgba(word: u64) -> Rgba {
        Rgba::new(
            Self::red(word),
            Self::green(word),
            Self::blue(word),
            Self::alpha(word),
        )
    }

    fn with_rgba(word: u64, color: Rgba) -> u64 {
        let word = Self::with_red(word, color.r);
        let word = Self::with_green(word, color.g);
        let word = Self::with_blue(word, color.b);
        Self::with_alpha(word, color.a)
    }
}
