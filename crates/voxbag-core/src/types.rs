use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHUNK_DEPTH, DEFAULT_CHUNK_HEIGHT, DEFAULT_CHUNK_WIDTH};
use crate::error::VoxbagError;

/// Canonical 32-bit voxel word (see `voxel` for the bit layout).
pub type Voxel = u32;

/// Chunk coordinate in chunk-space (each unit = one chunk extent per axis).
pub type ChunkCoord = IVec3;

/// World coordinate in voxel-space.
pub type WorldCoord = IVec3;

/// Voxel position inside its owning chunk, `[0, size)` per axis when valid.
pub type LocalCoord = IVec3;

/// Validated per-axis chunk extent.
///
/// Construction guarantees every axis is positive and that
/// `width * height * depth` fits in both `usize` and `i32` arithmetic, so
/// flat indexing never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkDims {
    width: u32,
    height: u32,
    depth: u32,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHUNK_WIDTH,
            height: DEFAULT_CHUNK_HEIGHT,
            depth: DEFAULT_CHUNK_DEPTH,
        }
    }
}

impl ChunkDims {
    /// Validate an extent: every axis in `1..=i32::MAX` and the volume within `usize`.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self, VoxbagError> {
        let invalid = VoxbagError::InvalidDimensions {
            width,
            height,
            depth,
        };
        if width == 0 || height == 0 || depth == 0 {
            return Err(invalid);
        }
        // Axes are used as i32 divisors, and the volume indexes a Vec.
        if width > i32::MAX as u32 || height > i32::MAX as u32 || depth > i32::MAX as u32 {
            return Err(invalid);
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(depth as usize))
            .ok_or(invalid)?;
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Cubic chunk with the same extent on every axis.
    pub fn cube(size: u32) -> Result<Self, VoxbagError> {
        Self::new(size, size, size)
    }

    /// Extent along x.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Extent along y.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Extent along z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Extent as a signed vector, for coordinate arithmetic.
    pub fn as_ivec3(&self) -> IVec3 {
        IVec3::new(self.width as i32, self.height as i32, self.depth as i32)
    }

    /// Number of voxels in one chunk.
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Whether `local` lies inside `[0, width) x [0, height) x [0, depth)`.
    pub fn contains(&self, local: LocalCoord) -> bool {
        local.x >= 0
            && local.y >= 0
            && local.z >= 0
            && (local.x as u32) < self.width
            && (local.y as u32) < self.height
            && (local.z as u32) < self.depth
    }

    /// Flat index `x + width * (y + height * z)`; x varies fastest, then y, then z.
    /// Returns None for coordinates outside the chunk.
    pub fn flat_index(&self, local: LocalCoord) -> Option<usize> {
        if !self.contains(local) {
            return None;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        Some(local.x as usize + w * (local.y as usize + h * local.z as usize))
    }

    /// Inverse of `flat_index`.
    pub fn local_from_index(&self, index: usize) -> Option<LocalCoord> {
        if index >= self.volume() {
            return None;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let x = index % w;
        let y = (index / w) % h;
        let z = index / (w * h);
        Some(IVec3::new(x as i32, y as i32, z as i32))
    }
}

/// One of the eight cube corners of a voxel, in corner-mask bit order.
///
/// ```text
///        TBL-------TBR
///       / |       / |
///     TFL-------TFR |
///     |  BBL----|--BBR
///     | /       | /
///    BFL-------BFR
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Corner {
    TopFrontLeft = 0,
    TopFrontRight = 1,
    TopBackLeft = 2,
    TopBackRight = 3,
    BottomFrontLeft = 4,
    BottomFrontRight = 5,
    BottomBackLeft = 6,
    BottomBackRight = 7,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::TopFrontLeft,
        Corner::TopFrontRight,
        Corner::TopBackLeft,
        Corner::TopBackRight,
        Corner::BottomFrontLeft,
        Corner::BottomFrontRight,
        Corner::BottomBackLeft,
        Corner::BottomBackRight,
    ];

    /// Bit position of this corner inside the corner mask.
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Corner for bit position `bit`, or None above 7.
    pub fn from_bit(bit: u8) -> Option<Corner> {
        Self::ALL.get(bit as usize).copied()
    }

    /// Whether the corner lies on the upper face.
    pub fn is_top(self) -> bool {
        self.bit() < 4
    }
}

/// Colour channels of the colour voxel encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
