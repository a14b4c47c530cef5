use std::marker::PhantomData;

use glam::IVec3;
use voxbag_core::codec::{BlockCodec, BlockFields, ColorFields, VoxelCodec};
use voxbag_core::math::flat_index;
use voxbag_core::types::{ChunkDims, Corner, LocalCoord, Rgba};
use voxbag_core::VoxbagError;

/// Dense block of voxel words stored as one flat array.
///
/// Voxels are laid out x-fastest, then y, then z (`x + width * (y + height * z)`),
/// so scans that iterate x in the inner loop walk memory linearly.
/// Every accessor is bounds-checked: an out-of-range local coordinate yields
/// `None` on reads and `false` on writes, and never mutates the chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<C: VoxelCodec = BlockCodec> {
    dims: ChunkDims,
    voxels: Vec<C::Word>,
    _codec: PhantomData<C>,
}

impl<C: VoxelCodec> Chunk<C> {
    /// Create an all-zero (fully inactive) chunk.
    pub fn new(dims: ChunkDims) -> Self {
        Self::filled(dims, C::Word::default())
    }

    /// Create an all-zero chunk, rejecting zero-sized axes.
    pub fn with_size(width: u32, height: u32, depth: u32) -> Result<Self, VoxbagError> {
        Ok(Self::new(ChunkDims::new(width, height, depth)?))
    }

    /// Create a chunk with every voxel set to `word`.
    pub fn filled(dims: ChunkDims, word: C::Word) -> Self {
        Self {
            dims,
            voxels: vec![word; dims.volume()],
            _codec: PhantomData,
        }
    }

    /// Extent of this chunk.
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// Number of voxels (always `width * height * depth`).
    pub fn volume(&self) -> usize {
        self.voxels.len()
    }

    /// Flat array index of `local`, or None when out of bounds.
    #[inline]
    pub fn index(&self, local: LocalCoord) -> Option<usize> {
        flat_index(local, self.dims)
    }

    /// Word at `local`, or None when out of bounds.
    #[inline]
    pub fn voxel(&self, local: LocalCoord) -> Option<C::Word> {
        self.index(local).map(|i| self.voxels[i])
    }

    /// Store `word` at `local`. Returns false (and changes nothing) when out of bounds.
    #[inline]
    pub fn set_voxel(&mut self, local: LocalCoord, word: C::Word) -> bool {
        match self.index(local) {
            Some(i) => {
                self.voxels[i] = word;
                true
            }
            None => false,
        }
    }

    /// Read-modify-write of one word.
    #[inline]
    pub fn update(&mut self, local: LocalCoord, f: impl FnOnce(C::Word) -> C::Word) -> bool {
        match self.index(local) {
            Some(i) => {
                self.voxels[i] = f(self.voxels[i]);
                true
            }
            None => false,
        }
    }

    /// Occupancy flag at `local`.
    pub fn active(&self, local: LocalCoord) -> Option<bool> {
        self.voxel(local).map(C::is_active)
    }

    /// Set or clear occupancy. Returns false when out of bounds.
    pub fn set_active(&mut self, local: LocalCoord, active: bool) -> bool {
        self.update(local, |w| C::with_active(w, active))
    }

    /// All eight corner bits of the voxel as one byte.
    pub fn corner(&self, local: LocalCoord) -> Option<u8> {
        self.voxel(local).map(C::corners)
    }

    /// Replace all eight corner bits at once.
    pub fn set_corner(&mut self, local: LocalCoord, mask: u8) -> bool {
        self.update(local, |w| C::with_corners(w, mask))
    }

    /// State of a single corner.
    pub fn corner_bit(&self, local: LocalCoord, corner: Corner) -> Option<bool> {
        self.voxel(local).map(|w| C::corner(w, corner))
    }

    /// Raise or lower a single corner.
    pub fn set_corner_bit(&mut self, local: LocalCoord, corner: Corner, raised: bool) -> bool {
        self.update(local, |w| C::with_corner(w, corner, raised))
    }

    /// Overwrite every voxel with `word`.
    pub fn fill(&mut self, word: C::Word) {
        self.voxels.fill(word);
    }

    /// The backing array in flat-index order.
    pub fn voxels(&self) -> &[C::Word] {
        &self.voxels
    }

    /// Raw bytes of the backing array, for uploading to a GPU buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.voxels)
    }

    /// Every voxel with its local coordinate, in flat-index order.
    pub fn iter(&self) -> impl Iterator<Item = (LocalCoord, C::Word)> + '_ {
        let w = self.dims.width() as usize;
        let h = self.dims.height() as usize;
        self.voxels.iter().enumerate().map(move |(i, &word)| {
            let local = IVec3::new((i % w) as i32, ((i / w) % h) as i32, (i / (w * h)) as i32);
            (local, word)
        })
    }

    /// Number of occupied voxels.
    pub fn active_count(&self) -> usize {
        self.voxels.iter().filter(|&&w| C::is_active(w)).count()
    }

    /// Whether any voxel is occupied.
    pub fn has_active(&self) -> bool {
        self.voxels.iter().any(|&w| C::is_active(w))
    }
}

impl<C: BlockFields> Chunk<C> {
    /// Material id at `local`.
    pub fn block_type(&self, local: LocalCoord) -> Option<u16> {
        self.voxel(local).map(C::block_type)
    }

    /// Store the block type, masked to the field width.
    pub fn set_block_type(&mut self, local: LocalCoord, value: u16) -> bool {
        self.update(local, |w| C::with_block_type(w, value))
    }

    /// Decoration overlay at `local`.
    pub fn decoration(&self, local: LocalCoord) -> Option<u8> {
        self.voxel(local).map(C::decoration)
    }

    /// Set the decoration overlay. Returns false when out of bounds.
    pub fn set_decoration(&mut self, local: LocalCoord, value: u8) -> bool {
        self.update(local, |w| C::with_decoration(w, value))
    }
}

impl<C: ColorFields> Chunk<C> {
    /// Colour channels at `local`.
    pub fn color(&self, local: LocalCoord) -> Option<Rgba> {
        self.voxel(local).map(C::rgba)
    }

    /// Overwrite all four colour channels.
    pub fn set_color(&mut self, local: LocalCoord, color: Rgba) -> bool {
        self.update(local, |w| C::with_rgba(w, color))
    }
}
