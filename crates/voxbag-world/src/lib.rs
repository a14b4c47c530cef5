pub mod chunk;
pub mod chunk_map;
pub mod lru_map;
pub mod terrain;

use chunk::Chunk;
use chunk_map::{AnyChunkMap, ChunkMap, SpatialIndex};
use glam::IVec3;
use lru_map::LruChunkMap;
use terrain::VoxelSource;
use voxbag_core::codec::{BlockCodec, BlockFields, ColorCodec, VoxelCodec};
use voxbag_core::math::{split_world, world_to_chunk};
use voxbag_core::types::{ChunkCoord, ChunkDims, WorldCoord};
use voxbag_core::{VoxbagError, WorldConfig};

/// World storing the canonical 32-bit block words.
pub type BlockWorld = World<BlockCodec>;

/// World storing 44-bit colour words.
pub type ColorWorld = World<ColorCodec>;

/// Sparse voxel world addressed by absolute integer coordinates.
///
/// Translates a world coordinate into (chunk coordinate, local coordinate)
/// with floor division/modulo, and lazily allocates a zeroed chunk the first
/// time a voxel inside it is written. Reads never allocate.
pub struct World<C: VoxelCodec = BlockCodec, I = AnyChunkMap<Chunk<C>>> {
    dims: ChunkDims,
    chunks: I,
    _codec: std::marker::PhantomData<C>,
}

impl<C: VoxelCodec> Default for World<C, AnyChunkMap<Chunk<C>>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: VoxelCodec> World<C, AnyChunkMap<Chunk<C>>> {
    /// Create an empty, unbounded world with 16x32x16 chunks.
    pub fn new() -> Self {
        Self::with_index(ChunkDims::default(), AnyChunkMap::default())
    }

    /// Create an empty, unbounded world with the given chunk extent.
    pub fn with_dims(width: u32, height: u32, depth: u32) -> Result<Self, VoxbagError> {
        let dims = ChunkDims::new(width, height, depth)?;
        Ok(Self::with_index(dims, AnyChunkMap::default()))
    }

    /// Build a world from a validated config; `max_chunks` selects an LRU-bounded index.
    pub fn from_config(config: &WorldConfig) -> Result<Self, VoxbagError> {
        let dims = config.validate()?;
        let index = match config.max_chunks {
            Some(capacity) => AnyChunkMap::Bounded(LruChunkMap::new(capacity)?),
            None => AnyChunkMap::Unbounded(ChunkMap::new()),
        };
        log::info!(
            "World created: {}x{}x{} chunks, codec {}, capacity {}",
            dims.width(),
            dims.height(),
            dims.depth(),
            C::NAME,
            config
                .max_chunks
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
        );
        Ok(Self::with_index(dims, index))
    }

    /// Resident-chunk limit, or None when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.chunks.capacity()
    }

    /// Chunks dropped by the bounded index so far.
    pub fn evictions(&self) -> u64 {
        self.chunks.evictions()
    }
}

impl<C: VoxelCodec, I: SpatialIndex<Chunk<C>>> World<C, I> {
    /// Create an empty world over a caller-supplied index.
    pub fn with_index(dims: ChunkDims, chunks: I) -> Self {
        Self {
            dims,
            chunks,
            _codec: std::marker::PhantomData,
        }
    }

    /// Extent shared by every chunk of this world.
    pub fn chunk_dims(&self) -> ChunkDims {
        self.dims
    }

    /// Word at (x, y, z), or None when the owning chunk was never written.
    pub fn get_voxel_data(&self, x: i32, y: i32, z: i32) -> Option<C::Word> {
        self.voxel(IVec3::new(x, y, z))
    }

    /// Store `value` at (x, y, z), allocating the owning chunk on first write.
    pub fn set_voxel_data(&mut self, x: i32, y: i32, z: i32, value: C::Word) {
        self.set_voxel(IVec3::new(x, y, z), value);
    }

    /// Word at `world`, or None when its chunk is absent.
    pub fn voxel(&self, world: WorldCoord) -> Option<C::Word> {
        let (coord, local) = split_world(world, self.dims);
        self.chunks.get(&coord)?.voxel(local)
    }

    /// Store `value` at `world`, allocating the chunk on first write.
    pub fn set_voxel(&mut self, world: WorldCoord, value: C::Word) {
        self.update(world, |_| value);
    }

    /// Read-modify-write of one word; the chunk is allocated if needed.
    pub fn update(&mut self, world: WorldCoord, f: impl FnOnce(C::Word) -> C::Word) {
        let (coord, local) = split_world(world, self.dims);
        // local is in range by construction of split_world
        self.chunk_for_write(coord).update(local, f);
    }

    /// Occupancy at `world`.
    pub fn active(&self, world: WorldCoord) -> Option<bool> {
        self.voxel(world).map(C::is_active)
    }

    /// Set or clear occupancy at `world`.
    pub fn set_active(&mut self, world: WorldCoord, active: bool) {
        self.update(world, |w| C::with_active(w, active));
    }

    /// Corner mask at `world`.
    pub fn corner(&self, world: WorldCoord) -> Option<u8> {
        self.voxel(world).map(C::corners)
    }

    /// Replace the corner mask at `world`.
    pub fn set_corner(&mut self, world: WorldCoord, mask: u8) {
        self.update(world, |w| C::with_corners(w, mask));
    }

    /// Chunk coordinate that owns `world`.
    pub fn chunk_coord_of(&self, world: WorldCoord) -> ChunkCoord {
        world_to_chunk(world, self.dims)
    }

    /// Get a chunk by coordinate.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk<C>> {
        self.chunks.get(&coord)
    }

    /// Get a mutable chunk by coordinate.
    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk<C>> {
        self.chunks.get_mut(&coord)
    }

    /// Chunk owning the voxel at `world`, if allocated.
    pub fn chunk_at(&self, world: WorldCoord) -> Option<&Chunk<C>> {
        self.chunk(self.chunk_coord_of(world))
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Coordinates of all allocated chunks, in unspecified order.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        self.chunks.coords()
    }

    /// Iterator over allocated chunks, for mesh extraction and similar readers.
    pub fn chunks(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk<C>)> + '_ {
        self.chunks.iter()
    }

    /// Drop an allocated chunk and hand it back; its region reads as absent again.
    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<Chunk<C>> {
        let removed = self.chunks.remove(&coord);
        if removed.is_some() {
            log::debug!("Removed chunk {coord}");
        }
        removed
    }

    /// Direct access to the spatial index.
    pub fn index(&self) -> &I {
        &self.chunks
    }

    /// Write every `Some` sample of `source` inside the inclusive box `min..=max`.
    /// Returns the number of voxels written; an inverted box writes nothing.
    pub fn generate_region<S>(&mut self, min: WorldCoord, max: WorldCoord, source: &S) -> usize
    where
        S: VoxelSource<C::Word> + ?Sized,
    {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return 0;
        }
        let mut written = 0usize;
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    let world = IVec3::new(x, y, z);
                    if let Some(word) = source.sample(world) {
                        self.set_voxel(world, word);
                        written += 1;
                    }
                }
            }
        }
        log::debug!(
            "Generated region {min}..={max}: {written} voxels, {} chunks resident",
            self.chunks.len()
        );
        written
    }

    fn chunk_for_write(&mut self, coord: ChunkCoord) -> &mut Chunk<C> {
        let dims = self.dims;
        let mut created = false;
        let chunk = self.chunks.get_or_insert_with(coord, || {
            created = true;
            Chunk::new(dims)
        });
        if created {
            log::debug!("Allocated chunk {coord}");
        }
        chunk
    }
}

impl<C: BlockFields, I: SpatialIndex<Chunk<C>>> World<C, I> {
    /// Material id at `world`.
    pub fn block_type(&self, world: WorldCoord) -> Option<u16> {
        self.voxel(world).map(C::block_type)
    }

    /// Set the material id at `world`.
    pub fn set_block_type(&mut self, world: WorldCoord, value: u16) {
        self.update(world, |w| C::with_block_type(w, value));
    }

    /// Decoration overlay at `world`.
    pub fn decoration(&self, world: WorldCoord) -> Option<u8> {
        self.voxel(world).map(C::decoration)
    }

    /// Set the decoration overlay at `world`.
    pub fn set_decoration(&mut self, world: WorldCoord, value: u8) {
        self.update(world, |w| C::with_decoration(w, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain::{BrickFill, NoiseFill};
    use voxbag_core::types::Rgba;
    use voxbag_core::voxel;

    #[test]
    fn test_fresh_world_is_empty() {
        let world = BlockWorld::new();
        assert_eq!(world.chunk_count(), 0);
        let dims = world.chunk_dims();
        assert_eq!((dims.width(), dims.height(), dims.depth()), (16, 32, 16));
    }

    #[test]
    fn test_set_get_single_voxel() {
        let mut world = BlockWorld::new();
        world.set_voxel_data(0, 0, 0, 1);
        assert_eq!(world.get_voxel_data(0, 0, 0), Some(1));
        assert_eq!(world.chunk_count(), 1);
        let chunk = world.chunk(IVec3::ZERO).expect("chunk allocated");
        assert_eq!(chunk.volume(), 16 * 32 * 16);
    }

    #[test]
    fn test_lazy_creation_idempotent() {
        let mut world = BlockWorld::new();
        world.set_voxel_data(0, 0, 0, 1);
        assert_eq!(world.chunk_count(), 1);
        world.set_voxel_data(15, 31, 15, 1);
        world.set_voxel_data(3, 7, 9, 5);
        assert_eq!(world.chunk_count(), 1, "same chunk must be reused");
        world.set_voxel_data(400, 400, 400, 1);
        assert_eq!(world.chunk_count(), 2);
        assert_eq!(world.get_voxel_data(0, 0, 0), Some(1));
        assert_eq!(world.get_voxel_data(400, 400, 400), Some(1));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let mut world = BlockWorld::new();
        world.set_voxel_data(0, 0, 0, 1);
        world.set_voxel_data(400, 400, 400, 1);
        world.set_voxel_data(400, 400, 400, 2);
        assert_eq!(world.get_voxel_data(0, 0, 0), Some(1));
        assert_eq!(world.get_voxel_data(400, 400, 400), Some(2));
        assert_eq!(world.chunk_count(), 2);

        world.set_voxel_data(0, 0, 0, 0);
        assert_eq!(world.get_voxel_data(0, 0, 0), Some(0));
        assert_eq!(world.get_voxel_data(400, 400, 400), Some(2));
        assert_eq!(world.chunk_count(), 2);
    }

    #[test]
    fn test_overwrite_keeps_neighbours() {
        let mut world = BlockWorld::new();
        world.set_voxel_data(4, 4, 4, 10);
        world.set_voxel_data(5, 4, 4, 11);
        world.set_voxel_data(4, 4, 4, 12);
        assert_eq!(world.get_voxel_data(5, 4, 4), Some(11));
        assert_eq!(world.get_voxel_data(4, 4, 4), Some(12));
        assert_eq!(world.get_voxel_data(6, 4, 4), Some(0));
    }

    #[test]
    fn test_read_does_not_allocate() {
        let mut world = BlockWorld::new();
        assert_eq!(world.get_voxel_data(0, 0, 0), None);
        assert_eq!(world.get_voxel_data(-100, 5, 1 << 20), None);
        assert_eq!(world.active(IVec3::ONE), None);
        assert_eq!(world.block_type(IVec3::ONE), None);
        assert_eq!(world.chunk_count(), 0);

        world.set_voxel_data(0, 0, 0, 3);
        // Unwritten voxel in an allocated chunk reads as zero, not absent
        assert_eq!(world.get_voxel_data(1, 0, 0), Some(0));
        // Neighbouring chunk is still absent
        assert_eq!(world.get_voxel_data(16, 0, 0), None);
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn test_negative_coordinates_use_floor() {
        let mut world = BlockWorld::with_dims(16, 16, 16).expect("valid dims");
        world.set_voxel_data(-1, 0, 0, 9);
        assert_eq!(world.chunk_coords(), vec![IVec3::new(-1, 0, 0)]);
        let chunk = world.chunk(IVec3::new(-1, 0, 0)).expect("chunk -1");
        assert_eq!(chunk.voxel(IVec3::new(15, 0, 0)), Some(9));
        assert_eq!(world.get_voxel_data(-1, 0, 0), Some(9));
        // x = 15 lives in chunk 0, not chunk -1
        assert_eq!(world.get_voxel_data(15, 0, 0), None);
    }

    #[test]
    fn test_negative_writes_do_not_collide() {
        let mut world = BlockWorld::new();
        let points = [
            IVec3::new(-1, -1, -1),
            IVec3::new(1, 1, 1),
            IVec3::new(-16, -32, -16),
            IVec3::new(-17, -33, -17),
            IVec3::new(15, 31, 15),
        ];
        for (i, p) in points.iter().enumerate() {
            world.set_voxel(*p, i as u32 + 100);
        }
        for (i, p) in points.iter().enumerate() {
            assert_eq!(world.voxel(*p), Some(i as u32 + 100), "at {p}");
        }
        assert_eq!(world.chunk_count(), 3);
    }

    #[test]
    fn test_diagonal_sweep() {
        let mut world = BlockWorld::new();
        for i in -1000..1000 {
            world.set_voxel_data(i, i, i, (i + 1000) as u32);
        }
        for i in -1000..1000 {
            assert_eq!(world.get_voxel_data(i, i, i), Some((i + 1000) as u32));
        }
        // Exactly one chunk per distinct chunk coordinate touched
        let expected: std::collections::HashSet<_> = (-1000..1000)
            .map(|i| world.chunk_coord_of(IVec3::splat(i)))
            .collect();
        assert_eq!(world.chunk_count(), expected.len());
    }

    #[test]
    fn test_field_helpers() {
        let mut world = BlockWorld::new();
        let p = IVec3::new(-3, 40, 7);
        world.set_active(p, true);
        world.set_block_type(p, 602);
        world.set_decoration(p, 133);
        world.set_corner(p, 0b1010_0101);
        assert_eq!(world.active(p), Some(true));
        assert_eq!(world.block_type(p), Some(602));
        assert_eq!(world.decoration(p), Some(133));
        assert_eq!(world.corner(p), Some(0b1010_0101));
        assert_eq!(world.voxel(p), Some(voxel::pack(true, 602, 133, 0b1010_0101)));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn test_zero_dims_rejected() {
        assert!(matches!(
            BlockWorld::with_dims(16, 0, 16),
            Err(VoxbagError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_from_config_unbounded() {
        let config = WorldConfig::from_ron_str("(chunk_width: 8, chunk_height: 8, chunk_depth: 8)")
            .expect("valid RON");
        let mut world = BlockWorld::from_config(&config).expect("valid config");
        assert_eq!(world.capacity(), None);
        world.set_voxel_data(8, 0, 0, 1);
        assert_eq!(world.chunk_coords(), vec![IVec3::new(1, 0, 0)]);
    }

    #[test]
    fn test_from_config_bounded_evicts() {
        let config = WorldConfig {
            max_chunks: Some(2),
            ..WorldConfig::default()
        };
        let mut world = BlockWorld::from_config(&config).expect("valid config");
        world.set_voxel_data(0, 0, 0, 1);
        world.set_voxel_data(16, 0, 0, 2);
        world.set_voxel_data(32, 0, 0, 3);
        assert_eq!(world.chunk_count(), 2);
        assert_eq!(world.evictions(), 1);
        assert_eq!(world.capacity(), Some(2));
        // Evicted region reads as absent again
        assert_eq!(world.get_voxel_data(0, 0, 0), None);
        assert_eq!(world.get_voxel_data(32, 0, 0), Some(3));
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let config = WorldConfig {
            max_chunks: Some(0),
            ..WorldConfig::default()
        };
        assert!(matches!(
            BlockWorld::from_config(&config),
            Err(VoxbagError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_remove_chunk() {
        let mut world = BlockWorld::new();
        world.set_voxel_data(1, 1, 1, 5);
        let removed = world.remove_chunk(IVec3::ZERO).expect("chunk existed");
        assert_eq!(removed.voxel(IVec3::ONE), Some(5));
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.get_voxel_data(1, 1, 1), None);
        assert!(world.remove_chunk(IVec3::ZERO).is_none());
    }

    #[test]
    fn test_chunks_walks_every_allocated_chunk() {
        let mut world = BlockWorld::new();
        world.set_voxel_data(0, 0, 0, 1);
        world.set_voxel_data(-1, 0, 0, 2);
        world.set_voxel_data(16, 32, 16, 3);
        world.set_voxel_data(17, 33, 17, 4);

        let mut seen: Vec<_> = world
            .chunks()
            .map(|(coord, chunk)| (*coord, chunk.volume(), chunk.active_count()))
            .collect();
        seen.sort_by_key(|(c, _, _)| (c.x, c.y, c.z));
        assert_eq!(
            seen,
            vec![
                (IVec3::new(-1, 0, 0), 8192, 0),
                (IVec3::ZERO, 8192, 0),
                (IVec3::ONE, 8192, 0),
            ]
        );
        let words: u32 = world
            .chunks()
            .flat_map(|(_, chunk)| chunk.voxels().iter().copied())
            .sum();
        assert_eq!(words, 1 + 2 + 3 + 4);
    }

    #[test]
    fn test_chunk_mut_writes_are_visible() {
        let mut world = BlockWorld::new();
        let p = IVec3::new(-3, 40, 7);
        assert!(world.chunk_mut(world.chunk_coord_of(p)).is_none());
        world.set_voxel(p, 1);

        let coord = world.chunk_coord_of(p);
        let local = voxbag_core::math::world_to_local(p, world.chunk_dims());
        let chunk = world.chunk_mut(coord).expect("chunk allocated");
        assert!(chunk.set_block_type(local, 77));
        chunk.set_voxel(IVec3::ZERO, 5);

        assert_eq!(world.block_type(p), Some(77));
        let origin = voxbag_core::math::chunk_origin(coord, world.chunk_dims());
        assert_eq!(world.get_voxel_data(origin.x, origin.y, origin.z), Some(5));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn test_custom_index() {
        let mut world: World<BlockCodec, ChunkMap<Chunk>> =
            World::with_index(ChunkDims::cube(4).expect("valid dims"), ChunkMap::new());
        world.set_voxel_data(-4, 3, 4, 8);
        assert_eq!(world.index().len(), 1);
        assert_eq!(world.chunk_at(IVec3::new(-1, 0, 7)).map(|c| c.volume()), Some(64));
    }

    #[test]
    fn test_color_world() {
        let mut world = ColorWorld::new();
        let p = IVec3::new(-5, 2, 9);
        world.update(p, |w| ColorCodec::with_red(w, 200));
        world.set_active(p, true);
        let chunk = world.chunk_at(p).expect("allocated");
        let local = voxbag_core::math::world_to_local(p, world.chunk_dims());
        use voxbag_core::codec::ColorFields;
        assert_eq!(
            ColorCodec::rgba(chunk.voxel(local).expect("in bounds")),
            Rgba::new(200, 0, 0, 0)
        );
        assert_eq!(world.active(p), Some(true));
    }

    #[test]
    fn test_generate_region_with_bricks() {
        let mut world = BlockWorld::new();
        let written = world.generate_region(
            IVec3::new(-20, -10, 0),
            IVec3::new(19, 9, 0),
            &BrickFill::default(),
        );
        assert_eq!(written, 40 * 20);
        assert_eq!(world.block_type(IVec3::new(5, 5, 0)), Some(1));
        assert_eq!(world.block_type(IVec3::new(0, 0, 0)), Some(2));
        assert_eq!(world.active(IVec3::new(-20, -10, 0)), Some(true));
        // x in [-20, 19] spans chunks -2..=1, y in [-10, 9] spans -1..=0
        assert_eq!(world.chunk_count(), 4 * 2);
    }

    #[test]
    fn test_generate_region_skips_none() {
        let mut world = BlockWorld::new();
        let written = world.generate_region(IVec3::ZERO, IVec3::splat(63), &NoiseFill::new(1.0, 1.0));
        assert_eq!(written, 0);
        assert_eq!(world.chunk_count(), 0, "no sample means no allocation");
        assert_eq!(
            world.generate_region(IVec3::ONE, IVec3::ZERO, &NoiseFill::new(1.0, 0.0)),
            0
        );
    }

    #[test]
    fn test_generate_region_noise_is_reproducible() {
        let mut a = BlockWorld::new();
        let mut b = BlockWorld::new();
        let source = NoiseFill::new(42.0, 0.5);
        let wa = a.generate_region(IVec3::splat(-8), IVec3::splat(8), &source);
        let wb = b.generate_region(IVec3::splat(-8), IVec3::splat(8), &source);
        assert_eq!(wa, wb);
        assert!(wa > 0 && wa < 17 * 17 * 17);
        for x in -8..=8 {
            assert_eq!(a.get_voxel_data(x, 3, -2), b.get_voxel_data(x, 3, -2));
        }
    }
}
