use std::hint::black_box;

use glam::IVec3;
use voxbag_core::types::ChunkDims;
use voxbag_core::voxel;
use voxbag_world::chunk::Chunk;
use voxbag_world::chunk_map::{ChunkMap, SpatialIndex};
use voxbag_world::BlockWorld;

/// Default operation count per scene.
pub const DEFAULT_ITERATIONS: u32 = 1_000_000;

/// Largest operation count whose diagonal sweep stays inside `i32`.
pub const MAX_ITERATIONS: u32 = i32::MAX as u32;

/// Accept an operation count only if every diagonal index fits in `i32`.
pub fn check_iterations(iterations: u32) -> Option<u32> {
    (iterations <= MAX_ITERATIONS).then_some(iterations)
}

/// Which access pattern a scene exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Set then get one voxel of a single 16x16x16 chunk, repeatedly.
    ChunkSetGet,
    /// Insert into the chunk map at `(i, i, i)`, one distinct key per op.
    BagAddDistinct,
    /// Look up the same chunk map key over and over.
    BagGetHot,
    /// Set then get along the world diagonal, allocating chunks as it goes.
    WorldCold,
    /// Same sweep as `WorldCold`, after every chunk has been allocated.
    WorldPrecreated,
    /// `WorldCold` mirrored into negative space.
    WorldNegative,
    /// Diagonal sweep through a world bounded to 64 resident chunks.
    WorldBounded,
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: &'static str,
    pub kind: SceneKind,
    pub iterations: u32,
}

/// The standard suite: five core access patterns plus two
/// coordinate/eviction variants.
pub fn standard_scenes(iterations: u32) -> Vec<SceneConfig> {
    [
        ("chunk_set_get", SceneKind::ChunkSetGet),
        ("bag_add_distinct", SceneKind::BagAddDistinct),
        ("bag_get_hot", SceneKind::BagGetHot),
        ("world_cold", SceneKind::WorldCold),
        ("world_precreated", SceneKind::WorldPrecreated),
        ("world_negative", SceneKind::WorldNegative),
        ("world_bounded", SceneKind::WorldBounded),
    ]
    .into_iter()
    .map(|(name, kind)| SceneConfig {
        name,
        kind,
        iterations,
    })
    .collect()
}

/// Scene state built before the clock starts.
pub enum Prepared {
    Chunk(Chunk),
    Bag(ChunkMap<u32>),
    World(BlockWorld),
}

const BOUNDED_CAPACITY: usize = 64;

fn diagonal(i: u32, sign: i32) -> IVec3 {
    IVec3::splat(i as i32 * sign)
}

/// Build the untimed state for `config`.
pub fn prepare(config: &SceneConfig) -> Prepared {
    match config.kind {
        SceneKind::ChunkSetGet => {
            let dims = ChunkDims::cube(16).unwrap_or_default();
            Prepared::Chunk(Chunk::new(dims))
        }
        SceneKind::BagAddDistinct => Prepared::Bag(ChunkMap::new()),
        SceneKind::BagGetHot => {
            let mut bag = ChunkMap::new();
            bag.add(IVec3::ZERO, 1);
            Prepared::Bag(bag)
        }
        SceneKind::WorldCold | SceneKind::WorldNegative => Prepared::World(BlockWorld::new()),
        SceneKind::WorldPrecreated => {
            let mut world = BlockWorld::new();
            for i in 0..config.iterations {
                let p = diagonal(i, 1);
                world.set_voxel_data(p.x, p.y, p.z, 0);
            }
            Prepared::World(world)
        }
        SceneKind::WorldBounded => {
            let cfg = voxbag_core::WorldConfig {
                max_chunks: Some(BOUNDED_CAPACITY),
                ..Default::default()
            };
            match BlockWorld::from_config(&cfg) {
                Ok(world) => Prepared::World(world),
                Err(e) => {
                    log::error!("Falling back to unbounded world: {e}");
                    Prepared::World(BlockWorld::new())
                }
            }
        }
    }
}

/// Run the timed body of a scene against prepared state.
/// Returns the number of chunks resident afterwards.
pub fn execute(config: &SceneConfig, state: &mut Prepared) -> usize {
    let word = voxel::pack(true, 111, 0b1010_1010, 0xFF);
    match (config.kind, state) {
        (SceneKind::ChunkSetGet, Prepared::Chunk(chunk)) => {
            let local = IVec3::new(1, 2, 3);
            for _ in 0..config.iterations {
                chunk.set_voxel(local, black_box(word));
                black_box(chunk.voxel(local));
            }
            1
        }
        (SceneKind::BagAddDistinct, Prepared::Bag(bag)) => {
            for i in 0..config.iterations {
                bag.add(diagonal(i, 1), black_box(i));
            }
            bag.len()
        }
        (SceneKind::BagGetHot, Prepared::Bag(bag)) => {
            for _ in 0..config.iterations {
                black_box(bag.get(black_box(&IVec3::ZERO)));
            }
            bag.len()
        }
        (
            SceneKind::WorldCold | SceneKind::WorldPrecreated | SceneKind::WorldBounded,
            Prepared::World(world),
        ) => {
            for i in 0..config.iterations {
                let p = diagonal(i, 1);
                world.set_voxel_data(p.x, p.y, p.z, black_box(word));
                black_box(world.get_voxel_data(p.x, p.y, p.z));
            }
            world.chunk_count()
        }
        (SceneKind::WorldNegative, Prepared::World(world)) => {
            for i in 0..config.iterations {
                let p = diagonal(i, -1);
                world.set_voxel_data(p.x, p.y, p.z, black_box(word));
                black_box(world.get_voxel_data(p.x, p.y, p.z));
            }
            world.chunk_count()
        }
        (kind, _) => {
            log::error!("Scene '{}' ({kind:?}) given mismatched state", config.name);
            0
        }
    }
}
