use std::collections::HashMap;

use voxbag_core::types::ChunkCoord;

use crate::lru_map::LruChunkMap;

/// Sparse map from chunk coordinate to an owned value (normally a `Chunk`).
///
/// Keys are full `IVec3` triples with derived hashing and equality, so two
/// distinct coordinates never alias anywhere in the `i32` range.
/// `World` only talks to its chunks through this trait, which keeps chunk
/// lifecycle (unbounded growth vs. capacity-bounded eviction) swappable.
pub trait SpatialIndex<V> {
    /// Insert or replace the value at `coord`. Returns the replaced value.
    fn add(&mut self, coord: ChunkCoord, value: V) -> Option<V>;

    fn get(&self, coord: &ChunkCoord) -> Option<&V>;

    fn get_mut(&mut self, coord: &ChunkCoord) -> Option<&mut V>;

    /// Remove the entry at `coord`; a missing entry is a no-op returning None.
    fn remove(&mut self, coord: &ChunkCoord) -> Option<V>;

    /// Number of distinct occupied coordinates.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, coord: &ChunkCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Insert-if-absent: returns the existing value, or stores `f()` first.
    /// `f` runs at most once, and only when `coord` is vacant.
    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, coord: ChunkCoord, f: F) -> &mut V;

    /// Iterator over all occupied entries, in unspecified order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&ChunkCoord, &V)> + '_>;

    fn coords(&self) -> Vec<ChunkCoord> {
        self.iter().map(|(coord, _)| *coord).collect()
    }
}

/// Unbounded spatial container: every chunk ever inserted stays resident.
#[derive(Debug, Clone)]
pub struct ChunkMap<V> {
    chunks: HashMap<ChunkCoord, V>,
}

impl<V> Default for ChunkMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChunkMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
        }
    }

    /// Mutable iterator over all loaded chunks.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ChunkCoord, &mut V)> {
        self.chunks.iter_mut()
    }
}

impl<V> SpatialIndex<V> for ChunkMap<V> {
    fn add(&mut self, coord: ChunkCoord, value: V) -> Option<V> {
        self.chunks.insert(coord, value)
    }

    fn get(&self, coord: &ChunkCoord) -> Option<&V> {
        self.chunks.get(coord)
    }

    fn get_mut(&mut self, coord: &ChunkCoord) -> Option<&mut V> {
        self.chunks.get_mut(coord)
    }

    fn remove(&mut self, coord: &ChunkCoord) -> Option<V> {
        self.chunks.remove(coord)
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }

    fn contains(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, coord: ChunkCoord, f: F) -> &mut V {
        self.chunks.entry(coord).or_insert_with(f)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&ChunkCoord, &V)> + '_> {
        Box::new(self.chunks.iter())
    }
}

/// Either index flavour, chosen at runtime from a `WorldConfig`.
#[derive(Debug)]
pub enum AnyChunkMap<V> {
    Unbounded(ChunkMap<V>),
    Bounded(LruChunkMap<V>),
}

impl<V> Default for AnyChunkMap<V> {
    fn default() -> Self {
        Self::Unbounded(ChunkMap::new())
    }
}

impl<V> AnyChunkMap<V> {
    /// Resident-chunk limit, or None when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::Unbounded(_) => None,
            Self::Bounded(map) => Some(map.capacity()),
        }
    }

    /// Chunks dropped to stay within capacity (always 0 when unbounded).
    pub fn evictions(&self) -> u64 {
        match self {
            Self::Unbounded(_) => 0,
            Self::Bounded(map) => map.evictions(),
        }
    }
}

impl<V> SpatialIndex<V> for AnyChunkMap<V> {
    fn add(&mut self, coord: ChunkCoord, value: V) -> Option<V> {
        match self {
            Self::Unbounded(map) => map.add(coord, value),
            Self::Bounded(map) => map.add(coord, value),
        }
    }

    fn get(&self, coord: &ChunkCoord) -> Option<&V> {
        match self {
            Self::Unbounded(map) => map.get(coord),
            Self::Bounded(map) => map.get(coord),
        }
    }

    fn get_mut(&mut self, coord: &ChunkCoord) -> Option<&mut V> {
        match self {
            Self::Unbounded(map) => map.get_mut(coord),
            Self::Bounded(map) => map.get_mut(coord),
        }
    }

    fn remove(&mut self, coord: &ChunkCoord) -> Option<V> {
        match self {
            Self::Unbounded(map) => map.remove(coord),
            Self::Bounded(map) => map.remove(coord),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Unbounded(map) => map.len(),
            Self::Bounded(map) => map.len(),
        }
    }

    fn contains(&self, coord: &ChunkCoord) -> bool {
        match self {
            Self::Unbounded(map) => map.contains(coord),
            Self::Bounded(map) => map.contains(coord),
        }
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, coord: ChunkCoord, f: F) -> &mut V {
        match self {
            Self::Unbounded(map) => map.get_or_insert_with(coord, f),
            Self::Bounded(map) => map.get_or_insert_with(coord, f),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&ChunkCoord, &V)> + '_> {
        match self {
            Self::Unbounded(map) => map.iter(),
            Self::Bounded(map) => map.iter(),
        }
    }
}
