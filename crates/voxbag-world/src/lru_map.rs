use std::num::NonZeroUsize;

use lru::LruCache;
use voxbag_core::types::ChunkCoord;
use voxbag_core::VoxbagError;

use crate::chunk_map::SpatialIndex;

/// Capacity-bounded spatial container.
///
/// Holds at most `capacity` entries; inserting a new coordinate into a full
/// map drops the least recently used entry. Mutable access (`get_mut`,
/// `get_or_insert_with`, `add`) refreshes recency, shared `get` does not.
/// Evicted chunks are discarded, not persisted.
#[derive(Debug)]
pub struct LruChunkMap<V> {
    chunks: LruCache<ChunkCoord, V>,
    evictions: u64,
}

impl<V> LruChunkMap<V> {
    /// Create an empty map holding at most `capacity` entries; 0 is rejected.
    pub fn new(capacity: usize) -> Result<Self, VoxbagError> {
        let cap = NonZeroUsize::new(capacity).ok_or(VoxbagError::ZeroCapacity)?;
        Ok(Self {
            chunks: LruCache::new(cap),
            evictions: 0,
        })
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.chunks.cap().get()
    }

    /// Total entries dropped to stay within capacity.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Coordinate that the next insertion would evict, if the map is full.
    pub fn next_eviction(&self) -> Option<ChunkCoord> {
        if self.chunks.len() < self.capacity() {
            return None;
        }
        self.chunks.peek_lru().map(|(coord, _)| *coord)
    }

    fn note_eviction(&mut self, coord: ChunkCoord) {
        self.evictions += 1;
        log::debug!(
            "Evicted chunk {coord} (capacity {}, {} evictions so far)",
            self.capacity(),
            self.evictions
        );
    }
}

impl<V> SpatialIndex<V> for LruChunkMap<V> {
    fn add(&mut self, coord: ChunkCoord, value: V) -> Option<V> {
        match self.chunks.push(coord, value) {
            Some((old_coord, old)) if old_coord == coord => Some(old),
            Some((evicted, _)) => {
                self.note_eviction(evicted);
                None
            }
            None => None,
        }
    }

    fn get(&self, coord: &ChunkCoord) -> Option<&V> {
        self.chunks.peek(coord)
    }

    fn get_mut(&mut self, coord: &ChunkCoord) -> Option<&mut V> {
        self.chunks.get_mut(coord)
    }

    fn remove(&mut self, coord: &ChunkCoord) -> Option<V> {
        self.chunks.pop(coord)
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }

    fn contains(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains(coord)
    }

    fn get_or_insert_with<F: FnOnce() -> V>(&mut self, coord: ChunkCoord, f: F) -> &mut V {
        if !self.chunks.contains(&coord) {
            if let Some(evicted) = self.next_eviction() {
                self.note_eviction(evicted);
            }
        }
        self.chunks.get_or_insert_mut(coord, f)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&ChunkCoord, &V)> + '_> {
        Box::new(self.chunks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            LruChunkMap::<u8>::new(0),
            Err(VoxbagError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut map = LruChunkMap::new(2).expect("capacity 2");
        map.add(IVec3::new(0, 0, 0), 'a');
        map.add(IVec3::new(1, 0, 0), 'b');
        // Touch 'a' so 'b' becomes the eviction candidate
        assert!(map.get_mut(&IVec3::new(0, 0, 0)).is_some());
        assert_eq!(map.next_eviction(), Some(IVec3::new(1, 0, 0)));
        map.add(IVec3::new(2, 0, 0), 'c');

        assert_eq!(map.len(), 2);
        assert_eq!(map.evictions(), 1);
        assert_eq!(map.get(&IVec3::new(0, 0, 0)), Some(&'a'));
        assert_eq!(map.get(&IVec3::new(1, 0, 0)), None);
        assert_eq!(map.get(&IVec3::new(2, 0, 0)), Some(&'c'));
    }

    #[test]
    fn test_shared_get_does_not_refresh() {
        let mut map = LruChunkMap::new(2).expect("capacity 2");
        map.add(IVec3::X, 1);
        map.add(IVec3::Y, 2);
        assert_eq!(map.get(&IVec3::X), Some(&1));
        map.add(IVec3::Z, 3);
        assert!(!map.contains(&IVec3::X));
    }

    #[test]
    fn test_replace_is_not_eviction() {
        let mut map = LruChunkMap::new(1).expect("capacity 1");
        assert_eq!(map.add(IVec3::ONE, 1), None);
        assert_eq!(map.add(IVec3::ONE, 2), Some(1));
        assert_eq!(map.evictions(), 0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_or_insert_with_bounded() {
        let mut map = LruChunkMap::new(3).expect("capacity 3");
        for x in 0..10 {
            *map.get_or_insert_with(IVec3::new(x, 0, 0), || 0) += 1;
            *map.get_or_insert_with(IVec3::new(x, 0, 0), || 100) += 1;
        }
        assert_eq!(map.len(), 3);
        assert_eq!(map.evictions(), 7);
        assert_eq!(map.get(&IVec3::new(9, 0, 0)), Some(&2));
        assert_eq!(map.next_eviction(), Some(IVec3::new(7, 0, 0)));
    }

    #[test]
    fn test_remove_frees_capacity() {
        let mut map = LruChunkMap::new(1).expect("capacity 1");
        map.add(IVec3::ZERO, 1);
        assert_eq!(map.remove(&IVec3::ZERO), Some(1));
        assert_eq!(map.remove(&IVec3::ZERO), None);
        assert_eq!(map.next_eviction(), None);
        map.add(IVec3::ONE, 2);
        assert_eq!(map.evictions(), 0);
    }
}
