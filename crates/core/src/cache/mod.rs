//! Set-partitioned cache state.
//!
//! This module holds the storage side of the simulator: the address mapper,
//! the per-set occupancy model, and the per-set eviction trackers. The
//! [`Cache`] pairs one [`CacheSet`] with one [`EvictionTracker`] for every
//! partition of the configured [`Geometry`]; the simulation engine drives it.

/// Address-to-set mapping for each mapping strategy.
pub mod mapper;

/// Cache replacement policy bookkeeping (LRU, FIFO, Random).
pub mod policies;

/// Bounded occupancy set.
pub mod set;

pub use self::policies::EvictionTracker;
pub use self::set::CacheSet;

use crate::config::Geometry;

/// All sets of one cache, each with its eviction tracker.
#[derive(Debug, Clone)]
pub struct Cache {
    geometry: Geometry,
    sets: Vec<CacheSet>,
    trackers: Vec<EvictionTracker>,
}

impl Cache {
    /// Allocates `geometry.set_count` empty sets of `geometry.associativity` blocks.
    pub fn new(geometry: Geometry) -> Self {
        let ways = geometry.associativity;
        Self {
            geometry,
            sets: (0..geometry.set_count).map(|_| CacheSet::new(ways)).collect(),
            trackers: (0..geometry.set_count)
                .map(|_| EvictionTracker::new(ways))
                .collect(),
        }
    }

    /// Layout this cache was built with.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Index of the set `addr` maps to.
    #[inline]
    pub const fn set_index(&self, addr: u64) -> usize {
        mapper::set_index(addr, &self.geometry)
    }

    /// Returns `true` if `addr` is resident in its set.
    pub fn contains(&self, addr: u64) -> bool {
        self.sets
            .get(self.set_index(addr))
            .is_some_and(|set| set.contains(addr))
    }

    /// Mutable access to one set and its tracker.
    ///
    /// Returns `None` only for an index outside `[0, set_count)`, which the
    /// mapper never produces.
    pub fn partition_mut(
        &mut self,
        index: usize,
    ) -> Option<(&mut CacheSet, &mut EvictionTracker)> {
        let set = self.sets.get_mut(index)?;
        let tracker = self.trackers.get_mut(index)?;
        Some((set, tracker))
    }

    /// Read-only view of every set.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Snapshot of every set's residents, in insertion order.
    pub fn snapshot(&self) -> Vec<Vec<u64>> {
        self.sets.iter().map(|s| s.members().to_vec()).collect()
    }
}
