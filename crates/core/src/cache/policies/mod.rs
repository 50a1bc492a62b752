//! Cache Replacement Policies.
//!
//! Per-set bookkeeping used to select a victim when a miss lands in a full set.
//!
//! # Policies
//!
//! - `Lru`: recency order, refreshed on every hit.
//! - `Fifo`: arrival order, fixed at insertion.
//! - `Random`: stateless uniform draw over the current residents.

/// First-In, First-Out arrival ordering.
pub mod fifo;

/// Least Recently Used recency ordering.
pub mod lru;

/// Random victim selection and draw sources.
pub mod random;

pub use fifo::ArrivalQueue;
pub use lru::RecencyStack;
pub use random::{DrawSource, SeededDraws};

use crate::common::error::SetViolation;
use crate::config::ReplacementPolicy;

/// Ordering of one set's residents used to pick a deterministic victim.
pub trait OrderTracker {
    /// Registers `addr` as the newest resident.
    fn insert(&mut self, addr: u64);

    /// Records a hit on `addr`.
    fn touch(&mut self, addr: u64);

    /// Forgets `addr`. Returns `false` if it was not tracked.
    fn remove(&mut self, addr: u64) -> bool;

    /// The address this ordering would evict next.
    fn victim(&self) -> Option<u64>;

    /// Number of tracked addresses.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Victim-selection state for one set.
///
/// Both the recency and the arrival orderings are kept current regardless of
/// the configured policy, so the policy may change from one eviction to the
/// next without losing history. Both always hold exactly the set's residents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvictionTracker {
    recency: RecencyStack,
    arrival: ArrivalQueue,
}

impl EvictionTracker {
    /// Creates an empty tracker for a set of `ways` blocks.
    pub fn new(ways: usize) -> Self {
        Self {
            recency: RecencyStack::new(ways),
            arrival: ArrivalQueue::new(ways),
        }
    }

    /// Records a hit on `addr`.
    pub fn on_hit(&mut self, addr: u64) {
        self.recency.touch(addr);
        self.arrival.touch(addr);
    }

    /// Registers a freshly installed `addr` as newest in both orderings.
    pub fn on_insert(&mut self, addr: u64) {
        self.recency.insert(addr);
        self.arrival.insert(addr);
    }

    /// Drops an evicted `addr` from both orderings.
    ///
    /// # Errors
    ///
    /// [`SetViolation::EvictNonMember`] if either ordering did not track `addr`.
    pub fn on_evict(&mut self, addr: u64) -> Result<(), SetViolation> {
        let in_recency = self.recency.remove(addr);
        let in_arrival = self.arrival.remove(addr);
        if in_recency && in_arrival {
            Ok(())
        } else {
            Err(SetViolation::EvictNonMember)
        }
    }

    /// Selects the victim under `policy`.
    ///
    /// `members` are the set's current residents; Random draws an index into
    /// them, LRU and FIFO read the front of their ordering.
    ///
    /// # Errors
    ///
    /// [`SetViolation::EmptyVictimPool`] if the set has no residents.
    pub fn victim(
        &self,
        policy: ReplacementPolicy,
        members: &[u64],
        draws: &mut dyn DrawSource,
    ) -> Result<u64, SetViolation> {
        let victim = match policy {
            ReplacementPolicy::Lru => self.recency.victim(),
            ReplacementPolicy::Fifo => self.arrival.victim(),
            ReplacementPolicy::Random => random::pick(members, draws),
        };
        victim.ok_or(SetViolation::EmptyVictimPool)
    }

    /// Recency ordering, least recent first.
    pub const fn recency(&self) -> &RecencyStack {
        &self.recency
    }

    /// Arrival ordering, oldest first.
    pub const fn arrival(&self) -> &ArrivalQueue {
        &self.arrival
    }
}
