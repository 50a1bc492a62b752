//! First-In, First-Out (FIFO) ordering.
//!
//! Keeps the residents of one set in arrival order. The order is fixed at
//! insertion and never changed by hits, so blocks leave a set in exactly the
//! order they entered it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1) (no-op)
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(W) per set
//! - **Best Case:** Streaming accesses where all blocks have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict hot blocks)

use std::collections::VecDeque;

use super::OrderTracker;

/// Arrival order of one set. Front is the oldest arrival.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrivalQueue {
    order: VecDeque<u64>,
}

impl ArrivalQueue {
    /// Creates an empty queue sized for `ways` residents.
    pub fn new(ways: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(ways),
        }
    }

    /// Addresses from oldest to newest arrival.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }
}

impl OrderTracker for ArrivalQueue {
    fn insert(&mut self, addr: u64) {
        self.order.push_back(addr);
    }

    /// Hits do not reorder arrivals.
    fn touch(&mut self, _addr: u64) {}

    fn remove(&mut self, addr: u64) -> bool {
        match self.order.iter().position(|&a| a == addr) {
            Some(pos) => self.order.remove(pos).is_some(),
            None => false,
        }
    }

    /// Returns the oldest arrival still resident.
    fn victim(&self) -> Option<u64> {
        self.order.front().copied()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}
