//! Least Recently Used (LRU) ordering.
//!
//! Keeps the residents of one set ordered from least to most recently used.
//! A hit moves the address to the most-recent end; the victim is always the
//! element at the least-recent end.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(W) where W is the associativity
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(W) per set
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans larger than the set (thrashing)

use std::collections::VecDeque;

use super::OrderTracker;

/// Recency order of one set. Front is LRU, back is MRU.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecencyStack {
    order: VecDeque<u64>,
}

impl RecencyStack {
    /// Creates an empty stack sized for `ways` residents.
    pub fn new(ways: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(ways),
        }
    }

    /// Addresses from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }

    /// The most recently used address, if any.
    pub fn most_recent(&self) -> Option<u64> {
        self.order.back().copied()
    }
}

impl OrderTracker for RecencyStack {
    fn insert(&mut self, addr: u64) {
        self.order.push_back(addr);
    }

    /// Promotes `addr` to the MRU position.
    fn touch(&mut self, addr: u64) {
        if let Some(pos) = self.order.iter().position(|&a| a == addr) {
            let _ = self.order.remove(pos);
            self.order.push_back(addr);
        }
    }

    fn remove(&mut self, addr: u64) -> bool {
        match self.order.iter().position(|&a| a == addr) {
            Some(pos) => self.order.remove(pos).is_some(),
            None => false,
        }
    }

    /// Returns the address at the LRU end.
    fn victim(&self) -> Option<u64> {
        self.order.front().copied()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}
