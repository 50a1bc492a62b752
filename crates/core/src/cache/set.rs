//! Occupancy set.
//!
//! A bounded collection of resident block addresses for one partition of the
//! cache. Members are kept in insertion order. Capacity is never enforced by
//! truncation: the engine must evict before inserting into a full set, and any
//! attempt to do otherwise is reported as a [`SetViolation`].

use crate::common::error::SetViolation;

/// Resident blocks of a single cache set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSet {
    /// Resident addresses, oldest insertion first. Never longer than `ways`.
    members: Vec<u64>,
    /// Associativity (maximum number of residents).
    ways: usize,
}

impl CacheSet {
    /// Creates an empty set able to hold `ways` blocks.
    pub fn new(ways: usize) -> Self {
        Self {
            members: Vec::with_capacity(ways),
            ways,
        }
    }

    /// Returns `true` if `addr` is resident.
    #[inline]
    pub fn contains(&self, addr: u64) -> bool {
        self.members.contains(&addr)
    }

    /// Returns `true` once the set holds `ways` blocks.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.members.len() == self.ways
    }

    /// Number of resident blocks.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no block is resident.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Associativity of this set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Resident addresses in insertion order.
    pub fn members(&self) -> &[u64] {
        &self.members
    }

    /// Slot position of `addr`, if resident.
    pub fn position(&self, addr: u64) -> Option<usize> {
        self.members.iter().position(|&m| m == addr)
    }

    /// Installs `addr` as the newest resident.
    ///
    /// # Errors
    ///
    /// [`SetViolation::InsertIntoFullSet`] if the set is full, and
    /// [`SetViolation::DuplicateInsert`] if `addr` is already resident.
    pub fn insert(&mut self, addr: u64) -> Result<(), SetViolation> {
        if self.is_full() {
            return Err(SetViolation::InsertIntoFullSet);
        }
        if self.contains(addr) {
            return Err(SetViolation::DuplicateInsert);
        }
        self.members.push(addr);
        Ok(())
    }

    /// Removes `addr` from the set, preserving the order of the others.
    ///
    /// # Errors
    ///
    /// [`SetViolation::EvictNonMember`] if `addr` is not resident.
    pub fn evict(&mut self, addr: u64) -> Result<(), SetViolation> {
        let pos = self.position(addr).ok_or(SetViolation::EvictNonMember)?;
        let _ = self.members.remove(pos);
        Ok(())
    }
}
