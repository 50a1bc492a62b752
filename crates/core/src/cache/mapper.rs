//! Address-to-set mapping.
//!
//! Block size is one addressable unit, so the tag stored in a set is the
//! address itself and no offset/index split is performed.

use crate::config::{Geometry, Mapping};

/// Returns the index of the set that `addr` is restricted to.
///
/// Pure and total over `u64`; the result is always `< geometry.set_count`.
///
/// - Direct: `addr mod capacity` (one block per set).
/// - Fully-associative: always set 0.
/// - Set-associative: `addr mod set_count`.
#[inline]
pub const fn set_index(addr: u64, geometry: &Geometry) -> usize {
    match geometry.mapping {
        Mapping::Direct => (addr % geometry.capacity as u64) as usize,
        Mapping::FullyAssociative => 0,
        Mapping::SetAssociative => (addr % geometry.set_count as u64) as usize,
    }
}
