//! Simulation results.
//!
//! A [`SimulationResult`] is produced exactly once per run and is read-only
//! afterwards: every renderer in [`report`](crate::report) consumes it by
//! shared reference.

use serde::Serialize;

use crate::common::Outcome;
use crate::config::{Geometry, ReplacementPolicy};

/// Outcome of a single access in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessRecord {
    /// 0-based position of the access in the input sequence.
    pub step: usize,
    /// Accessed address (equal to its tag).
    pub address: u64,
    /// Set the address mapped to.
    pub set_index: usize,
    /// Hit or miss.
    pub outcome: Outcome,
    /// Block evicted to make room, if the miss landed in a full set.
    pub evicted: Option<u64>,
    /// Policy applied to that eviction.
    pub policy: Option<ReplacementPolicy>,
}

/// Where an address resides at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Set index.
    pub set: usize,
    /// Position within the set (insertion order).
    pub slot: usize,
}

/// Complete, immutable outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    geometry: Geometry,
    hits: u64,
    misses: u64,
    trace: Vec<AccessRecord>,
    final_state: Vec<Vec<u64>>,
}

impl SimulationResult {
    /// Assembles a result, tallying hits and misses from `trace`.
    pub(crate) fn new(geometry: Geometry, trace: Vec<AccessRecord>, final_state: Vec<Vec<u64>>) -> Self {
        let hits = trace.iter().filter(|r| r.outcome.is_hit()).count() as u64;
        let misses = trace.len() as u64 - hits;
        Self {
            geometry,
            hits,
            misses,
            trace,
            final_state,
        }
    }

    /// Cache layout the run used.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Number of hits.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of misses.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of accesses (`hits + misses`).
    pub const fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit; `0.0` for an empty trace.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.total())
    }

    /// Fraction of accesses that missed; `0.0` for an empty trace.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.total())
    }

    /// Per-access records, in input order.
    pub fn trace(&self) -> &[AccessRecord] {
        &self.trace
    }

    /// Outcomes only, in input order.
    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.trace.iter().map(|r| r.outcome)
    }

    /// Number of capacity evictions performed.
    pub fn evictions(&self) -> usize {
        self.trace.iter().filter(|r| r.evicted.is_some()).count()
    }

    /// Residents of every set at the end of the run, in insertion order.
    pub fn final_state(&self) -> &[Vec<u64>] {
        &self.final_state
    }

    /// Finds where `addr` resides at the end of the run.
    pub fn locate(&self, addr: u64) -> Option<Location> {
        self.final_state.iter().enumerate().find_map(|(set, members)| {
            members
                .iter()
                .position(|&m| m == addr)
                .map(|slot| Location { set, slot })
        })
    }

    /// Serializes the result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates any `serde_json` serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
