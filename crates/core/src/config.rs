//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline cache parameters used when a field is not supplied.
//! 2. **Enums:** Mapping strategy and replacement policy, closed and exhaustively matched.
//! 3. **Validation:** Conversion of a raw [`CacheConfig`] into a checked [`Geometry`].
//!
//! Configuration is supplied as JSON (CLI `--config`) or built with `CacheConfig::default()`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values reproduce the classroom demo setup: a four-block,
/// direct-mapped cache managed with LRU.
mod defaults {
    /// Default cache capacity in blocks.
    pub const CAPACITY: usize = 4;

    /// Default seed for the Random policy draw source.
    pub const SEED: u64 = 0;
}

/// Address-to-set mapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Mapping {
    /// One block per set; an address can live in exactly one slot.
    #[default]
    #[serde(alias = "DIRECT", alias = "direct")]
    Direct,
    /// A single set holding every block.
    #[serde(
        alias = "FULLY_ASSOCIATIVE",
        alias = "Fully-Associative",
        alias = "fully-associative",
        alias = "fully_associative"
    )]
    FullyAssociative,
    /// `capacity / associativity` sets of `associativity` blocks each.
    #[serde(
        alias = "SET_ASSOCIATIVE",
        alias = "Set-Associative",
        alias = "set-associative",
        alias = "set_associative"
    )]
    SetAssociative,
}

impl Mapping {
    /// Every mapping strategy, in presentation order.
    pub const ALL: [Self; 3] = [Self::Direct, Self::FullyAssociative, Self::SetAssociative];
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct"),
            Self::FullyAssociative => write!(f, "Fully-Associative"),
            Self::SetAssociative => write!(f, "Set-Associative"),
        }
    }
}

impl FromStr for Mapping {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "direct" | "dm" => Ok(Self::Direct),
            "fullyassociative" | "fully" | "fa" => Ok(Self::FullyAssociative),
            "setassociative" | "set" | "sa" => Ok(Self::SetAssociative),
            _ => Err(ConfigError::UnknownMapping(s.trim().to_string())),
        }
    }
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which block to evict
/// when a new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used: evicts the block touched longest ago.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out: evicts the oldest arrival, ignoring hits.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Evicts a uniformly drawn resident block.
    #[serde(alias = "Random", alias = "random")]
    Random,
}

impl ReplacementPolicy {
    /// Every policy, in presentation order.
    pub const ALL: [Self; 3] = [Self::Lru, Self::Fifo, Self::Random];
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => write!(f, "LRU"),
            Self::Fifo => write!(f, "FIFO"),
            Self::Random => write!(f, "RANDOM"),
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            "random" | "rand" => Ok(Self::Random),
            _ => Err(ConfigError::UnknownPolicy(s.trim().to_string())),
        }
    }
}

/// Lowercases and strips separators so `Set-Associative`, `set_associative`
/// and `SETASSOCIATIVE` all compare equal.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Raw cache configuration as supplied by the user.
///
/// Fields not present in a JSON document fall back to the defaults.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, Mapping, ReplacementPolicy};
///
/// let json = r#"{
///     "capacity": 8,
///     "mapping": "Set-Associative",
///     "associativity": 2,
///     "policy": "FIFO"
/// }"#;
///
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.mapping, Mapping::SetAssociative);
/// assert_eq!(config.policy, ReplacementPolicy::Fifo);
///
/// let geometry = config.validate().unwrap();
/// assert_eq!(geometry.set_count, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Total number of blocks the cache can hold.
    pub capacity: usize,
    /// Address-to-set mapping strategy.
    pub mapping: Mapping,
    /// Blocks per set. Required for set-associative mapping; ignored otherwise,
    /// where it is implied (1 for direct, `capacity` for fully-associative).
    pub associativity: Option<usize>,
    /// Replacement policy used on every capacity eviction.
    pub policy: ReplacementPolicy,
    /// Seed for the Random policy draw source.
    pub seed: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            mapping: Mapping::default(),
            associativity: None,
            policy: ReplacementPolicy::default(),
            seed: defaults::SEED,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with the given geometry and policy and the default seed.
    pub const fn new(
        capacity: usize,
        mapping: Mapping,
        associativity: Option<usize>,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            capacity,
            mapping,
            associativity,
            policy,
            seed: defaults::SEED,
        }
    }

    /// Checks the geometry constraints and derives the set layout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the capacity is zero, or when set-associative
    /// mapping is selected and the associativity is missing, outside
    /// `[1, capacity]`, or does not divide the capacity.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        let capacity = self.capacity;
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let associativity = match self.mapping {
            Mapping::Direct => 1,
            Mapping::FullyAssociative => capacity,
            Mapping::SetAssociative => {
                let associativity = self.associativity.ok_or(ConfigError::MissingAssociativity)?;
                if associativity == 0 || associativity > capacity {
                    return Err(ConfigError::AssociativityOutOfRange {
                        associativity,
                        capacity,
                    });
                }
                if capacity % associativity != 0 {
                    return Err(ConfigError::AssociativityNotDivisor {
                        associativity,
                        capacity,
                    });
                }
                associativity
            }
        };

        Ok(Geometry {
            mapping: self.mapping,
            capacity,
            associativity,
            set_count: capacity / associativity,
        })
    }
}

/// Validated cache layout.
///
/// Only obtainable through [`CacheConfig::validate`], so `set_count * associativity
/// == capacity` and `set_count >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Mapping strategy the layout was derived from.
    pub mapping: Mapping,
    /// Total number of blocks.
    pub capacity: usize,
    /// Blocks per set.
    pub associativity: usize,
    /// Number of sets.
    pub set_count: usize,
}
