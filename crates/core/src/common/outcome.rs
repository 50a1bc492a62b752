//! Access outcome classification.

use std::fmt;

use serde::Serialize;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// The address was resident in its set.
    Hit,
    /// The address was not resident and has been installed.
    Miss,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Single-letter mark used by the per-access history strip.
    pub const fn mark(self) -> char {
        match self {
            Self::Hit => 'H',
            Self::Miss => 'M',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}
