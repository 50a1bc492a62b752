//! Random replacement.
//!
//! Random eviction keeps no per-set state: every eviction is an independent
//! uniform draw over the set's current residents. The draw source is injected
//! into the engine so that runs stay reproducible under a fixed seed and tests
//! can script exact victim sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform indices for Random eviction.
pub trait DrawSource {
    /// Returns an index in `[0, len)`. `len` is never zero when called by the engine.
    fn draw(&mut self, len: usize) -> usize;
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    fn draw(&mut self, len: usize) -> usize {
        (**self).draw(len)
    }
}

impl<D: DrawSource + ?Sized> DrawSource for Box<D> {
    fn draw(&mut self, len: usize) -> usize {
        (**self).draw(len)
    }
}

/// `ChaCha8`-backed draw source with an explicit seed.
#[derive(Debug, Clone)]
pub struct SeededDraws {
    rng: ChaCha8Rng,
}

impl SeededDraws {
    /// Creates a draw source whose sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for SeededDraws {
    fn draw(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Picks a uniformly drawn resident of `members`.
///
/// Returns `None` for an empty set. Out-of-range draws are reduced modulo
/// the number of residents so the victim is always a current member.
pub fn pick(members: &[u64], draws: &mut dyn DrawSource) -> Option<u64> {
    if members.is_empty() {
        return None;
    }
    let index = draws.draw(members.len()) % members.len();
    members.get(index).copied()
}
