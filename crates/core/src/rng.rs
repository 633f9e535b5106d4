//! Piece source module - where new piece kinds come from
//!
//! The session draws each spawned kind from a [`PieceSource`]. Two sources
//! ship here:
//! - [`UniformRandom`]: independent uniform choice over the seven kinds
//!   (no bag), seedable for reproducible runs
//! - [`FixedSequence`]: cycles a caller-supplied list, for scripted play

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Supplies the kind of every spawned piece.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random choice over all seven kinds
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: StdRng,
}

impl UniformRandom {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self {
                rng: StdRng::from_entropy(),
            },
        }
    }

    /// Deterministic stream for the given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformRandom {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PieceSource for UniformRandom {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Repeats a fixed list of kinds forever
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSequence {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl FixedSequence {
    /// An empty list falls back to all seven kinds in color id order.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds = PieceKind::ALL.to_vec();
        }
        Self { kinds, next: 0 }
    }

    /// Peek at the kind the next draw returns
    pub fn peek(&self) -> PieceKind {
        self.kinds[self.next]
    }
}

impl PieceSource for FixedSequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}
