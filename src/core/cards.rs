//! Card species and count-vectors.
//!
//! Every collection of cards in the game — deck, field, a hand, a draw
//! batch — is a fixed-length vector of per-species counts. The whole rules
//! engine is element-wise arithmetic on these vectors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{AddAssign, Index, SubAssign};

/// Card species index, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Species(pub u8);

impl Species {
    /// Create a new species index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "species{}", self.0)
    }
}

/// Integer count-vector over species.
///
/// Inline storage covers the typical species count (<= 8) without heap
/// allocation.
///
/// ## Example
///
/// ```
/// use kariba_mcts::core::{CardVector, Species};
///
/// let mut hand = CardVector::zeros(4);
/// hand += &CardVector::one_hot(4, Species::new(2), 3);
/// assert_eq!(hand[Species::new(2)], 3);
/// assert_eq!(hand.sum(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardVector {
    counts: SmallVec<[u32; 8]>,
}

impl CardVector {
    /// All-zero vector over `n_species` species.
    #[must_use]
    pub fn zeros(n_species: usize) -> Self {
        Self {
            counts: smallvec::smallvec![0; n_species],
        }
    }

    /// Vector with `count` cards of a single species and zero elsewhere.
    #[must_use]
    pub fn one_hot(n_species: usize, species: Species, count: u32) -> Self {
        let mut v = Self::zeros(n_species);
        v.counts[species.index()] = count;
        v
    }

    /// Vector from explicit per-species counts.
    #[must_use]
    pub fn from_counts(counts: &[u32]) -> Self {
        Self {
            counts: SmallVec::from_slice(counts),
        }
    }

    /// Number of species (vector length).
    #[must_use]
    pub fn n_species(&self) -> usize {
        self.counts.len()
    }

    /// Total number of cards.
    #[must_use]
    pub fn sum(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// True if no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// The counts as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    /// Iterate over (species, count) pairs with nonzero count.
    pub fn nonzero(&self) -> impl Iterator<Item = (Species, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| (Species(i as u8), c))
    }

    /// The unique species present, if exactly one is.
    #[must_use]
    pub fn single_species(&self) -> Option<(Species, u32)> {
        let mut nonzero = self.nonzero();
        let first = nonzero.next()?;
        match nonzero.next() {
            None => Some(first),
            Some(_) => None,
        }
    }

    /// Element-wise sum of two vectors.
    #[must_use]
    pub fn plus(&self, other: &CardVector) -> CardVector {
        let mut out = self.clone();
        out += other;
        out
    }
}

impl Index<Species> for CardVector {
    type Output = u32;

    fn index(&self, species: Species) -> &Self::Output {
        &self.counts[species.index()]
    }
}

impl AddAssign<&CardVector> for CardVector {
    fn add_assign(&mut self, rhs: &CardVector) {
        debug_assert_eq!(self.counts.len(), rhs.counts.len());
        for (a, b) in self.counts.iter_mut().zip(rhs.counts.iter()) {
            *a += b;
        }
    }
}

impl SubAssign<&CardVector> for CardVector {
    fn sub_assign(&mut self, rhs: &CardVector) {
        debug_assert_eq!(self.counts.len(), rhs.counts.len());
        for (a, b) in self.counts.iter_mut().zip(rhs.counts.iter()) {
            debug_assert!(*a >= *b, "card count underflow");
            *a -= b;
        }
    }
}

impl std::fmt::Display for CardVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}
