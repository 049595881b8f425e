//! Foundation types: players, species count-vectors, deterministic RNG.

pub mod cards;
pub mod player;
pub mod rng;

pub use cards::{CardVector, Species};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
