//! Game configuration.

use serde::{Deserialize, Serialize};

/// Structural parameters of a game.
///
/// The defaults are the standard setup: 8 species, hands of 5, 2 players,
/// and a deck holding `max(3, n_species)` copies of every species.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of card species.
    pub n_species: usize,

    /// Maximum hand size; draws refill up to this.
    pub hand_capacity: u32,

    /// Number of players.
    pub player_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            n_species: 8,
            hand_capacity: 5,
            player_count: 2,
        }
    }
}

impl GameConfig {
    /// Create a config, validating the parameters.
    #[must_use]
    pub fn new(n_species: usize, hand_capacity: u32, player_count: usize) -> Self {
        assert!(n_species >= 1, "Need at least 1 species");
        assert!(n_species <= 255, "At most 255 species supported");
        assert!((2..=255).contains(&player_count), "Player count must be 2-255");
        Self {
            n_species,
            hand_capacity,
            player_count,
        }
    }

    /// Set the species count.
    #[must_use]
    pub fn with_species(mut self, n_species: usize) -> Self {
        self.n_species = n_species;
        self
    }

    /// Set the hand capacity.
    #[must_use]
    pub fn with_hand_capacity(mut self, capacity: u32) -> Self {
        self.hand_capacity = capacity;
        self
    }

    /// Set the player count.
    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Copies of each species in the standard full deck.
    #[must_use]
    pub fn deck_per_species(&self) -> u32 {
        (self.n_species as u32).max(3)
    }
}
