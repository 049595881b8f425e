//! Player identification and per-player storage.
//!
//! Hands, scores, and search trees are all stored per player; `PlayerMap`
//! keeps them in a flat `Vec` indexed by `PlayerId` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier. Indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player after this one in turn order.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self((self.index() + 1) as u8 % player_count as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player{}", self.0)
    }
}

/// Per-player data with O(1) access, backed by a `Vec<T>` with one entry
/// per player.
///
/// ## Example
///
/// ```
/// use kariba_mcts::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// scores[PlayerId::new(1)] += 4;
/// assert_eq!(scores[PlayerId::new(1)], 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new map with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, mut factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new map with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over values mutably.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
