//! # kariba-mcts
//!
//! A decision-making engine for a hidden-information, turn-based card
//! game: given a game state, it computes the best next move for the player
//! on turn by running repeated simulated playouts with multiple-observer
//! information-set Monte Carlo tree search (MOISMCTS).
//!
//! ## Design Principles
//!
//! 1. **One tree per observer**: every player's tree encodes only what
//!    that player can see; indistinguishable true states share a node.
//!
//! 2. **Events are the only mutation channel**: the authoritative game and
//!    all trees replay the same ordered event stream.
//!
//! 3. **Deterministic by seed**: all randomness flows through an
//!    explicitly threaded, forkable RNG.
//!
//! ## Modules
//!
//! - `core`: players, species count-vectors, deterministic RNG
//! - `game`: rules engine — state, events, legal moves, the chase effect
//! - `mcts`: the search — trees, coordinator, driver, config, stats

pub mod core;
pub mod game;
pub mod mcts;

// Re-export commonly used types
pub use crate::core::{CardVector, GameRng, GameRngState, PlayerId, PlayerMap, Species};

pub use crate::game::{Action, Event, GameConfig, GameError, GameState, GameStateBuilder};

pub use crate::mcts::{
    search, Coordinator, InfoSetNode, InfoSetTree, NodeId, Phase, PostAction, Search, SearchConfig,
    SearchError, SearchStats, TreeStats,
};
