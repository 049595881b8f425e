//! Multiple-observer information-set Monte Carlo tree search.
//!
//! ## Overview
//!
//! Hidden information is handled by giving every player their own search
//! tree keyed by what that player can observe (own hand, shared field, and
//! the aggregated pool of unattributable cards) rather than by the true
//! game state. All trees consume the same simulated event stream:
//!
//! - **Selection**: while a tree recognizes the information sets it walks
//!   through, the owner's moves are chosen by try-every-action-once, then
//!   UCB over the tried actions.
//! - **Expansion**: the first unseen information set of a simulated game
//!   is added as exactly one new node.
//! - **Rollout**: from then on that tree picks uniformly random legal
//!   moves and stops tracking.
//! - **Backpropagation**: the finished game's leading player is recorded
//!   along each tree's walked path.
//!
//! ## Usage
//!
//! ```
//! use kariba_mcts::core::PlayerId;
//! use kariba_mcts::game::{GameConfig, GameState};
//! use kariba_mcts::mcts::{Search, SearchConfig};
//!
//! let root = GameState::builder(GameConfig::new(2, 2, 2))
//!     .deck(&[3, 3])
//!     .hand(PlayerId::new(0), &[1, 1])
//!     .hand(PlayerId::new(1), &[2, 0])
//!     .build();
//!
//! let mut search = Search::new(SearchConfig::default().with_seed(7));
//! let best = search.run(&root, 200).unwrap();
//! assert!(root.legal_actions(PlayerId::new(0)).contains(&best));
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod node;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::SearchConfig;
pub use coordinator::Coordinator;
pub use error::SearchError;
pub use node::{InfoSetNode, NodeId, PostAction};
pub use search::{search, Search};
pub use stats::SearchStats;
pub use tree::{InfoSetTree, Phase, TreeStats};
