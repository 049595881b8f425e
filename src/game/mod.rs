//! The rules engine: configuration, events, and game state.

pub mod config;
pub mod error;
pub mod event;
pub mod state;

pub use config::GameConfig;
pub use error::GameError;
pub use event::{Action, Event};
pub use state::{GameState, GameStateBuilder};
