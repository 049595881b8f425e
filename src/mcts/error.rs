//! Search error taxonomy.

use thiserror::Error;

use crate::game::GameError;

/// Errors raised during a search.
///
/// Rules-engine errors are fatal to the simulated iteration they occur in
/// (the iteration is aborted without backpropagating); `NoLegalAction` is
/// recovered by the driver as a pass.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A rules-engine error surfaced mid-simulation.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A UCB score was requested for a node that is not a visited
    /// post-action node.
    ///
    /// The try-every-action-once expansion policy guarantees this never
    /// happens; hitting it means an internal invariant was violated.
    #[error("UCB score requested for an unvisited or neutral node")]
    PrematureUcb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_game_error_converts() {
        let err: SearchError = GameError::NoLegalAction {
            player: PlayerId::new(0),
        }
        .into();

        assert!(matches!(
            err,
            SearchError::Game(GameError::NoLegalAction { .. })
        ));
        assert_eq!(err.to_string(), "player0 has no legal action");
    }
}
