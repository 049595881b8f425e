//! Rules-engine error taxonomy.

use thiserror::Error;

use crate::core::PlayerId;

/// Errors raised by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// A draw sampled against a fully depleted remaining pool.
    ///
    /// The sampling distribution has a zero denominator at this point;
    /// raising beats dividing by zero.
    #[error("deck exhausted with {owed} draw(s) still owed")]
    ExhaustedDeck {
        /// Cards that were still to be drawn.
        owed: u32,
    },

    /// A player had to act but has no legal actions (empty hand).
    ///
    /// The search driver recovers from this by passing the turn.
    #[error("{player} has no legal action")]
    NoLegalAction {
        /// The player who could not act.
        player: PlayerId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = GameError::ExhaustedDeck { owed: 3 };
        assert_eq!(e.to_string(), "deck exhausted with 3 draw(s) still owed");

        let e = GameError::NoLegalAction {
            player: PlayerId::new(1),
        };
        assert_eq!(e.to_string(), "player1 has no legal action");
    }
}
