//! The outer search loop.
//!
//! One iteration = one simulated game played to completion: alternate a
//! deck draw and a selected action for the player on turn, advance the
//! turn, repeat until terminal; then the leading player is backpropagated
//! into every observer tree and the simulation is reset. After all
//! iterations, the answer is the most-visited root action of the player on
//! turn at the root state.

use std::time::Instant;

use crate::core::{GameRng, PlayerId};
use crate::game::{Action, GameError, GameState};

use super::config::SearchConfig;
use super::coordinator::Coordinator;
use super::error::SearchError;
use super::stats::SearchStats;

/// Multiple-observer information-set MCTS driver.
///
/// Owns the configuration, the master RNG, and the statistics of the last
/// run. Each iteration plays on its own RNG fork, so a run is a pure
/// function of the seed and the root state.
pub struct Search {
    config: SearchConfig,
    rng: GameRng,
    stats: SearchStats,
}

impl Search {
    /// Create a search context.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Run `iterations` simulated games from `root` and return the best
    /// action for the player on turn at `root`.
    ///
    /// A rules-engine failure aborts only the iteration it occurs in: the
    /// partial game is discarded without backpropagation, the abort is
    /// counted and logged, and the search moves on.
    pub fn run(&mut self, root: &GameState, iterations: u32) -> Result<Action, SearchError> {
        let start = Instant::now();
        self.stats.reset();

        let mut sim = Coordinator::new(root);

        for iteration in 0..iterations {
            let mut rng = self.rng.fork();
            match Self::play_out(&mut sim, &self.config, &mut rng) {
                Ok(winner) => {
                    sim.backpropagate(winner);
                    self.stats.iterations += 1;
                    tracing::trace!(iteration, winner = %winner, "simulated game finished");
                }
                Err(err) => {
                    self.stats.aborted_iterations += 1;
                    tracing::warn!(iteration, %err, "iteration aborted; discarded without backpropagation");
                }
            }
            sim.reset_for_next_iteration();
        }

        self.stats.nodes = sim.node_count();
        self.stats.time_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            iterations = self.stats.iterations,
            aborted = self.stats.aborted_iterations,
            nodes = self.stats.nodes,
            "search complete"
        );

        sim.best_action()
    }

    /// Play one simulated game to completion, returning the winner.
    ///
    /// A player with no legal action passes; every other selection error
    /// is fatal to the iteration.
    fn play_out(
        sim: &mut Coordinator,
        config: &SearchConfig,
        rng: &mut GameRng,
    ) -> Result<PlayerId, SearchError> {
        while !sim.game().is_terminal() {
            let draw = sim.game().random_draw(rng)?;
            sim.apply_event(&draw);

            match sim.select_action(config, rng) {
                Ok(action) => {
                    let event = action.to_event(sim.game().config().n_species);
                    sim.apply_event(&event);
                }
                Err(SearchError::Game(GameError::NoLegalAction { .. })) => {
                    // Pass: the turn advances without a play.
                }
                Err(err) => return Err(err),
            }

            sim.advance_turn();
        }

        Ok(sim.game().leading_player())
    }

    /// Statistics of the last run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

/// Search with the default configuration.
///
/// The entry point for callers that just want an answer: run `iterations`
/// simulated games from `root` and return the best action for the player
/// on turn.
pub fn search(root: &GameState, iterations: u32) -> Result<Action, SearchError> {
    Search::new(SearchConfig::default()).run(root, iterations)
}
