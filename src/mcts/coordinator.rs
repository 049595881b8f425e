//! Synchronized simulation of the game and every observer tree.
//!
//! The coordinator owns the single authoritative `GameState` and one
//! `InfoSetTree` per player, and replays one shared event stream into all
//! of them: the game mutates first, then every tree observes the
//! post-event state. Between iterations the game is rebuilt from an
//! immutable snapshot while the trees keep their accumulated statistics.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::game::{Action, Event, GameState};

use super::config::SearchConfig;
use super::error::SearchError;
use super::tree::InfoSetTree;

/// The authoritative game plus one information-set tree per player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Coordinator {
    /// Pristine copy of the root state, used to reset between iterations.
    snapshot: GameState,

    /// The live simulated game.
    game: GameState,

    /// One tree per player, all rooted at the root state.
    trees: PlayerMap<InfoSetTree>,
}

impl Coordinator {
    /// Set up a simulation of `root`: two deep copies of the state (reset
    /// snapshot + live game) and a tree per player rooted at it.
    #[must_use]
    pub fn new(root: &GameState) -> Self {
        let game = root.clone();
        let trees = PlayerMap::new(root.config().player_count, |player| {
            InfoSetTree::new(player, &game)
        });
        Self {
            snapshot: root.clone(),
            game,
            trees,
        }
    }

    /// The live game.
    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// A player's tree.
    #[must_use]
    pub fn tree(&self, player: PlayerId) -> &InfoSetTree {
        &self.trees[player]
    }

    /// Apply one event to the game, then let every tree observe it.
    pub fn apply_event(&mut self, event: &Event) {
        self.game.apply_event(event);
        for tree in self.trees.values_mut() {
            tree.apply_event(&self.game, event);
        }
    }

    /// Ask the on-turn player's tree for an action.
    pub fn select_action(
        &mut self,
        config: &SearchConfig,
        rng: &mut GameRng,
    ) -> Result<Action, SearchError> {
        let turn = self.game.turn();
        self.trees[turn].select_action(&self.game, config, rng)
    }

    /// The on-turn player's best root action by visit count.
    pub fn best_action(&self) -> Result<Action, SearchError> {
        self.trees[self.game.turn()].best_action()
    }

    /// Turn passes in the live game.
    pub fn advance_turn(&mut self) {
        self.game.advance_turn();
    }

    /// Record a finished game into every tree.
    pub fn backpropagate(&mut self, winner: PlayerId) {
        for tree in self.trees.values_mut() {
            tree.backpropagate(winner);
        }
    }

    /// Rebuild the live game from the snapshot and park every tree back at
    /// its root. Tree statistics survive; they accumulate across the whole
    /// search.
    pub fn reset_for_next_iteration(&mut self) {
        self.game = self.snapshot.clone();
        for tree in self.trees.values_mut() {
            tree.reset();
        }
    }

    /// Total nodes across all trees.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trees.values().map(InfoSetTree::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardVector, Species};
    use crate::game::GameConfig;
    use crate::mcts::tree::Phase;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn root_state() -> GameState {
        GameState::builder(GameConfig::new(2, 2, 2))
            .deck(&[2, 2])
            .hand(p(0), &[1, 1])
            .hand(p(1), &[1, 0])
            .build()
    }

    #[test]
    fn test_new_builds_tree_per_player() {
        let sim = Coordinator::new(&root_state());

        assert_eq!(sim.tree(p(0)).owner(), p(0));
        assert_eq!(sim.tree(p(1)).owner(), p(1));
        assert_eq!(sim.node_count(), 2);
    }

    #[test]
    fn test_apply_event_updates_game_and_all_trees() {
        let mut sim = Coordinator::new(&root_state());

        let event = Action::new(p(0), Species::new(0), 1).to_event(2);
        sim.apply_event(&event);

        // Authoritative game moved the card.
        assert_eq!(sim.game().hand(p(0)).as_slice(), &[0, 1]);
        assert_eq!(sim.game().field().as_slice(), &[1, 0]);

        // A public play is novel for both observers.
        assert_eq!(sim.tree(p(0)).len(), 2);
        assert_eq!(sim.tree(p(1)).len(), 2);
        // Post-action only in the actor's own tree.
        let own = sim.tree(p(0));
        let other = sim.tree(p(1));
        assert!(own.get(own.cursor()).is_post_action());
        assert!(!other.get(other.cursor()).is_post_action());
    }

    #[test]
    fn test_opponent_draw_only_novel_for_drawer() {
        let mut sim = Coordinator::new(&root_state());

        let event = Event::Draw {
            who: p(0),
            cards: CardVector::from_counts(&[1, 0]),
        };
        sim.apply_event(&event);

        // The drawer sees a new hand; the opponent's view is unchanged
        // (deck + drawer's hand is the same jungle).
        assert_eq!(sim.tree(p(0)).len(), 2);
        assert_eq!(sim.tree(p(1)).len(), 1);
        assert_eq!(sim.tree(p(0)).phase(), Phase::RollingOut);
        assert_eq!(sim.tree(p(1)).phase(), Phase::Selecting);
    }

    #[test]
    fn test_select_action_delegates_to_on_turn_tree() {
        let mut sim = Coordinator::new(&root_state());
        let config = SearchConfig::default();
        let mut rng = GameRng::new(42);

        let action = sim.select_action(&config, &mut rng).unwrap();
        assert_eq!(action.actor, p(0));

        sim.advance_turn();
        let action = sim.select_action(&config, &mut rng).unwrap();
        assert_eq!(action.actor, p(1));
    }

    #[test]
    fn test_reset_restores_game_but_keeps_statistics() {
        let root = root_state();
        let mut sim = Coordinator::new(&root);

        let event = Action::new(p(0), Species::new(0), 1).to_event(2);
        sim.apply_event(&event);
        sim.advance_turn();
        sim.backpropagate(p(0));

        sim.reset_for_next_iteration();

        assert_eq!(sim.game(), &root);
        // Trees kept their nodes and visit counts.
        assert_eq!(sim.tree(p(0)).len(), 2);
        let tree = sim.tree(p(0));
        assert_eq!(tree.get(tree.root()).visits, 1);
        assert_eq!(tree.cursor(), tree.root());
        assert_eq!(tree.phase(), Phase::Selecting);
    }

    #[test]
    fn test_backpropagate_reaches_every_tree() {
        let mut sim = Coordinator::new(&root_state());

        let event = Action::new(p(0), Species::new(0), 1).to_event(2);
        sim.apply_event(&event);
        sim.backpropagate(p(1));

        for player in [p(0), p(1)] {
            let tree = sim.tree(player);
            assert_eq!(tree.get(tree.root()).visits, 1);
        }
    }
}
