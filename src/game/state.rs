//! The rules engine.
//!
//! `GameState` holds the full (hidden-information-inclusive) truth of one
//! game: the deck, the face-up field, every hand, scores, and whose turn it
//! is. It is mutated exclusively through `apply_event`, and cloned wholesale
//! when the search needs a snapshot.

use serde::{Deserialize, Serialize};

use crate::core::{CardVector, GameRng, PlayerId, PlayerMap, Species};

use super::config::GameConfig;
use super::error::GameError;
use super::event::{Action, Event};

/// Full game state, including information hidden from individual players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,

    /// Cards remaining in the face-down deck.
    deck: CardVector,

    /// Cards played face-up, by species.
    field: CardVector,

    /// One hand per player.
    hands: PlayerMap<CardVector>,

    /// Cards scored by each player. Scored cards leave circulation.
    scores: PlayerMap<u32>,

    /// Player on turn.
    turn: PlayerId,
}

impl GameState {
    /// Standard setup: full deck (`deck_per_species` copies of each
    /// species), empty field and hands, player 0 on turn.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let n = config.n_species;
        let deck = CardVector::from_counts(&vec![config.deck_per_species(); n]);
        let players = config.player_count;
        Self {
            config,
            deck,
            field: CardVector::zeros(n),
            hands: PlayerMap::with_value(players, CardVector::zeros(n)),
            scores: PlayerMap::with_value(players, 0),
            turn: PlayerId::new(0),
        }
    }

    /// Start building an arbitrary state.
    #[must_use]
    pub fn builder(config: GameConfig) -> GameStateBuilder {
        GameStateBuilder::new(config)
    }

    /// Game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The deck.
    #[must_use]
    pub fn deck(&self) -> &CardVector {
        &self.deck
    }

    /// The field.
    #[must_use]
    pub fn field(&self) -> &CardVector {
        &self.field
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &CardVector {
        &self.hands[player]
    }

    /// A player's score.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    /// Player on turn.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Turn passes to the next player.
    pub fn advance_turn(&mut self) {
        self.turn = self.turn.next(self.config.player_count);
    }

    /// A player's aggregated view of all cards they cannot attribute to the
    /// deck or to a specific opponent hand: deck + every other hand.
    #[must_use]
    pub fn jungle(&self, player: PlayerId) -> CardVector {
        let mut jungle = self.deck.clone();
        for (p, hand) in self.hands.iter() {
            if p != player {
                jungle += hand;
            }
        }
        jungle
    }

    /// Every legal move for a player: for each species held, every count
    /// from 1 up to the held count. Species-major, count-minor order.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        let mut actions = Vec::new();
        for (species, held) in self.hands[player].nonzero() {
            for count in 1..=held {
                actions.push(Action::new(player, species, count));
            }
        }
        actions
    }

    /// Apply one event, mutating the state in place.
    ///
    /// A `Play` that brings a species' field count to 3 or more triggers
    /// the chase effect as an automatic consequence; no separate event is
    /// emitted for it.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::Draw { who, cards } => {
                self.deck -= cards;
                self.hands[*who] += cards;
            }
            Event::Play { who, cards } => {
                self.hands[*who] -= cards;
                self.field += cards;

                if let Some((species, _)) = cards.single_species() {
                    self.resolve_chase(*who, species);
                }
            }
        }
    }

    /// Chase effect: when the played species has 3+ on the field, the
    /// nearest lower-index species with a nonzero field count is chased
    /// away and its cards score for the acting player. Species 0 wraps to
    /// the highest index instead of scanning down.
    fn resolve_chase(&mut self, who: PlayerId, species: Species) {
        if self.field[species] < 3 {
            return;
        }

        let a = species.index();
        let counts = self.field.as_slice();
        let target = if a == 0 {
            let last = self.config.n_species - 1;
            (last != a && counts[last] > 0).then_some(last)
        } else {
            (0..a).rev().find(|&f| counts[f] > 0)
        };

        if let Some(f) = target {
            let f = Species::new(f as u8);
            let chased = self.field[f];
            self.scores[who] += chased;
            self.field -= &CardVector::one_hot(self.config.n_species, f, chased);
        }
    }

    /// Sample the on-turn player's draw: up to hand capacity, capped by the
    /// deck, one card at a time without replacement, each weighted by the
    /// remaining count of its species.
    ///
    /// Returns a `Draw` event covering the whole batch; the event is empty
    /// (and applying it a no-op) when the hand is full or the deck is
    /// empty. Does not mutate the state.
    pub fn random_draw(&self, rng: &mut GameRng) -> Result<Event, GameError> {
        let who = self.turn;
        let in_hand = self.hands[who].sum();
        let to_draw = self
            .config
            .hand_capacity
            .saturating_sub(in_hand)
            .min(self.deck.sum());

        let mut cards = CardVector::zeros(self.config.n_species);
        for drawn in 0..to_draw {
            let remaining: Vec<u32> = self
                .deck
                .as_slice()
                .iter()
                .zip(cards.as_slice())
                .map(|(d, c)| d - c)
                .collect();

            let idx = rng
                .sample_weighted(&remaining)
                .ok_or(GameError::ExhaustedDeck {
                    owed: to_draw - drawn,
                })?;
            cards += &CardVector::one_hot(self.config.n_species, Species::new(idx as u8), 1);
        }

        Ok(Event::Draw { who, cards })
    }

    /// The game ends when the deck is empty and at least one hand is empty.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.deck.is_empty() && self.hands.values().any(|h| h.is_empty())
    }

    /// Player with the highest score. Ties go to the lowest player index.
    #[must_use]
    pub fn leading_player(&self) -> PlayerId {
        let mut best = PlayerId::new(0);
        for (p, &score) in self.scores.iter() {
            if score > self.scores[best] {
                best = p;
            }
        }
        best
    }

    /// Total cards in circulation plus cards scored. Constant over every
    /// event application.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.deck.sum()
            + self.field.sum()
            + self.hands.values().map(CardVector::sum).sum::<u32>()
            + self.scores.values().sum::<u32>()
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "turn:  {}", self.turn)?;
        writeln!(f, "deck:  {}", self.deck)?;
        writeln!(f, "field: {}", self.field)?;
        for (p, hand) in self.hands.iter() {
            writeln!(f, "{}: {} score {}", p, hand, self.scores[p])?;
        }
        Ok(())
    }
}

/// Builder for assembling arbitrary game states in tests and at the search
/// root.
pub struct GameStateBuilder {
    state: GameState,
}

impl GameStateBuilder {
    /// Start from an empty state (empty deck, field, hands) under `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let n = config.n_species;
        let players = config.player_count;
        Self {
            state: GameState {
                config,
                deck: CardVector::zeros(n),
                field: CardVector::zeros(n),
                hands: PlayerMap::with_value(players, CardVector::zeros(n)),
                scores: PlayerMap::with_value(players, 0),
                turn: PlayerId::new(0),
            },
        }
    }

    /// Set the deck counts.
    #[must_use]
    pub fn deck(mut self, counts: &[u32]) -> Self {
        assert_eq!(counts.len(), self.state.config.n_species);
        self.state.deck = CardVector::from_counts(counts);
        self
    }

    /// Set the field counts.
    #[must_use]
    pub fn field(mut self, counts: &[u32]) -> Self {
        assert_eq!(counts.len(), self.state.config.n_species);
        self.state.field = CardVector::from_counts(counts);
        self
    }

    /// Set a player's hand.
    #[must_use]
    pub fn hand(mut self, player: PlayerId, counts: &[u32]) -> Self {
        assert_eq!(counts.len(), self.state.config.n_species);
        self.state.hands[player] = CardVector::from_counts(counts);
        self
    }

    /// Set a player's score.
    #[must_use]
    pub fn score(mut self, player: PlayerId, score: u32) -> Self {
        self.state.scores[player] = score;
        self
    }

    /// Set the player on turn.
    #[must_use]
    pub fn turn(mut self, player: PlayerId) -> Self {
        assert!(player.index() < self.state.config.player_count);
        self.state.turn = player;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> GameState {
        self.state
    }
}
