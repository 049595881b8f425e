//! Actions and the event stream.
//!
//! Events are the sole state-mutation channel: the authoritative game and
//! every player's search tree consume the same ordered stream. A `Play`
//! event moves cards of a single species from a hand to the field; a `Draw`
//! event moves a sampled batch from the deck to a hand.

use serde::{Deserialize, Serialize};

use crate::core::{CardVector, PlayerId, Species};

/// A player's move: play `count` cards of one species from hand to field.
///
/// This is the type the search returns and the type legal-move enumeration
/// produces; `to_event` lifts it into the event stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The player making the move.
    pub actor: PlayerId,

    /// The species being played.
    pub species: Species,

    /// How many cards of that species (>= 1).
    pub count: u32,
}

impl Action {
    /// Create an action.
    #[must_use]
    pub fn new(actor: PlayerId, species: Species, count: u32) -> Self {
        debug_assert!(count >= 1, "an action plays at least one card");
        Self {
            actor,
            species,
            count,
        }
    }

    /// The cards this action moves, as a count-vector.
    #[must_use]
    pub fn cards(&self, n_species: usize) -> CardVector {
        CardVector::one_hot(n_species, self.species, self.count)
    }

    /// Lift into a `Play` event.
    #[must_use]
    pub fn to_event(&self, n_species: usize) -> Event {
        Event::Play {
            who: self.actor,
            cards: self.cards(n_species),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} plays {}x {}", self.actor, self.count, self.species)
    }
}

/// One entry in the event stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Cards moved deck -> hand.
    Draw { who: PlayerId, cards: CardVector },

    /// Cards moved hand -> field. All of one species.
    Play { who: PlayerId, cards: CardVector },
}

impl Event {
    /// The player the event belongs to.
    #[must_use]
    pub fn who(&self) -> PlayerId {
        match self {
            Event::Draw { who, .. } | Event::Play { who, .. } => *who,
        }
    }

    /// The cards the event moves.
    #[must_use]
    pub fn cards(&self) -> &CardVector {
        match self {
            Event::Draw { cards, .. } | Event::Play { cards, .. } => cards,
        }
    }

    /// The action form of a `Play` event, if it is one.
    #[must_use]
    pub fn as_action(&self) -> Option<Action> {
        match self {
            Event::Play { who, cards } => {
                let (species, count) = cards.single_species()?;
                Some(Action::new(*who, species, count))
            }
            Event::Draw { .. } => None,
        }
    }
}
