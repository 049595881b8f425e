//! Information-set tree nodes.
//!
//! Nodes are arena-allocated: a tree owns a flat `Vec<InfoSetNode>` and
//! nodes reference each other through `NodeId` indices. The parent handle
//! is a plain non-owning index, so the backpropagation walk needs no shared
//! ownership and no reference cycles are possible.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardVector, PlayerId};
use crate::game::{Action, Event, GameState};

use super::error::SearchError;

/// Index into a tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Statistics carried only by post-action nodes: the action that produced
/// the node and how often the owner went on to win from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAction {
    /// The owner's action that led here.
    pub action: Action,

    /// Simulations won from here.
    pub wins: u32,
}

/// One node in a player's information-set tree.
///
/// The node identifies what its owner can observe — own hand, shared
/// field, and the aggregated "jungle" of unattributable cards — not the
/// true game state. Two true states that agree on these fields collapse
/// into the same node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InfoSetNode {
    /// Parent node (NONE for the root). Non-owning back-handle used only
    /// for backpropagation.
    pub parent: NodeId,

    /// The player whose observations this tree encodes.
    pub owner: PlayerId,

    /// Owner's hand at this point.
    pub hand: CardVector,

    /// Shared field at this point.
    pub field: CardVector,

    /// Deck plus all other hands, as the owner sees them.
    pub jungle: CardVector,

    /// Simulations that passed through this node.
    pub visits: u32,

    /// Present iff this node was reached by the owner's own play.
    pub post_action: Option<PostAction>,

    /// Child nodes.
    pub children: SmallVec<[NodeId; 8]>,

    /// Owner actions not yet tried from here. Enumerated lazily on the
    /// first selection made at this node, then popped from until empty.
    pub untried: Option<Vec<Action>>,
}

impl InfoSetNode {
    /// Root node: the owner's view of the game at tree construction.
    #[must_use]
    pub fn root(owner: PlayerId, game: &GameState) -> Self {
        Self {
            parent: NodeId::NONE,
            owner,
            hand: game.hand(owner).clone(),
            field: game.field().clone(),
            jungle: game.jungle(owner),
            visits: 0,
            post_action: None,
            children: SmallVec::new(),
            untried: None,
        }
    }

    /// Node for the owner's view right after `event` produced `game`.
    ///
    /// The node is post-action iff the event is the owner's own play.
    #[must_use]
    pub fn from_event(owner: PlayerId, game: &GameState, event: &Event, parent: NodeId) -> Self {
        let post_action = match event {
            Event::Play { who, .. } if *who == owner => event
                .as_action()
                .map(|action| PostAction { action, wins: 0 }),
            _ => None,
        };

        Self {
            parent,
            owner,
            hand: game.hand(owner).clone(),
            field: game.field().clone(),
            jungle: game.jungle(owner),
            visits: 0,
            post_action,
            children: SmallVec::new(),
            untried: None,
        }
    }

    /// Whether this node was reached by the owner's own play.
    #[must_use]
    pub fn is_post_action(&self) -> bool {
        self.post_action.is_some()
    }

    /// Information-set equivalence: same owner, same post-action flag, and
    /// element-wise equal hand/field/jungle vectors.
    #[must_use]
    pub fn same_information_set(&self, other: &InfoSetNode) -> bool {
        self.owner == other.owner
            && self.is_post_action() == other.is_post_action()
            && self.hand == other.hand
            && self.field == other.field
            && self.jungle == other.jungle
    }

    /// UCB1 score: `w/n + c * sqrt(2 ln(parent_n) / n)`.
    ///
    /// Defined only for post-action nodes with at least one visit; the
    /// try-every-action-once policy guarantees both before scores are
    /// compared.
    pub fn ucb(&self, parent_visits: u32, exploration: f64) -> Result<f64, SearchError> {
        match &self.post_action {
            Some(post) if self.visits > 0 => {
                let n = self.visits as f64;
                let exploit = post.wins as f64 / n;
                let explore = exploration * (2.0 * (parent_visits as f64).ln() / n).sqrt();
                Ok(exploit + explore)
            }
            _ => Err(SearchError::PrematureUcb),
        }
    }

    /// Record one completed simulation through this node.
    pub fn record(&mut self, winner: PlayerId) {
        self.visits += 1;
        if let Some(post) = &mut self.post_action {
            if winner == self.owner {
                post.wins += 1;
            }
        }
    }
}

impl std::fmt::Display for InfoSetNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.post_action {
            Some(post) => write!(
                f,
                "post-action n={} w={} [{}]",
                self.visits, post.wins, post.action
            )?,
            None => write!(f, "neutral n={}", self.visits)?,
        }
        write!(
            f,
            " owner={} hand={} field={} jungle={}",
            self.owner, self.hand, self.field, self.jungle
        )
    }
}
