//! Per-player information-set trees.
//!
//! Every player observing the game gets one tree. All players' events pass
//! through every tree: an event that changes nothing the owner can observe
//! (an opponent's draw, say) leaves the cursor in place, an event leading
//! to an already-known information set walks the cursor there, and the
//! first genuinely new information set of a simulated game is appended as
//! exactly one new node — after which the tree stops tracking and the rest
//! of the game is a rollout.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlayerId};
use crate::game::{Action, Event, GameError, GameState};

use super::config::SearchConfig;
use super::error::SearchError;
use super::node::{InfoSetNode, NodeId};

/// What the tree is doing within the current simulated game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Walking known nodes; actions chosen by the expand-then-UCB policy.
    Selecting,

    /// A new node was created this game; actions are uniform random and
    /// the tree no longer grows or moves.
    RollingOut,
}

/// One player's search tree over their information sets.
///
/// Nodes live in a flat arena and reference each other by index; the tree
/// exclusively owns its nodes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InfoSetTree {
    owner: PlayerId,
    nodes: Vec<InfoSetNode>,
    root: NodeId,
    cursor: NodeId,
    phase: Phase,
}

impl InfoSetTree {
    /// Create a tree rooted at the owner's view of `game`.
    #[must_use]
    pub fn new(owner: PlayerId, game: &GameState) -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(InfoSetNode::root(owner, game));
        Self {
            owner,
            nodes,
            root: NodeId::new(0),
            cursor: NodeId::new(0),
            phase: Phase::Selecting,
        }
    }

    /// The player whose observations this tree encodes.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// The root node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The current node ID.
    #[must_use]
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &InfoSetNode {
        &self.nodes[id.raw() as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut InfoSetNode {
        &mut self.nodes[id.raw() as usize]
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, node: InfoSetNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Choose the owner's next action.
    ///
    /// While rolling out: uniform random over the legal actions of the
    /// authoritative `game` — the tree is not consulted and does not grow.
    ///
    /// While selecting: every action at the cursor is tried once, in a
    /// shuffled order fixed on first entry; once all have been tried the
    /// post-action child with the best UCB score wins, ties going to the
    /// lowest child index.
    pub fn select_action(
        &mut self,
        game: &GameState,
        config: &SearchConfig,
        rng: &mut GameRng,
    ) -> Result<Action, SearchError> {
        if self.phase == Phase::RollingOut {
            let actions = game.legal_actions(self.owner);
            return match rng.choose(&actions) {
                Some(action) => Ok(action.clone()),
                None => Err(GameError::NoLegalAction { player: self.owner }.into()),
            };
        }

        let cursor = self.cursor;

        if self.get(cursor).untried.is_none() {
            let mut actions = game.legal_actions(self.owner);
            rng.shuffle(&mut actions);
            self.get_mut(cursor).untried = Some(actions);
        }

        if let Some(action) = self.get_mut(cursor).untried.as_mut().and_then(Vec::pop) {
            return Ok(action);
        }

        // Every action has been tried at least once. An unvisited
        // post-action child (left by an aborted iteration) is retried
        // before any scores are compared, so UCB never sees n == 0.
        let parent_visits = self.get(cursor).visits;
        let mut best: Option<(f64, Action)> = None;
        for &child_id in self.get(cursor).children.iter() {
            let child = self.get(child_id);
            let Some(post) = &child.post_action else {
                continue;
            };
            if child.visits == 0 {
                return Ok(post.action.clone());
            }
            let score = child.ucb(parent_visits, config.exploration)?;
            if best.as_ref().map_or(true, |(b, _)| score > *b) {
                best = Some((score, post.action.clone()));
            }
        }

        match best {
            Some((_, action)) => Ok(action),
            None => Err(GameError::NoLegalAction { player: self.owner }.into()),
        }
    }

    /// Observe one event of the shared stream.
    ///
    /// `game_after` is the authoritative state the event produced. No-op
    /// while rolling out. While selecting, the cursor moves to the node
    /// matching the owner's new view — the cursor itself when the event
    /// changed nothing observable, an existing child when the information
    /// set is already known, or a freshly appended child (which ends the
    /// selection phase for this game).
    pub fn apply_event(&mut self, game_after: &GameState, event: &Event) {
        if self.phase == Phase::RollingOut {
            return;
        }

        let candidate = InfoSetNode::from_event(self.owner, game_after, event, self.cursor);

        if self.get(self.cursor).same_information_set(&candidate) {
            return;
        }

        let matched = self
            .get(self.cursor)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).same_information_set(&candidate));
        if let Some(child) = matched {
            self.cursor = child;
            return;
        }

        let id = self.alloc(candidate);
        let cursor = self.cursor;
        self.get_mut(cursor).children.push(id);
        self.cursor = id;
        self.phase = Phase::RollingOut;
    }

    /// Record a finished game along the cursor's path to the root.
    pub fn backpropagate(&mut self, winner: PlayerId) {
        let mut id = self.cursor;
        while !id.is_none() {
            let node = self.get_mut(id);
            node.record(winner);
            id = node.parent;
        }
    }

    /// Move the cursor back to the root and resume selecting.
    /// Statistics and untried-action lists persist.
    pub fn reset(&mut self) {
        self.cursor = self.root;
        self.phase = Phase::Selecting;
    }

    /// The most-visited action at the root, ties going to the lowest child
    /// index. This is the search's final answer, not a search policy.
    pub fn best_action(&self) -> Result<Action, SearchError> {
        let mut best: Option<(u32, Action)> = None;
        for &child_id in self.get(self.root).children.iter() {
            let child = self.get(child_id);
            if let Some(post) = &child.post_action {
                if best.as_ref().map_or(true, |(n, _)| child.visits > *n) {
                    best = Some((child.visits, post.action.clone()));
                }
            }
        }

        match best {
            Some((_, action)) => Ok(action),
            None => Err(GameError::NoLegalAction { player: self.owner }.into()),
        }
    }

    /// (action, visits) for every post-action child of the root.
    #[must_use]
    pub fn root_visit_counts(&self) -> Vec<(Action, u32)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child
                    .post_action
                    .as_ref()
                    .map(|post| (post.action.clone(), child.visits))
            })
            .collect()
    }

    /// Structural statistics.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            post_action_count: self.nodes.iter().filter(|n| n.is_post_action()).count(),
            root_visits: self.get(self.root).visits,
        }
    }

    fn fmt_subtree(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
    ) -> std::fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.get(id), indent = depth * 4)?;
        for &child in self.get(id).children.iter() {
            self.fmt_subtree(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for InfoSetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_subtree(f, self.root, 0)
    }
}

/// Statistics about one tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total nodes.
    pub node_count: usize,

    /// Nodes carrying UCB statistics.
    pub post_action_count: usize,

    /// Completed games recorded at the root.
    pub root_visits: u32,
}
