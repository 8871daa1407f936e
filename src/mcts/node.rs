//! Search tree nodes.
//!
//! Nodes live in an arena (`SearchTree`) and refer to each other by index:
//! children are owned indices, the parent is a plain back-index used only
//! during backpropagation. No reference cycles, no interior mutability.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::game::{Card, GameState};

/// Index into the `SearchTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node" (the root's parent).
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Whether this is the sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// One node of the search tree.
///
/// Owns the `GameState` reached by its action so that expansion and the
/// untried-action computation can read legal cards without replaying the
/// path from the root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    /// Parent index; `NodeId::NONE` for the root.
    pub parent: NodeId,

    /// The card that produced this node from its parent; `None` for the root.
    pub action: Option<Card>,

    /// Owned children, in expansion order.
    pub children: SmallVec<[NodeId; 8]>,

    /// Times this node sat on a backpropagation path.
    pub visits: u32,

    /// Accumulated (negated-heads) value; may be negative.
    pub value: f64,

    /// The table snapshot this node represents.
    pub state: GameState,
}

impl SearchNode {
    /// Root node over the current decision state.
    #[must_use]
    pub fn root(state: GameState) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            children: SmallVec::new(),
            visits: 0,
            value: 0.0,
            state,
        }
    }

    /// Child node reached by playing `action` from `parent`.
    #[must_use]
    pub fn child(parent: NodeId, action: Card, state: GameState) -> Self {
        Self {
            parent,
            action: Some(action),
            children: SmallVec::new(),
            visits: 0,
            value: 0.0,
            state,
        }
    }

    /// Mean accumulated value; 0 before the first visit.
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / f64::from(self.visits)
        }
    }

    /// Whether the bot's hand is empty in this node's state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, PlayerMap};
    use crate::game::{Hand, Rows};

    fn tiny_state(bot_hand: &[u8]) -> GameState {
        GameState::new(
            Rows::seeded([1, 2, 3, 4].map(Card::new)),
            PlayerMap::new(1, |_| bot_hand.iter().map(|&v| Card::new(v)).collect::<Hand>()),
            PlayerMap::with_value(1, 0),
            PlayerId::new(0),
        )
    }

    #[test]
    fn test_node_id_sentinel() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::new(0).is_none());
    }

    #[test]
    fn test_root_node() {
        let node = SearchNode::root(tiny_state(&[10]));

        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.visits, 0);
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_child_node_terminal() {
        let node = SearchNode::child(NodeId::new(0), Card::new(10), tiny_state(&[]));

        assert_eq!(node.action, Some(Card::new(10)));
        assert!(node.is_terminal());
    }

    #[test]
    fn test_mean_value() {
        let mut node = SearchNode::root(tiny_state(&[10]));
        assert_eq!(node.mean_value(), 0.0);

        node.visits = 4;
        node.value = -10.0;
        assert_eq!(node.mean_value(), -2.5);
    }
}
