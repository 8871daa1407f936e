//! Arena-based search tree.
//!
//! A flat `Vec<SearchNode>` with index references: cache-friendly, trivially
//! droppable as a unit when the decision completes, and free of ownership
//! cycles despite every node carrying a parent back-index.

use serde::{Deserialize, Serialize};

use crate::game::{Card, GameState};

use super::node::{NodeId, SearchNode};

/// Arena holding one decision's search tree. Built fresh per decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree rooted at the given decision state.
    #[must_use]
    pub fn new(root_state: GameState) -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(SearchNode::root(root_state));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a child of `parent` reached by `action`, linking it in.
    pub fn alloc_child(&mut self, parent: NodeId, action: Card, state: GameState) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SearchNode::child(parent, action, state));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes (never true after construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Aggregate statistics over the whole tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal()).count(),
            total_visits: self.get(self.root).visits,
        }
    }
}

/// Summary of a finished search tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeStats {
    /// Total nodes allocated.
    pub node_count: usize,

    /// Nodes whose state is terminal.
    pub terminal_count: usize,

    /// Visits recorded at the root (= completed simulations).
    pub total_visits: u32,
}
