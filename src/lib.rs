//! # bullheads
//!
//! A four-row, simultaneous-reveal penalty card game and a Monte Carlo Tree
//! Search bot that plays it.
//!
//! Each round every seated player reveals one card; cards resolve in
//! ascending value order against four table rows, and whoever is forced to
//! collect a row swallows its penalty "heads". Lower cumulative heads win;
//! a match ends once any seat reaches 66.
//!
//! ## Design Principles
//!
//! 1. **One placement rule**: the live round loop and simulated rollouts go
//!    through the same `Rows::place_with`. Any divergence between the two
//!    would silently corrupt the bot's value estimates.
//!
//! 2. **Value-semantics state**: `GameState` is a cheap-to-clone snapshot
//!    (persistent hands via `im`, inline rows via `smallvec`). Every
//!    hypothetical round runs on a fresh clone, so sibling branches of the
//!    search tree never interfere.
//!
//! 3. **Fresh tree per decision**: the search rebuilds its arena-allocated
//!    tree every time the bot must pick a card. Nothing is carried across
//!    decisions.
//!
//! ## Modules
//!
//! - `core`: seat identifiers, per-seat storage, deterministic forkable RNG
//! - `game`: cards, deck, rows, state transitions, decision policies
//! - `mcts`: the search engine and the search-backed player adapter
//! - `sim`: match orchestration and batch simulation reports

pub mod core;
pub mod game;
pub mod mcts;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayerId, PlayerMap};

pub use crate::game::{
    Card, CardPolicy, Deck, GameError, GameState, Hand, RandomPolicy, Row, Rows, DECK_SIZE,
    ROW_CAPACITY, ROW_COUNT,
};

pub use crate::mcts::{
    MctsPolicy, MctsSearch, NodeId, SearchConfig, SearchNode, SearchStats, SearchTree,
};

pub use crate::sim::{MatchConfig, MatchOutcome, MatchRunner, Winner, HEADS_LIMIT};
