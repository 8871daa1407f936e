//! Monte Carlo Tree Search over cloned table snapshots.
//!
//! ## Overview
//!
//! The bot builds a fresh tree for every card it must pick. Each node owns a
//! full `GameState` clone: expanding a child resolves one hypothetical
//! simultaneous round (opponents modeled by a policy, the bot's card fixed)
//! on a clone, so siblings never interfere.
//!
//! The game is a minimization — fewer heads is better — while UCB1 treats
//! larger as better, so rollout scores are negated before backpropagation.
//!
//! ## Usage
//!
//! ```
//! use bullheads::core::{PlayerId, PlayerMap};
//! use bullheads::game::{Card, GameState, Hand, Rows};
//! use bullheads::mcts::{MctsSearch, SearchConfig};
//!
//! let rows = Rows::seeded([1, 2, 3, 4].map(Card::new));
//! let hands = PlayerMap::new(2, |p| {
//!     let values: &[u8] = if p.index() == 0 { &[50, 60] } else { &[10, 20] };
//!     values.iter().map(|&v| Card::new(v)).collect::<Hand>()
//! });
//! let state = GameState::new(rows, hands, PlayerMap::with_value(2, 0), PlayerId::new(0));
//!
//! let mut search = MctsSearch::new(SearchConfig::default().with_simulations(50));
//! let card = search.search(&state).unwrap();
//! assert!(state.hand(PlayerId::new(0)).contains(card));
//! ```

pub mod config;
pub mod node;
pub mod player;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::SearchConfig;
pub use node::{NodeId, SearchNode};
pub use player::MctsPolicy;
pub use search::MctsSearch;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
