//! Error taxonomy for round resolution and search.
//!
//! Only genuinely abnormal conditions are errors. "No row can take this
//! card" is normal control flow (the fallback-row path), never an error.

use thiserror::Error;

use crate::core::PlayerId;

/// Engine errors.
///
/// An invariant violation aborts the current decision rather than letting a
/// silently wrong action corrupt downstream match results.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A policy returned a card the acting player does not hold. Rejected
    /// before any placement happens.
    #[error("{seat} played {value}, which is not in their hand")]
    IllegalAction { seat: PlayerId, value: u8 },

    /// Search was started from a state with no legal actions. Callers must
    /// guarantee at least one card is playable before searching.
    #[error("no legal actions to search from")]
    EmptyLegalActions,

    /// A fallback row index was outside the table.
    #[error("row index {index} is out of range")]
    IllegalRow { index: usize },
}
