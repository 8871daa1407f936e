//! Decision policies: how a seated player picks a card and a fallback row.
//!
//! The round loop and the search both talk to players through this one
//! trait. The baseline picks uniformly at random; the search-backed player
//! lives in `crate::mcts`.

use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId};

use super::card::Card;
use super::error::GameError;
use super::row::Rows;
use super::state::GameState;

/// Card-selection capability.
pub trait CardPolicy {
    /// Choose a card from `seat`'s hand given the full table snapshot.
    ///
    /// The returned card must be in `seat`'s hand; round resolution rejects
    /// anything else.
    fn pick_card(
        &mut self,
        state: &GameState,
        seat: PlayerId,
        rng: &mut GameRng,
    ) -> Result<Card, GameError>;

    /// Choose the row to collect when no row can legally take the card.
    fn pick_row(&self, rows: &Rows) -> usize {
        rows.fallback_row()
    }
}

/// Uniform random baseline.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl CardPolicy for RandomPolicy {
    fn pick_card(
        &mut self,
        state: &GameState,
        seat: PlayerId,
        rng: &mut GameRng,
    ) -> Result<Card, GameError> {
        let cards: SmallVec<[Card; 16]> = state.hand(seat).iter().collect();
        rng.choose(&cards)
            .copied()
            .ok_or(GameError::EmptyLegalActions)
    }
}
