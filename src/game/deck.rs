//! The 104-card deck.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

use super::card::{Card, DECK_SIZE};

/// A draw pile of the values 1..=104.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full deck in face order, 1 on the bottom.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            cards: (1..=DECK_SIZE).map(Card::new).collect(),
        }
    }

    /// Full deck shuffled with the given RNG.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Draw the top card. `None` once the deck is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remaining cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
