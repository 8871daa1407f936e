//! Cloneable table snapshot and round resolution.
//!
//! `GameState` is a value: the live match owns one, and the search clones it
//! freely. Persistent hands (`im::Vector`) and inline rows keep a clone at
//! O(seats) instead of O(cards), which matters because every simulated round
//! of every rollout clones the state once.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId, PlayerMap};

use super::card::Card;
use super::error::GameError;
use super::policy::CardPolicy;
use super::row::Rows;

/// A player's current hand.
///
/// Backed by a persistent vector: cloning a hand shares structure with the
/// original, and removing a card from the clone leaves the original intact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand(Vector<Card>);

impl Hand {
    /// An empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the hand is out of cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the hand holds `card`.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }

    /// Iterate over the held cards in deal order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.0.iter().copied()
    }

    /// Add a dealt card.
    pub fn push(&mut self, card: Card) {
        self.0.push_back(card);
    }

    /// Remove one copy of `card`. Returns `false` if it was not held.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.0.index_of(&card) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Full-information snapshot of the table: rows, every seat's hand and
/// cumulative heads, and the seat being optimized.
///
/// `resolve_round` mutates in place; `simulate_round` never does. The search
/// relies on the latter: expanding one child of a tree node must not perturb
/// its siblings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    rows: Rows,
    hands: PlayerMap<Hand>,
    heads: PlayerMap<u32>,
    bot: PlayerId,
}

impl GameState {
    /// Assemble a snapshot. `hands` and `heads` must agree on seat count.
    #[must_use]
    pub fn new(rows: Rows, hands: PlayerMap<Hand>, heads: PlayerMap<u32>, bot: PlayerId) -> Self {
        assert_eq!(
            hands.player_count(),
            heads.player_count(),
            "hands and heads must cover the same seats"
        );
        assert!(bot.index() < hands.player_count(), "bot seat out of range");
        Self {
            rows,
            hands,
            heads,
            bot,
        }
    }

    /// The table rows.
    #[must_use]
    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    /// A seat's hand.
    #[must_use]
    pub fn hand(&self, seat: PlayerId) -> &Hand {
        &self.hands[seat]
    }

    /// A seat's cumulative heads.
    #[must_use]
    pub fn heads(&self, seat: PlayerId) -> u32 {
        self.heads[seat]
    }

    /// Cumulative heads for every seat.
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.heads
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// The seat the search optimizes for.
    #[must_use]
    pub fn bot(&self) -> PlayerId {
        self.bot
    }

    /// Clone of this snapshot optimized for `seat` instead.
    #[must_use]
    pub fn rooted_at(&self, seat: PlayerId) -> GameState {
        let mut root = self.clone();
        assert!(seat.index() < root.player_count(), "bot seat out of range");
        root.bot = seat;
        root
    }

    /// Whether the deal is over for the optimized seat.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.hands[self.bot].is_empty()
    }

    /// The optimized seat's playable cards. Empty when terminal.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Card> {
        self.hands[self.bot].iter().collect()
    }

    /// The objective the search minimizes: the optimized seat's heads.
    #[must_use]
    pub fn result(&self) -> u32 {
        self.heads[self.bot]
    }

    /// Resolve one simultaneous round in place.
    ///
    /// Every play is validated against its hand before anything is placed.
    /// Plays then resolve in ascending card-value order, which is what makes
    /// otherwise-simultaneous choices sequentially dependent: a low card can
    /// fill or clear the row a higher card was aiming for.
    ///
    /// `pick_row` supplies a seat's fallback row when no row can take its
    /// card; it is only consulted in that case.
    pub fn resolve_round<F>(
        &mut self,
        plays: &[(PlayerId, Card)],
        mut pick_row: F,
    ) -> Result<(), GameError>
    where
        F: FnMut(PlayerId, &Rows) -> usize,
    {
        // reject illegal plays (including duplicates) before any placement
        let mut hands = self.hands.clone();
        for &(seat, card) in plays {
            if !hands[seat].remove(card) {
                return Err(GameError::IllegalAction {
                    seat,
                    value: card.value(),
                });
            }
        }
        self.hands = hands;

        let mut ordered: SmallVec<[(PlayerId, Card); 8]> = SmallVec::from_slice(plays);
        ordered.sort_by_key(|&(_, card)| card);

        for (seat, card) in ordered {
            let collected = self.rows.place_with(card, |rows| pick_row(seat, rows))?;
            self.heads[seat] += collected;
        }
        Ok(())
    }

    /// Resolve one hypothetical round on a clone and return it.
    ///
    /// The optimized seat plays `bot_card`; every other seat with cards asks
    /// `opponents` for a card against the *pre-round* rows. The receiver is
    /// left untouched.
    pub fn simulate_round(
        &self,
        bot_card: Card,
        opponents: &mut dyn CardPolicy,
        rng: &mut GameRng,
    ) -> Result<GameState, GameError> {
        let mut plays: SmallVec<[(PlayerId, Card); 8]> = SmallVec::new();
        plays.push((self.bot, bot_card));
        for seat in self.hands.player_ids() {
            if seat == self.bot || self.hands[seat].is_empty() {
                continue;
            }
            plays.push((seat, opponents.pick_card(self, seat, rng)?));
        }

        let mut next = self.clone();
        next.resolve_round(&plays, |_, rows| opponents.pick_row(rows))?;
        Ok(next)
    }
}
