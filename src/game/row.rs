//! Table rows and the shared placement rule.
//!
//! This is the one implementation of "where does a played card land" used by
//! both the live round loop and simulated rollouts. The search's value
//! estimates are only as good as this equivalence.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use super::error::GameError;

/// Cards a row holds before the next append collects it.
pub const ROW_CAPACITY: usize = 5;

/// Rows on the table.
pub const ROW_COUNT: usize = 4;

/// One ordered row of cards, strictly increasing by value.
///
/// Invariant: never more than `ROW_CAPACITY` cards, and the last card always
/// carries the row's maximum value. Cards are only ever appended in
/// increasing order or the row is collected first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cards: SmallVec<[Card; ROW_CAPACITY]>,
}

impl Row {
    /// A row holding a single starter card.
    #[must_use]
    pub fn seeded(card: Card) -> Self {
        let mut cards = SmallVec::new();
        cards.push(card);
        Self { cards }
    }

    /// The row's highest (last) value. `None` only before seeding.
    #[must_use]
    pub fn last(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Number of cards in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the row holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The row's cards in placement order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Total heads currently sitting in the row.
    #[must_use]
    pub fn heads(&self) -> u32 {
        self.cards.iter().map(|c| c.heads()).sum()
    }

    /// Append a card to a non-full row.
    fn push(&mut self, card: Card) {
        debug_assert!(self.cards.len() < ROW_CAPACITY, "row overfilled");
        debug_assert!(
            self.last().map_or(true, |last| last < card),
            "row ordering violated"
        );
        self.cards.push(card);
    }

    /// Collect the row: return its heads, clear it, and seat `card` alone.
    fn collect_into(&mut self, card: Card) -> u32 {
        let heads = self.heads();
        self.cards.clear();
        self.cards.push(card);
        heads
    }
}

/// The four table rows and the placement rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rows {
    rows: [Row; ROW_COUNT],
}

impl Rows {
    /// Table seeded with one starter card per row.
    #[must_use]
    pub fn seeded(starters: [Card; ROW_COUNT]) -> Self {
        Self {
            rows: starters.map(Row::seeded),
        }
    }

    /// The rows in table order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// A single row.
    #[must_use]
    pub fn get(&self, index: usize) -> &Row {
        &self.rows[index]
    }

    /// The row that must take `card`, if any can.
    ///
    /// Eligible rows end below `card`; among those, the one with the
    /// smallest positive value difference wins, ties to the lowest index.
    /// An unseeded row counts as ending at 0.
    #[must_use]
    pub fn eligible_row(&self, card: Card) -> Option<usize> {
        let mut best: Option<(usize, u8)> = None;
        for (index, row) in self.rows.iter().enumerate() {
            let last = row.last().map_or(0, Card::value);
            if last >= card.value() {
                continue;
            }
            let diff = card.value() - last;
            if best.map_or(true, |(_, best_diff)| diff < best_diff) {
                best = Some((index, diff));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Default fallback when no row is eligible: the lowest-index row with
    /// the minimum total heads.
    #[must_use]
    pub fn fallback_row(&self) -> usize {
        let mut best = 0;
        let mut best_heads = self.rows[0].heads();
        for (index, row) in self.rows.iter().enumerate().skip(1) {
            let heads = row.heads();
            if heads < best_heads {
                best = index;
                best_heads = heads;
            }
        }
        best
    }

    /// Place `card`, returning the heads the placement collects.
    ///
    /// With an eligible row: append, or collect-and-replace if the row is
    /// full. With none: `fallback` names the row to collect; it is consulted
    /// lazily and its index validated.
    pub fn place_with<F>(&mut self, card: Card, fallback: F) -> Result<u32, GameError>
    where
        F: FnOnce(&Rows) -> usize,
    {
        match self.eligible_row(card) {
            Some(index) => {
                let row = &mut self.rows[index];
                if row.len() == ROW_CAPACITY {
                    Ok(row.collect_into(card))
                } else {
                    row.push(card);
                    Ok(0)
                }
            }
            None => {
                let index = fallback(self);
                if index >= ROW_COUNT {
                    return Err(GameError::IllegalRow { index });
                }
                Ok(self.rows[index].collect_into(card))
            }
        }
    }

    /// Place `card` using the default fallback rule.
    pub fn place(&mut self, card: Card) -> u32 {
        // fallback_row is always in range
        self.place_with(card, Self::fallback_row).unwrap_or(0)
    }
}

impl std::fmt::Display for Rows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            write!(f, "Row {index}:")?;
            for card in row.cards() {
                write!(f, " {card}")?;
            }
            if index + 1 < ROW_COUNT {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(value: u8) -> Card {
        Card::new(value)
    }

    fn table(lasts: [u8; 4]) -> Rows {
        Rows::seeded(lasts.map(card))
    }

    #[test]
    fn test_eligible_row_smallest_difference() {
        let rows = table([1, 2, 3, 4]);

        // 10 beats every row; row 3 (last 4) has the smallest difference
        assert_eq!(rows.eligible_row(card(10)), Some(3));

        // 3 only beats rows 0 and 1; row 1 (last 2) is closer
        assert_eq!(rows.eligible_row(card(3)), Some(1));
    }

    #[test]
    fn test_eligible_row_tie_breaks_low_index() {
        // rows 1 and 3 both end one below the card
        let rows = table([9, 19, 30, 19]);
        assert_eq!(rows.eligible_row(card(20)), Some(1));
    }

    #[test]
    fn test_no_eligible_row() {
        let rows = table([50, 60, 70, 80]);
        assert_eq!(rows.eligible_row(card(10)), None);
    }

    #[test]
    fn test_append_collects_nothing() {
        let mut rows = table([1, 2, 3, 4]);
        assert_eq!(rows.place(card(10)), 0);
        assert_eq!(rows.get(3).cards(), &[card(4), card(10)]);
    }

    #[test]
    fn test_full_row_is_collected_on_sixth_card() {
        let mut rows = table([1, 2, 3, 4]);
        for value in [5, 6, 7, 8] {
            assert_eq!(rows.place(card(value)), 0);
        }
        assert_eq!(rows.get(3).len(), ROW_CAPACITY);

        // 4 + 5 + 6 + 7 + 8 carry 1 + 2 + 1 + 1 + 1 heads
        let collected = rows.place(card(9));
        assert_eq!(collected, 6);
        assert_eq!(rows.get(3).cards(), &[card(9)]);
    }

    #[test]
    fn test_fallback_collects_min_heads_row() {
        // row heads: 1, 2, 5, 1 -> fallback is row 0 (tie to lowest index)
        let mut rows = table([3, 15, 22, 4]);
        assert_eq!(rows.fallback_row(), 0);

        let collected = rows.place(card(1));
        assert_eq!(collected, 1);
        assert_eq!(rows.get(0).cards(), &[card(1)]);
        // other rows untouched
        assert_eq!(rows.get(2).cards(), &[card(22)]);
    }

    #[test]
    fn test_place_with_rejects_bad_fallback() {
        let mut rows = table([50, 60, 70, 80]);
        let result = rows.place_with(card(10), |_| 7);
        assert_eq!(result, Err(GameError::IllegalRow { index: 7 }));
    }

    #[test]
    fn test_place_is_deterministic() {
        let rows = table([5, 12, 40, 77]);
        for value in [1, 6, 13, 41, 78, 104] {
            let mut a = rows.clone();
            let mut b = rows.clone();
            assert_eq!(a.place(card(value)), b.place(card(value)));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_display_lists_rows() {
        let rows = table([1, 2, 3, 4]);
        let text = format!("{rows}");
        assert!(text.starts_with("Row 0: 1"));
        assert!(text.contains("Row 3: 4"));
    }
}
