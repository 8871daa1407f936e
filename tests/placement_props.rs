//! Property tests for the placement rule over reachable tables.

use std::collections::BTreeSet;

use proptest::collection::btree_set;
use proptest::prelude::*;

use bullheads::game::{Card, Rows, ROW_CAPACITY};

/// A reachable table plus a card not currently on it.
///
/// Draws 5..=21 distinct values, withholds one as the card to play, seeds
/// the rows with the four lowest of the rest, and deals the remainder in
/// ascending order through the real placement rule.
fn table_and_card() -> impl Strategy<Value = (Rows, Card)> {
    (btree_set(1u8..=104, 5..=21), any::<prop::sample::Index>()).prop_map(|(values, pick)| {
        let mut values: Vec<u8> = values.into_iter().collect();
        let played = values.remove(pick.index(values.len()));

        let starters = [values[0], values[1], values[2], values[3]].map(Card::new);
        let mut rows = Rows::seeded(starters);
        for &value in &values[4..] {
            rows.place(Card::new(value));
        }
        (rows, Card::new(played))
    })
}

fn table_values(rows: &Rows) -> BTreeSet<u8> {
    rows.rows()
        .iter()
        .flat_map(|row| row.cards().iter().map(|c| c.value()))
        .collect()
}

proptest! {
    #[test]
    fn prop_placement_is_deterministic((rows, card) in table_and_card()) {
        let mut a = rows.clone();
        let mut b = rows.clone();

        prop_assert_eq!(a.place(card), b.place(card));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_rows_stay_legal((rows, card) in table_and_card()) {
        let mut rows = rows;
        rows.place(card);

        for row in rows.rows() {
            prop_assert!(!row.is_empty());
            prop_assert!(row.len() <= ROW_CAPACITY);
            for pair in row.cards().windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn prop_collected_heads_match_removed_cards((rows, card) in table_and_card()) {
        let mut before = table_values(&rows);
        before.insert(card.value());

        let mut rows = rows;
        let collected = rows.place(card);
        let after = table_values(&rows);

        // whatever left the table is exactly what was charged
        let removed_heads: u32 = before
            .difference(&after)
            .map(|&value| Card::new(value).heads())
            .sum();
        prop_assert_eq!(collected, removed_heads);

        // the played card is always on the table afterwards
        prop_assert!(after.contains(&card.value()));
    }
}
