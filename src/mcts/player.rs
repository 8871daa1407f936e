//! The search-backed player.

use crate::core::{GameRng, PlayerId};
use crate::game::{Card, CardPolicy, GameError, GameState};

use super::config::SearchConfig;
use super::search::MctsSearch;
use super::stats::SearchStats;

/// A seat that picks its card by tree search.
///
/// Wraps `MctsSearch` behind the generic `CardPolicy` contract so the round
/// loop treats it like any other player.
pub struct MctsPolicy {
    search: MctsSearch,
}

impl MctsPolicy {
    /// Create a search-backed player.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            search: MctsSearch::new(config),
        }
    }

    /// Counters from the most recent decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        self.search.stats()
    }
}

impl CardPolicy for MctsPolicy {
    fn pick_card(
        &mut self,
        state: &GameState,
        seat: PlayerId,
        _rng: &mut GameRng,
    ) -> Result<Card, GameError> {
        // search over a snapshot rooted at this seat
        let root = state.rooted_at(seat);
        let suggested = self.search.search(&root)?;

        // the search worked on clone-local cards; re-resolve by value
        // against the live hand before handing the card back
        state
            .hand(seat)
            .iter()
            .find(|held| held.value() == suggested.value())
            .ok_or(GameError::IllegalAction {
                seat,
                value: suggested.value(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerMap;
    use crate::game::{Hand, Rows};

    fn state(hands: &[&[u8]]) -> GameState {
        GameState::new(
            Rows::seeded([1, 2, 3, 4].map(Card::new)),
            PlayerMap::new(hands.len(), |p| {
                hands[p.index()].iter().map(|&v| Card::new(v)).collect::<Hand>()
            }),
            PlayerMap::with_value(hands.len(), 0),
            PlayerId::new(0),
        )
    }

    #[test]
    fn test_picked_card_comes_from_the_live_hand() {
        let state = state(&[&[50, 60, 70], &[10, 20, 30]]);
        let mut rng = GameRng::new(0);
        let mut bot = MctsPolicy::new(SearchConfig::default().with_simulations(30));

        let card = bot.pick_card(&state, PlayerId::new(0), &mut rng).unwrap();
        assert!(state.hand(PlayerId::new(0)).contains(card));
    }

    #[test]
    fn test_works_from_any_seat() {
        let state = state(&[&[50, 60], &[10, 20]]);
        let mut rng = GameRng::new(0);
        let mut bot = MctsPolicy::new(SearchConfig::default().with_simulations(20));

        let card = bot.pick_card(&state, PlayerId::new(1), &mut rng).unwrap();
        assert!(state.hand(PlayerId::new(1)).contains(card));
    }

    #[test]
    fn test_empty_seat_is_an_error() {
        let state = state(&[&[], &[10]]);
        let mut rng = GameRng::new(0);
        let mut bot = MctsPolicy::new(SearchConfig::default());

        let err = bot.pick_card(&state, PlayerId::new(0), &mut rng).unwrap_err();
        assert_eq!(err, GameError::EmptyLegalActions);
    }
}
