//! Match orchestration: deals, rounds, and batch simulation reports.
//!
//! A match seats the search bot at seat 0 against random baselines, deals
//! hands until any seat's heads reach the limit, and reports per-seat totals
//! plus the winner. The batch runner replays seeded matches and serializes
//! the outcomes as CSV for offline analysis.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::game::{
    CardPolicy, Deck, GameError, GameState, Hand, RandomPolicy, Rows, DECK_SIZE, ROW_COUNT,
};
use crate::mcts::{MctsPolicy, SearchConfig};

/// Heads total that ends a match. Checked between deals: a deal in progress
/// always plays out.
pub const HEADS_LIMIT: u32 = 66;

/// Match parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Random opponents seated after the bot.
    pub opponents: usize,

    /// Cards dealt to each seat per deal.
    pub hand_size: usize,

    /// Seed for dealing and the baseline seats.
    pub seed: u64,

    /// Search parameters for the bot seat.
    pub search: SearchConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            opponents: 1,
            hand_size: 10,
            seed: 42,
            search: SearchConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Set the opponent count.
    #[must_use]
    pub fn with_opponents(mut self, opponents: usize) -> Self {
        self.opponents = opponents;
        self
    }

    /// Set the cards dealt per seat.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the bot's search parameters.
    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

/// Who won a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// Unique seat with the minimum heads.
    Seat(PlayerId),

    /// Two or more seats shared the minimum.
    Tie,
}

impl Winner {
    /// CSV encoding: the winning seat index, or -1 for a tie.
    #[must_use]
    pub fn as_csv(self) -> i32 {
        match self {
            Winner::Seat(seat) => seat.index() as i32,
            Winner::Tie => -1,
        }
    }
}

/// Result of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Cards dealt per seat.
    pub hand_size: usize,

    /// Final heads per seat; seat 0 is the bot.
    pub heads: Vec<u32>,

    /// Deals the match took.
    pub deals: u32,

    /// Winner under the minimum-heads rule.
    pub winner: Winner,
}

impl MatchOutcome {
    fn from_scores(hand_size: usize, deals: u32, scores: &PlayerMap<u32>) -> Self {
        let heads: Vec<u32> = scores.iter().map(|(_, &h)| h).collect();
        let min = heads.iter().copied().min().unwrap_or(0);
        let mut at_min = heads
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h == min)
            .map(|(seat, _)| seat);
        let winner = match (at_min.next(), at_min.next()) {
            (Some(seat), None) => Winner::Seat(PlayerId::new(seat as u8)),
            _ => Winner::Tie,
        };
        Self {
            hand_size,
            heads,
            deals,
            winner,
        }
    }
}

/// Plays matches with one policy per seat.
pub struct MatchRunner {
    config: MatchConfig,
    rng: GameRng,
    policies: Vec<Box<dyn CardPolicy>>,
}

impl MatchRunner {
    /// Standard table: the search bot at seat 0, random baselines after it.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let mut policies: Vec<Box<dyn CardPolicy>> = Vec::with_capacity(config.opponents + 1);
        policies.push(Box::new(MctsPolicy::new(config.search.clone())));
        for _ in 0..config.opponents {
            policies.push(Box::new(RandomPolicy));
        }
        Self::with_policies(config, policies)
    }

    /// Custom seating, e.g. an all-random baseline table.
    #[must_use]
    pub fn with_policies(config: MatchConfig, policies: Vec<Box<dyn CardPolicy>>) -> Self {
        assert!(policies.len() >= 2, "a match needs at least 2 seats");
        assert!(
            policies.len() * config.hand_size + ROW_COUNT <= DECK_SIZE as usize,
            "deck cannot cover this many seats and cards"
        );
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            policies,
        }
    }

    /// Seats at the table.
    #[must_use]
    pub fn seats(&self) -> usize {
        self.policies.len()
    }

    /// Play one full match.
    pub fn play_match(&mut self) -> Result<MatchOutcome, GameError> {
        let seats = self.policies.len();
        let mut scores = PlayerMap::with_value(seats, 0u32);
        let mut deals = 0u32;

        while scores.iter().all(|(_, &h)| h < HEADS_LIMIT) {
            let state = self.deal(scores);
            scores = self.play_deal(state)?;
            deals += 1;
            debug!(deal = deals, scores = ?scores, "deal finished");
        }

        let outcome = MatchOutcome::from_scores(self.config.hand_size, deals, &scores);
        info!(
            deals = outcome.deals,
            heads = ?outcome.heads,
            winner = ?outcome.winner,
            "match finished"
        );
        Ok(outcome)
    }

    /// Fresh rows and hands, carrying the running scores forward.
    fn deal(&mut self, scores: PlayerMap<u32>) -> GameState {
        let seats = self.policies.len();
        let mut deck = Deck::shuffled(&mut self.rng);

        let mut hands = PlayerMap::with_value(seats, Hand::new());
        for _ in 0..self.config.hand_size {
            for seat in PlayerId::all(seats) {
                hands[seat].push(deck.draw().expect("deck covers every hand"));
            }
        }
        let starters = [(); ROW_COUNT].map(|_| deck.draw().expect("deck covers the starter rows"));

        GameState::new(Rows::seeded(starters), hands, scores, PlayerId::new(0))
    }

    /// Rounds until every hand is empty.
    fn play_deal(&mut self, mut state: GameState) -> Result<PlayerMap<u32>, GameError> {
        let seats = self.policies.len();

        while PlayerId::all(seats).any(|seat| !state.hand(seat).is_empty()) {
            let mut plays = Vec::with_capacity(seats);
            for seat in PlayerId::all(seats) {
                if state.hand(seat).is_empty() {
                    continue;
                }
                let card = self.policies[seat.index()].pick_card(&state, seat, &mut self.rng)?;
                plays.push((seat, card));
            }

            let policies = &self.policies;
            state.resolve_round(&plays, |seat, rows| policies[seat.index()].pick_row(rows))?;
        }

        Ok(state.scores().clone())
    }
}

/// Play `matches` seeded matches; match `i` runs with seed `config.seed + i`
/// so a batch is reproducible while its matches stay independent.
pub fn run_batch(config: &MatchConfig, matches: u32) -> Result<Vec<MatchOutcome>, GameError> {
    let mut outcomes = Vec::with_capacity(matches as usize);
    for index in 0..matches {
        let seed = config.seed.wrapping_add(u64::from(index));
        let match_config = config
            .clone()
            .with_seed(seed)
            .with_search(config.search.clone().with_seed(seed));
        let mut runner = MatchRunner::new(match_config);
        outcomes.push(runner.play_match()?);
        debug!(matches_played = index + 1, "batch progress");
    }
    Ok(outcomes)
}

/// Serialize outcomes as CSV: `num_cards`, per-seat heads (seat 0 is the
/// bot), and the winner (-1 for a tie).
pub fn write_csv<W: Write>(mut out: W, outcomes: &[MatchOutcome]) -> io::Result<()> {
    let seats = outcomes.first().map_or(0, |o| o.heads.len());

    write!(out, "num_cards,mcts_heads")?;
    for opponent in 0..seats.saturating_sub(1) {
        write!(out, ",opponent_{opponent}_heads")?;
    }
    writeln!(out, ",winner")?;

    for outcome in outcomes {
        write!(out, "{}", outcome.hand_size)?;
        for heads in &outcome.heads {
            write!(out, ",{heads}")?;
        }
        writeln!(out, ",{}", outcome.winner.as_csv())?;
    }
    Ok(())
}
