//! Card values and their penalty heads.

use serde::{Deserialize, Serialize};

/// Number of distinct card values in a deck (1..=104).
pub const DECK_SIZE: u8 = 104;

/// A single card, identified by its face value.
///
/// The penalty is a pure function of the value, so only the value is stored.
/// Cards are plain `Copy` values: hands, rows, and cloned search states all
/// share them freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Create a card with the given face value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Penalty heads this card carries.
    ///
    /// Divisibility rules are layered, later rules overriding earlier ones:
    /// base 1, multiples of 5 carry 2, multiples of 10 carry 3, multiples of
    /// 11 carry 5. Value 55 is the one value divisible by both 5 and 11 and
    /// carries the maximum of 7.
    #[must_use]
    pub fn heads(self) -> u32 {
        let mut heads = 1;
        if self.0 % 5 == 0 {
            heads = 2;
        }
        if self.0 % 10 == 0 {
            heads = 3;
        }
        if self.0 % 11 == 0 {
            heads = 5;
        }
        if self.0 == 55 {
            heads = 7;
        }
        heads
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
