//! Card faces: suit and value.
//!
//! A `Face` is what is printed on a card. Many cards can share one face
//! (multi-deck shoes); identity lives in `CardToken`, not here.
//!
//! ## Valid Combinations
//!
//! - Ordinary suits (hearts, clubs, diamonds, spades) take values `2..A`.
//! - The `Special` suit takes only `Joker` or `Wild`.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Clubs,
    Diamonds,
    Spades,
    /// Jokers and wilds.
    Special,
}

impl Suit {
    /// The four ordinary suits, in generation order.
    pub const ORDINARY: [Suit; 4] = [Suit::Hearts, Suit::Clubs, Suit::Diamonds, Suit::Spades];

    /// Every suit, including `Special`.
    pub const ALL: [Suit; 5] = [
        Suit::Hearts,
        Suit::Clubs,
        Suit::Diamonds,
        Suit::Spades,
        Suit::Special,
    ];

    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Suit::Special)
    }

    /// Lowercase label, e.g. `hearts`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Spades => "spades",
            Suit::Special => "special",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Card value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardValue {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Joker,
    Wild,
}

impl CardValue {
    /// The thirteen ordinary values, Two through Ace.
    pub const ORDINARY: [CardValue; 13] = [
        CardValue::Two,
        CardValue::Three,
        CardValue::Four,
        CardValue::Five,
        CardValue::Six,
        CardValue::Seven,
        CardValue::Eight,
        CardValue::Nine,
        CardValue::Ten,
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
        CardValue::Ace,
    ];

    /// The values only the `Special` suit carries.
    pub const SPECIAL: [CardValue; 2] = [CardValue::Joker, CardValue::Wild];

    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, CardValue::Joker | CardValue::Wild)
    }

    /// Numeric rank for ordering runs: Two = 2 .. Ace = 14.
    ///
    /// Returns `None` for jokers and wilds.
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            CardValue::Two => Some(2),
            CardValue::Three => Some(3),
            CardValue::Four => Some(4),
            CardValue::Five => Some(5),
            CardValue::Six => Some(6),
            CardValue::Seven => Some(7),
            CardValue::Eight => Some(8),
            CardValue::Nine => Some(9),
            CardValue::Ten => Some(10),
            CardValue::Jack => Some(11),
            CardValue::Queen => Some(12),
            CardValue::King => Some(13),
            CardValue::Ace => Some(14),
            CardValue::Joker | CardValue::Wild => None,
        }
    }

    /// Short label, e.g. `10`, `K`, `joker`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CardValue::Two => "2",
            CardValue::Three => "3",
            CardValue::Four => "4",
            CardValue::Five => "5",
            CardValue::Six => "6",
            CardValue::Seven => "7",
            CardValue::Eight => "8",
            CardValue::Nine => "9",
            CardValue::Ten => "10",
            CardValue::Jack => "J",
            CardValue::Queen => "Q",
            CardValue::King => "K",
            CardValue::Ace => "A",
            CardValue::Joker => "joker",
            CardValue::Wild => "wild",
        }
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated suit/value pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawFace", into = "RawFace")]
pub struct Face {
    suit: Suit,
    value: CardValue,
}

impl Face {
    /// Create a face, rejecting combinations no deck contains.
    ///
    /// ```
    /// use shanghai_engine::cards::{CardValue, Face, Suit};
    ///
    /// assert!(Face::new(Suit::Hearts, CardValue::King).is_ok());
    /// assert!(Face::new(Suit::Special, CardValue::Joker).is_ok());
    /// assert!(Face::new(Suit::Hearts, CardValue::Joker).is_err());
    /// assert!(Face::new(Suit::Special, CardValue::Ace).is_err());
    /// ```
    pub fn new(suit: Suit, value: CardValue) -> Result<Self> {
        if Self::is_valid_combination(suit, value) {
            Ok(Self { suit, value })
        } else {
            Err(GameError::InvalidCombination { suit, value })
        }
    }

    /// `Special` pairs with jokers/wilds, ordinary suits with ordinary values.
    #[must_use]
    pub const fn is_valid_combination(suit: Suit, value: CardValue) -> bool {
        suit.is_special() == value.is_special()
    }

    /// Every legal face: 52 ordinary faces, then special joker and wild.
    pub fn all_valid() -> impl Iterator<Item = Face> {
        let ordinary = Suit::ORDINARY.into_iter().flat_map(|suit| {
            CardValue::ORDINARY
                .into_iter()
                .map(move |value| Face { suit, value })
        });
        let special = CardValue::SPECIAL.into_iter().map(|value| Face {
            suit: Suit::Special,
            value,
        });
        ordinary.chain(special)
    }

    pub(crate) const fn joker() -> Self {
        Self {
            suit: Suit::Special,
            value: CardValue::Joker,
        }
    }

    pub(crate) const fn wild() -> Self {
        Self {
            suit: Suit::Special,
            value: CardValue::Wild,
        }
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn value(self) -> CardValue {
        self.value
    }

    /// True for jokers and wilds.
    #[must_use]
    pub const fn is_special(self) -> bool {
        self.suit.is_special()
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}

/// Unvalidated wire form of `Face`.
#[derive(Serialize, Deserialize)]
struct RawFace {
    suit: Suit,
    value: CardValue,
}

impl TryFrom<RawFace> for Face {
    type Error = GameError;

    fn try_from(raw: RawFace) -> Result<Self> {
        Face::new(raw.suit, raw.value)
    }
}

impl From<Face> for RawFace {
    fn from(face: Face) -> Self {
        RawFace {
            suit: face.suit,
            value: face.value,
        }
    }
}
