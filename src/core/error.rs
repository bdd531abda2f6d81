//! Error types.
//!
//! Only misuse is an error. Drawing from an empty deck and evaluating a
//! selection that does not match are ordinary outcomes and are reported
//! through `Option` / `MatchResult` instead.

use thiserror::Error;

use super::entity::CardToken;
use crate::cards::{CardValue, Suit};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Bad construction parameters (negative joker count, zero decks, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Suit and value cannot appear together on one card.
    #[error("Invalid card combination: {value} of {suit}")]
    InvalidCombination { suit: Suit, value: CardValue },

    /// Card is already in the pool.
    #[error("Duplicate card: {0}")]
    DuplicateCard(CardToken),

    /// Card is not in the pool.
    #[error("Unknown card: {0}")]
    UnknownCard(CardToken),

    /// The token allocator has no fresh tokens left.
    #[error("Card tokens exhausted after {0}")]
    TokensExhausted(CardToken),
}

pub type Result<T> = std::result::Result<T, GameError>;
