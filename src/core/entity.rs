//! Card identity.
//!
//! Every physical card instance has a unique `CardToken`. Two cards with the
//! same face (e.g. two King of Hearts from a two-deck shoe) still have
//! different tokens.
//!
//! Tokens are opaque: they carry no rendering handle. A display layer keeps
//! its own `CardToken -> sprite` lookup.
//!
//! ## Usage
//!
//! ```
//! use shanghai_engine::core::{CardToken, TokenAllocator};
//!
//! let mut tokens = TokenAllocator::new();
//! let a = tokens.next_token().unwrap();
//! let b = tokens.next_token().unwrap();
//!
//! assert_ne!(a, b);
//! assert_eq!(tokens.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Unique identifier for one card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardToken(pub u32);

impl CardToken {
    /// Create a token from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardToken {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Hands out fresh tokens in increasing order.
///
/// One allocator per deck guarantees tokens are unique within a session.
/// `u32::MAX` is never handed out; once the allocator reaches it every
/// call fails with `TokensExhausted` rather than wrapping around.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenAllocator {
    next: u32,
}

impl TokenAllocator {
    /// Create an allocator starting at token 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first token is `first`.
    ///
    /// Useful when several decks share one session and must not collide.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Allocate the next token.
    pub fn next_token(&mut self) -> Result<CardToken> {
        let token = CardToken(self.next);
        self.next = self
            .next
            .checked_add(1)
            .ok_or(GameError::TokensExhausted(token))?;
        Ok(token)
    }

    /// Number of tokens handed out so far (counting from the start value).
    #[must_use]
    pub const fn allocated(&self) -> u32 {
        self.next
    }
}
