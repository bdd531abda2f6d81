//! # shanghai-engine
//!
//! Deck, selection, and match engine for Shanghai Draw style card games.
//!
//! ## Design Principles
//!
//! 1. **No Rendering**: Cards are identified by opaque `CardToken`s. A
//!    display layer keeps its own token-to-sprite lookup and drains
//!    `SelectionEvent`s to update visuals.
//!
//! 2. **Rules Are Pluggable**: Match detection is a `MatchRule`. The pool
//!    bookkeeping never changes when the rule does.
//!
//! 3. **Misuse Is An Error, Emptiness Is Not**: Unknown or duplicate cards
//!    return `GameError`; an empty deck or a failed match is a normal result.
//!
//! ## Modules
//!
//! - `core`: Card tokens, RNG, configuration, errors
//! - `cards`: Suits, values, faces, card instances
//! - `deck`: Deck generation, shuffle, draw, reset
//! - `selection`: Pool, selection toggling, match rules, events
//! - `session`: One deck feeding one pool
//!
//! ## Concurrency
//!
//! Everything is synchronous and single-threaded. Types are `Send` but not
//! synchronized; callers serialize activations.

pub mod core;
pub mod cards;
pub mod deck;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardToken, TokenAllocator,
    GameRng,
    DeckConfig, OverflowPolicy, SelectionConfig, SessionConfig,
    GameError, Result,
};

pub use crate::cards::{Card, CardValue, Face, Suit};

pub use crate::deck::{Deck, DeckBuilder};

pub use crate::selection::{
    MatchResult, SelectionEvent, SelectionManager, Toggle, ToggleResult,
    MatchRule, MatchIndices, IdenticalPair, NOfAKind, SameSuitRun, RuleFn,
};

pub use crate::session::GameSession;
