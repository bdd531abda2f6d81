//! Core engine types: card identity, RNG, configuration, errors.
//!
//! Nothing here knows about suits or values; those live in `cards`.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{CardToken, TokenAllocator};
pub use rng::GameRng;
pub use config::{DeckConfig, OverflowPolicy, SelectionConfig, SessionConfig};
pub use error::{GameError, Result};
