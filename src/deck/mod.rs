//! Deck generation, shuffling, and dealing.
//!
//! ## Key Types
//!
//! - `DeckBuilder`: Turns a `DeckConfig` into an ordered card list
//! - `Deck`: Draw pile / dealt set with exactly-once dealing

pub mod builder;
pub mod piles;

pub use builder::DeckBuilder;
pub use piles::Deck;
