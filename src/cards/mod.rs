//! Card system: faces and card instances.
//!
//! ## Key Types
//!
//! - `Suit`, `CardValue`: What can be printed on a card
//! - `Face`: A validated suit/value pair
//! - `Card`: One card instance (token + face + selection state)
//!
//! ## Special Cards
//!
//! Jokers and wilds use the `Special` suit. Ordinary suits never carry
//! joker/wild values, and `Face::new` enforces that.

pub mod face;
pub mod card;

pub use face::{CardValue, Face, Suit};
pub use card::Card;
