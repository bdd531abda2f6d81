//! Card pool, selection tracking, and match evaluation.
//!
//! External input arrives as "this card was activated" calls. The
//! `SelectionManager` toggles selection, evaluates the configured
//! `MatchRule`, retires matched cards, and queues `SelectionEvent`s for
//! whatever draws the cards.
//!
//! ## Key Types
//!
//! - `SelectionManager`: Pool + ordered selection
//! - `MatchRule`: Pluggable match predicate (`IdenticalPair` by default)
//! - `ToggleResult`, `MatchResult`: Per-call outcomes
//! - `SelectionEvent`: Display notifications

pub mod event;
pub mod manager;
pub mod rules;

pub use event::SelectionEvent;
pub use manager::{MatchResult, SelectionManager, Toggle, ToggleResult};
pub use rules::{IdenticalPair, MatchIndices, MatchRule, NOfAKind, RuleFn, SameSuitRun};
