//! Selection notifications.
//!
//! The manager queues an event every time a card's visible state changes.
//! A display layer drains the queue after each call and updates its own
//! sprites; the core never reaches into rendering code.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::entity::CardToken;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// Card became selected.
    Selected(CardToken),

    /// Card stopped being selected (toggle, eviction, or clear).
    Deselected(CardToken),

    /// Highlight flag changed.
    Highlighted { token: CardToken, enabled: bool },

    /// Cards retired together by a match, in selection order.
    Matched(SmallVec<[CardToken; 2]>),

    /// Card left the pool without matching.
    Removed(CardToken),
}

impl SelectionEvent {
    /// Tokens that left the pool because of this event.
    #[must_use]
    pub fn retired(&self) -> &[CardToken] {
        match self {
            SelectionEvent::Matched(tokens) => tokens.as_slice(),
            SelectionEvent::Removed(token) => std::slice::from_ref(token),
            _ => &[],
        }
    }
}
