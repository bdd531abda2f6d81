//! Card - one physical card plus its mutable selection state.
//!
//! `Card` pairs an immutable identity (`CardToken`) and face with two
//! flags a display layer cares about:
//! - `selected`: part of the current selection (owned by `SelectionManager`)
//! - `highlighted`: hover/hint marker, independent of selection
//!
//! Equality and hashing use the token only. Two King of Hearts from
//! different decks are different cards.

use serde::{Deserialize, Serialize};

use super::face::{CardValue, Face, Suit};
use crate::core::entity::CardToken;
use crate::core::error::{GameError, Result};

/// A card instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    token: CardToken,
    face: Face,
    selected: bool,
    #[serde(default)]
    highlighted: bool,
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        std::hash::Hash::hash(&self.token, hasher);
    }
}

impl Card {
    /// Create an unselected card.
    #[must_use]
    pub fn new(token: CardToken, face: Face) -> Self {
        Self {
            token,
            face,
            selected: false,
            highlighted: false,
        }
    }

    /// Create a card with an explicit special flag.
    ///
    /// The flag is derived from the face: a `false` flag on a joker is
    /// overridden, but a `true` flag on an ordinary face is rejected.
    pub fn with_special_flag(token: CardToken, face: Face, is_special: bool) -> Result<Self> {
        if is_special && !face.is_special() {
            return Err(GameError::InvalidCombination {
                suit: face.suit(),
                value: face.value(),
            });
        }
        Ok(Self::new(token, face))
    }

    #[must_use]
    pub const fn token(&self) -> CardToken {
        self.token
    }

    #[must_use]
    pub const fn face(&self) -> Face {
        self.face
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.face.suit()
    }

    #[must_use]
    pub const fn value(&self) -> CardValue {
        self.face.value()
    }

    /// True iff the suit is `Special`.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.face.is_special()
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Mark selected. No-op if already selected.
    pub fn select(&mut self) {
        self.selected = true;
    }

    /// Mark unselected. No-op if not selected.
    pub fn deselect(&mut self) {
        self.selected = false;
    }

    #[must_use]
    pub const fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Set or clear the highlight. Selection is untouched.
    pub fn highlight(&mut self, enable: bool) {
        self.highlighted = enable;
    }

    /// Clear selection and highlight.
    pub(crate) fn reset_state(&mut self) {
        self.selected = false;
        self.highlighted = false;
    }

    /// Artwork lookup key, e.g. `card_hearts_K` or `card_special_joker`.
    #[must_use]
    pub fn asset_key(&self) -> String {
        format!("card_{}_{}", self.suit().label(), self.value().label())
    }

    /// `"<value> of <suit>"`, for logs and tests.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        self.face.to_string()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.face, f)
    }
}
