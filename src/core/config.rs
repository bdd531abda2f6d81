//! Engine configuration.
//!
//! A session configures the engine at startup by providing:
//! - `DeckConfig`: Deck composition and shuffle seed
//! - `SelectionConfig`: How many cards may be selected and what happens past that
//! - `SessionConfig`: Combines both
//!
//! All configs are plain serde structs with `Default` and `with_*` builders.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Deck composition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Add special cards (jokers, wilds) to the ordinary set.
    pub include_specials: bool,

    /// Jokers added when `include_specials` is set. Must be >= 0.
    pub num_jokers: i32,

    /// Wild cards added when `include_specials` is set. Must be >= 0.
    pub num_wilds: i32,

    /// Number of 52-card sets in the shoe. Must be >= 1.
    pub decks: u32,

    /// Shuffle seed. Same seed produces the same deal.
    pub seed: u64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            include_specials: false,
            num_jokers: 2,
            num_wilds: 0,
            decks: 1,
            seed: 42,
        }
    }
}

impl DeckConfig {
    /// Include `num_jokers` jokers.
    #[must_use]
    pub fn with_jokers(mut self, num_jokers: i32) -> Self {
        self.include_specials = true;
        self.num_jokers = num_jokers;
        self
    }

    /// Include `num_wilds` wild cards.
    #[must_use]
    pub fn with_wilds(mut self, num_wilds: i32) -> Self {
        self.include_specials = true;
        self.num_wilds = num_wilds;
        self
    }

    /// Toggle special cards without changing the counts.
    #[must_use]
    pub fn with_specials(mut self, include: bool) -> Self {
        self.include_specials = include;
        self
    }

    #[must_use]
    pub fn with_decks(mut self, decks: u32) -> Self {
        self.decks = decks;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the counts.
    pub fn validate(&self) -> Result<()> {
        if self.num_jokers < 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "num_jokers must be >= 0, got {}",
                self.num_jokers
            )));
        }
        if self.num_wilds < 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "num_wilds must be >= 0, got {}",
                self.num_wilds
            )));
        }
        if self.decks == 0 {
            return Err(GameError::InvalidConfiguration(
                "decks must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Total cards this config generates. Assumes a validated config.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let ordinary = 52 * self.decks as usize;
        if self.include_specials {
            ordinary + self.num_jokers.max(0) as usize + self.num_wilds.max(0) as usize
        } else {
            ordinary
        }
    }
}

/// What happens when a card is selected while the selection is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Keep appending. `max_selected` is ignored.
    Append,
    /// Refuse the new selection; the selection is unchanged.
    Refuse,
    /// Deselect the oldest selected card, then select the new one.
    EvictOldest,
}

/// Selection behaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Overflow handling once `max_selected` cards are selected.
    pub overflow: OverflowPolicy,

    /// Selection limit for `Refuse` / `EvictOldest`. `None` for unlimited.
    pub max_selected: Option<usize>,

    /// Evaluate the match rule as soon as the selection reaches the rule's arity.
    pub auto_evaluate: bool,

    /// Queue `SelectionEvent`s for `drain_events`. Turn off when nothing drains them.
    pub record_events: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::Append,
            max_selected: None,
            auto_evaluate: false,
            record_events: true,
        }
    }
}

impl SelectionConfig {
    /// Limit the selection to `max` cards with the given overflow policy.
    #[must_use]
    pub fn with_limit(mut self, max: usize, overflow: OverflowPolicy) -> Self {
        self.max_selected = Some(max);
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub fn with_auto_evaluate(mut self, enable: bool) -> Self {
        self.auto_evaluate = enable;
        self
    }

    #[must_use]
    pub fn with_record_events(mut self, enable: bool) -> Self {
        self.record_events = enable;
        self
    }

    /// The effective limit, or `None` if selections are unbounded.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        match self.overflow {
            OverflowPolicy::Append => None,
            OverflowPolicy::Refuse | OverflowPolicy::EvictOldest => self.max_selected,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit() == Some(0) {
            return Err(GameError::InvalidConfiguration(
                "max_selected must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Full session configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub deck: DeckConfig,
    pub selection: SelectionConfig,

    /// Cards dealt into the pool by `GameSession::deal_initial_layout`.
    pub initial_layout: usize,
}

impl SessionConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GameError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_deck(mut self, deck: DeckConfig) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_initial_layout(mut self, count: usize) -> Self {
        self.initial_layout = count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.deck.validate()?;
        self.selection.validate()
    }
}
