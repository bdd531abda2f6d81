//! Game session: one deck feeding one selection pool.
//!
//! A session is the single owner of its `Deck` and `SelectionManager`.
//! Nothing is shared across sessions and nothing is synchronized; a host
//! receiving input from several threads must serialize calls itself.
//!
//! ```
//! use shanghai_engine::core::{DeckConfig, SessionConfig};
//! use shanghai_engine::session::GameSession;
//!
//! let config = SessionConfig::default()
//!     .with_deck(DeckConfig::default().with_jokers(2))
//!     .with_initial_layout(14);
//! let mut session = GameSession::new(config).unwrap();
//!
//! let dealt = session.deal_initial_layout().unwrap();
//! assert_eq!(dealt.len(), 14);
//! assert_eq!(session.deck().remaining(), 40);
//! assert_eq!(session.selection().len(), 14);
//! ```

use crate::core::config::SessionConfig;
use crate::core::entity::CardToken;
use crate::core::error::Result;
use crate::deck::Deck;
use crate::selection::{MatchResult, MatchRule, SelectionEvent, SelectionManager, ToggleResult};

/// Deck + selection pool for one game.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    deck: Deck,
    selection: SelectionManager,
}

impl GameSession {
    /// Build the deck and an empty pool with the default match rule.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let deck = Deck::new(config.deck.clone())?;
        let selection = SelectionManager::new(config.selection.clone());
        Ok(Self {
            config,
            deck,
            selection,
        })
    }

    /// Build a session with a custom match rule.
    pub fn with_rule(config: SessionConfig, rule: impl MatchRule + 'static) -> Result<Self> {
        let mut session = Self::new(config)?;
        session.selection.set_rule(rule);
        Ok(session)
    }

    /// Deal `config.initial_layout` cards into play.
    pub fn deal_initial_layout(&mut self) -> Result<Vec<CardToken>> {
        self.deal(self.config.initial_layout)
    }

    /// Draw up to `count` cards into the pool.
    ///
    /// Stops early when the deck runs out; returns the tokens actually dealt.
    pub fn deal(&mut self, count: usize) -> Result<Vec<CardToken>> {
        let mut dealt = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(card) = self.deck.draw() else {
                log::warn!("deck ran out after dealing {} of {} cards", dealt.len(), count);
                break;
            };
            dealt.push(card.token());
            self.selection.add_card(card)?;
        }
        Ok(dealt)
    }

    /// Forward an activation to the pool.
    pub fn activate(&mut self, token: CardToken) -> Result<ToggleResult> {
        self.selection.activate(token)
    }

    pub fn evaluate_match(&mut self) -> MatchResult {
        self.selection.evaluate_match()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    /// Retire every card in play and reset the deck.
    pub fn reset(&mut self) {
        let retired = self.selection.take_all();
        log::debug!("session reset, retired {} cards from play", retired.len());
        self.deck.reset();
    }

    /// Take queued selection events.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        self.selection.drain_events()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }
}
