//! Deck with a draw pile and a dealt set.
//!
//! Every card generated at construction is in exactly one of:
//! - the draw pile (ordered, index 0 = bottom, last = top)
//! - the dealt set (unordered, keyed by token)
//!
//! `draw` moves the top card into the dealt set and hands a copy to the
//! caller. The deck keeps its own record so `reset` can reclaim every card
//! without the caller giving anything back.

use rustc_hash::FxHashMap;

use super::builder::DeckBuilder;
use crate::cards::Card;
use crate::core::config::DeckConfig;
use crate::core::entity::CardToken;
use crate::core::error::Result;
use crate::core::rng::GameRng;

/// A shuffled deck.
///
/// ## Usage
///
/// ```
/// use shanghai_engine::core::DeckConfig;
/// use shanghai_engine::deck::Deck;
///
/// let mut deck = Deck::new(DeckConfig::default().with_jokers(2)).unwrap();
/// assert_eq!(deck.remaining(), 54);
///
/// let card = deck.draw().unwrap();
/// assert!(deck.is_dealt(card.token()));
/// assert_eq!(deck.remaining(), 53);
///
/// deck.reset();
/// assert_eq!(deck.remaining(), 54);
/// assert_eq!(deck.dealt_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Deck {
    config: DeckConfig,
    draw_pile: Vec<Card>,
    dealt: FxHashMap<CardToken, Card>,
    rng: GameRng,
}

impl Deck {
    /// Generate and shuffle a deck, seeding the RNG from `config.seed`.
    pub fn new(config: DeckConfig) -> Result<Self> {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Generate and shuffle a deck using the given RNG.
    pub fn with_rng(config: DeckConfig, rng: GameRng) -> Result<Self> {
        let draw_pile = DeckBuilder::new(config.clone())?.build()?;
        Ok(Self::from_cards(config, draw_pile, rng))
    }

    /// Wrap an already generated card list and shuffle it.
    pub(crate) fn from_cards(config: DeckConfig, draw_pile: Vec<Card>, rng: GameRng) -> Self {
        log::debug!(
            "generated deck with {} cards (seed {})",
            draw_pile.len(),
            rng.seed()
        );

        let mut deck = Self {
            config,
            draw_pile,
            dealt: FxHashMap::default(),
            rng,
        };
        deck.shuffle();
        deck
    }

    /// Shuffle the draw pile in place. Dealt cards are not touched.
    pub fn shuffle(&mut self) {
        self.rng.shuffle(&mut self.draw_pile);
        log::trace!("shuffled {} cards", self.draw_pile.len());
    }

    /// Draw the top card.
    ///
    /// Returns `None` when the draw pile is empty; nothing changes in that case.
    pub fn draw(&mut self) -> Option<Card> {
        let Some(card) = self.draw_pile.pop() else {
            log::debug!("draw from empty deck");
            return None;
        };
        log::trace!("drew {} ({})", card, card.token());
        self.dealt.insert(card.token(), card.clone());
        Some(card)
    }

    /// Draw up to `count` cards, stopping early if the pile runs out.
    pub fn draw_many(&mut self, count: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count.min(self.draw_pile.len()));
        for _ in 0..count {
            match self.draw() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Return every dealt card to the draw pile and reshuffle.
    ///
    /// Returned cards come back unselected and unhighlighted.
    pub fn reset(&mut self) {
        let mut returned: Vec<Card> = self.dealt.drain().map(|(_, card)| card).collect();
        // Fixed merge order keeps seeded resets reproducible.
        returned.sort_unstable_by_key(Card::token);
        for card in &mut returned {
            card.reset_state();
        }
        self.draw_pile.extend(returned);
        self.shuffle();
        log::debug!("deck reset, {} cards in draw pile", self.draw_pile.len());
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards currently dealt.
    #[must_use]
    pub fn dealt_count(&self) -> usize {
        self.dealt.len()
    }

    /// Every card this deck owns, drawn or not.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw_pile.len() + self.dealt.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty()
    }

    /// Check if a card has been dealt and not yet reclaimed.
    #[must_use]
    pub fn is_dealt(&self, token: CardToken) -> bool {
        self.dealt.contains_key(&token)
    }

    /// Check if a card belongs to this deck at all.
    #[must_use]
    pub fn contains(&self, token: CardToken) -> bool {
        self.is_dealt(token) || self.draw_pile.iter().any(|c| c.token() == token)
    }

    /// The draw pile, bottom to top.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Dealt cards, in no particular order.
    pub fn dealt(&self) -> impl Iterator<Item = &Card> + '_ {
        self.dealt.values()
    }

    /// The card `draw` would return next.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.draw_pile.last()
    }

    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }
}
