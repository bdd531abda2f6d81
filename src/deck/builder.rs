//! Deck composition.
//!
//! Generation order is fixed (ordinary set per deck, then jokers, then
//! wilds) so a given config and seed always produce the same shuffle.

use crate::cards::{Card, CardValue, Face, Suit};
use crate::core::config::DeckConfig;
use crate::core::entity::TokenAllocator;
use crate::core::error::Result;

/// Builds the card list for a `DeckConfig`.
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    config: DeckConfig,
    tokens: TokenAllocator,
}

impl DeckBuilder {
    /// Create a builder, validating the config.
    pub fn new(config: DeckConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tokens: TokenAllocator::new(),
        })
    }

    /// Use a custom token allocator (e.g. to keep tokens disjoint across decks).
    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenAllocator) -> Self {
        self.tokens = tokens;
        self
    }

    /// Generate every card, unshuffled.
    ///
    /// Fails with `TokensExhausted` if the allocator runs out of tokens.
    pub fn build(mut self) -> Result<Vec<Card>> {
        let mut cards = Vec::with_capacity(self.config.total_cards());

        for _ in 0..self.config.decks {
            self.push_standard_set(&mut cards)?;
        }

        if self.config.include_specials {
            for _ in 0..self.config.num_jokers {
                cards.push(Card::new(self.tokens.next_token()?, Face::joker()));
            }
            for _ in 0..self.config.num_wilds {
                cards.push(Card::new(self.tokens.next_token()?, Face::wild()));
            }
            log::trace!(
                "added {} jokers and {} wilds",
                self.config.num_jokers,
                self.config.num_wilds
            );
        }

        Ok(cards)
    }

    /// 13 values across the four ordinary suits.
    fn push_standard_set(&mut self, cards: &mut Vec<Card>) -> Result<()> {
        for suit in Suit::ORDINARY {
            for value in CardValue::ORDINARY {
                // Ordinary suit + ordinary value is always valid.
                if let Ok(face) = Face::new(suit, value) {
                    cards.push(Card::new(self.tokens.next_token()?, face));
                }
            }
        }
        Ok(())
    }
}
