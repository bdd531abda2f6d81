//! Selection manager: the pool of cards in play and the current selection.
//!
//! The `SelectionManager` owns every card dealt into play. It supports:
//! - Toggling selection from external activations
//! - Match evaluation through a pluggable `MatchRule`
//! - Retiring matched or discarded cards
//! - Queued `SelectionEvent`s for a display layer
//!
//! The event queue grows until `drain_events` is called. Hosts with no
//! display layer should turn it off with `SelectionConfig::record_events`.
//!
//! ## Invariants
//!
//! - `selected` is a subset of the pool, with no repeats
//! - `card.is_selected()` holds iff the card's token is in `selected`

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::event::SelectionEvent;
use super::rules::{IdenticalPair, MatchRule};
use crate::cards::Card;
use crate::core::config::{OverflowPolicy, SelectionConfig};
use crate::core::entity::CardToken;
use crate::core::error::{GameError, Result};

/// What an activation did to the activated card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
    /// Selection was full under `OverflowPolicy::Refuse`; nothing changed.
    Refused,
}

/// Outcome of `SelectionManager::activate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleResult {
    /// The activated card.
    pub token: CardToken,

    pub toggle: Toggle,

    /// Card deselected to make room under `OverflowPolicy::EvictOldest`.
    pub evicted: Option<CardToken>,

    /// The full selection after this activation, in selection order.
    pub selected: Vec<CardToken>,

    /// Result of auto-evaluation, if it ran.
    pub auto_match: Option<MatchResult>,
}

impl ToggleResult {
    /// Selection state of the activated card after the call.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.toggle == Toggle::Selected
    }
}

/// Outcome of `SelectionManager::evaluate_match`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    /// The retired cards, in selection order, already deselected.
    Matched(SmallVec<[Card; 2]>),
}

impl MatchResult {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    /// Matched cards, empty for `NoMatch`.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            MatchResult::Matched(cards) => cards.as_slice(),
            MatchResult::NoMatch => &[],
        }
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<CardToken> {
        self.cards().iter().map(Card::token).collect()
    }
}

/// Tracks the cards in play and which of them are selected.
///
/// ## Usage
///
/// ```
/// use shanghai_engine::cards::{Card, CardValue, Face, Suit};
/// use shanghai_engine::core::{CardToken, SelectionConfig};
/// use shanghai_engine::selection::SelectionManager;
///
/// let face = Face::new(Suit::Hearts, CardValue::King).unwrap();
/// let mut manager = SelectionManager::new(SelectionConfig::default());
/// manager.add_card(Card::new(CardToken(1), face)).unwrap();
/// manager.add_card(Card::new(CardToken(2), face)).unwrap();
///
/// manager.activate(CardToken(1)).unwrap();
/// manager.activate(CardToken(2)).unwrap();
///
/// let result = manager.evaluate_match();
/// assert!(result.is_match());
/// assert!(manager.is_empty());
/// ```
#[derive(Debug)]
pub struct SelectionManager {
    config: SelectionConfig,
    rule: Box<dyn MatchRule>,
    pool: FxHashMap<CardToken, Card>,
    selected: Vec<CardToken>,
    events: Vec<SelectionEvent>,
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl SelectionManager {
    /// Create an empty manager using the `IdenticalPair` rule.
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self::with_rule(config, IdenticalPair)
    }

    /// Create an empty manager with a custom match rule.
    #[must_use]
    pub fn with_rule(config: SelectionConfig, rule: impl MatchRule + 'static) -> Self {
        Self {
            config,
            rule: Box::new(rule),
            pool: FxHashMap::default(),
            selected: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Replace the match rule. Pool and selection are unchanged.
    pub fn set_rule(&mut self, rule: impl MatchRule + 'static) {
        log::debug!("match rule {} -> {}", self.rule.name(), rule.name());
        self.rule = Box::new(rule);
    }

    #[must_use]
    pub fn rule(&self) -> &dyn MatchRule {
        self.rule.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    // === Pool ===

    /// Put a card into play, unselected.
    ///
    /// Fails with `DuplicateCard` if a card with the same token is already in play.
    pub fn add_card(&mut self, mut card: Card) -> Result<()> {
        let token = card.token();
        if self.pool.contains_key(&token) {
            return Err(GameError::DuplicateCard(token));
        }
        card.deselect();
        self.pool.insert(token, card);
        Ok(())
    }

    /// Take a card out of play.
    ///
    /// Returns `None` (not an error) if the card isn't in play, so match
    /// cleanup can call this redundantly.
    pub fn remove_card(&mut self, token: CardToken) -> Option<Card> {
        let mut card = self.pool.remove(&token)?;
        self.selected.retain(|&t| t != token);
        card.deselect();
        self.emit(SelectionEvent::Removed(token));
        Some(card)
    }

    /// Take every card out of play.
    ///
    /// Returned in token order.
    pub fn take_all(&mut self) -> Vec<Card> {
        self.selected.clear();
        let mut cards: Vec<Card> = self.pool.drain().map(|(_, card)| card).collect();
        cards.sort_unstable_by_key(Card::token);
        for card in &mut cards {
            card.deselect();
            self.emit(SelectionEvent::Removed(card.token()));
        }
        cards
    }

    // === Selection ===

    /// Toggle selection of a card in play.
    ///
    /// Fails with `UnknownCard` if the card isn't in play; nothing changes.
    pub fn activate(&mut self, token: CardToken) -> Result<ToggleResult> {
        let currently_selected = self
            .pool
            .get(&token)
            .ok_or(GameError::UnknownCard(token))?
            .is_selected();

        if currently_selected {
            self.set_selected(token, false);
            self.selected.retain(|&t| t != token);
            log::debug!("deselected {}", token);
            return Ok(self.toggle_result(token, Toggle::Deselected, None, None));
        }

        let mut evicted = None;
        if let Some(max) = self.config.limit() {
            if self.selected.len() >= max {
                match self.config.overflow {
                    OverflowPolicy::Refuse => {
                        log::debug!("selection full ({}), refused {}", max, token);
                        return Ok(self.toggle_result(token, Toggle::Refused, None, None));
                    }
                    OverflowPolicy::EvictOldest => {
                        // A zero limit leaves nothing to evict.
                        let Some(&oldest) = self.selected.first() else {
                            log::debug!("selection limit is 0, refused {}", token);
                            return Ok(self.toggle_result(token, Toggle::Refused, None, None));
                        };
                        self.selected.remove(0);
                        self.set_selected(oldest, false);
                        evicted = Some(oldest);
                    }
                    OverflowPolicy::Append => {}
                }
            }
        }

        self.set_selected(token, true);
        self.selected.push(token);
        log::debug!("selected {} ({} selected)", token, self.selected.len());

        let auto_match = self.should_auto_evaluate().then(|| self.evaluate_match());
        Ok(self.toggle_result(token, Toggle::Selected, evicted, auto_match))
    }

    /// Apply the match rule to the current selection.
    ///
    /// On a match, exactly the matched cards leave the pool and the
    /// selection; any other selected cards stay selected. On no match
    /// nothing changes.
    pub fn evaluate_match(&mut self) -> MatchResult {
        if self.selected.is_empty() {
            return MatchResult::NoMatch;
        }

        let indices = {
            let cards: Vec<&Card> = self
                .selected
                .iter()
                .filter_map(|token| self.pool.get(token))
                .collect();
            match self.rule.matches(&cards) {
                Some(indices) => indices,
                None => {
                    log::trace!("{}: no match among {} cards", self.rule.name(), cards.len());
                    return MatchResult::NoMatch;
                }
            }
        };

        let mut indices: SmallVec<[usize; 4]> = indices
            .into_iter()
            .filter(|&i| i < self.selected.len())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            log::warn!("{} reported a match with no valid indices", self.rule.name());
            return MatchResult::NoMatch;
        }

        let tokens: SmallVec<[CardToken; 2]> = indices.iter().map(|&i| self.selected[i]).collect();
        self.selected.retain(|t| !tokens.contains(t));

        let mut matched = SmallVec::new();
        for token in &tokens {
            if let Some(mut card) = self.pool.remove(token) {
                card.deselect();
                matched.push(card);
            }
        }

        log::debug!("{} matched {:?}", self.rule.name(), tokens);
        self.emit(SelectionEvent::Matched(tokens));
        MatchResult::Matched(matched)
    }

    /// Deselect everything. The pool is unchanged.
    pub fn clear_selection(&mut self) {
        for token in std::mem::take(&mut self.selected) {
            self.set_selected(token, false);
        }
    }

    /// Set or clear a card's highlight.
    pub fn highlight(&mut self, token: CardToken, enable: bool) -> Result<()> {
        let card = self
            .pool
            .get_mut(&token)
            .ok_or(GameError::UnknownCard(token))?;
        if card.is_highlighted() != enable {
            card.highlight(enable);
            self.emit(SelectionEvent::Highlighted {
                token,
                enabled: enable,
            });
        }
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn contains(&self, token: CardToken) -> bool {
        self.pool.contains_key(&token)
    }

    #[must_use]
    pub fn get(&self, token: CardToken) -> Option<&Card> {
        self.pool.get(&token)
    }

    /// Number of cards in play.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Cards in play, in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.pool.values()
    }

    /// Selected cards in selection order.
    #[must_use]
    pub fn selected(&self) -> Vec<&Card> {
        self.selected
            .iter()
            .filter_map(|token| self.pool.get(token))
            .collect()
    }

    #[must_use]
    pub fn selected_tokens(&self) -> &[CardToken] {
        &self.selected
    }

    // === Events ===

    /// Take all queued events, oldest first.
    ///
    /// Always empty when `record_events` is off.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Internals ===

    /// Flip the card flag and queue the matching event.
    fn set_selected(&mut self, token: CardToken, selected: bool) {
        let Some(card) = self.pool.get_mut(&token) else {
            return;
        };
        if selected {
            card.select();
            self.emit(SelectionEvent::Selected(token));
        } else {
            card.deselect();
            self.emit(SelectionEvent::Deselected(token));
        }
    }

    fn emit(&mut self, event: SelectionEvent) {
        if self.config.record_events {
            self.events.push(event);
        }
    }

    fn should_auto_evaluate(&self) -> bool {
        if !self.config.auto_evaluate {
            return false;
        }
        match self.rule.arity() {
            Some(arity) => self.selected.len() == arity,
            None => true,
        }
    }

    fn toggle_result(
        &self,
        token: CardToken,
        toggle: Toggle,
        evicted: Option<CardToken>,
        auto_match: Option<MatchResult>,
    ) -> ToggleResult {
        ToggleResult {
            token,
            toggle,
            evicted,
            selected: self.selected.clone(),
            auto_match,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardValue, Face, Suit};
    use crate::selection::rules::{MatchIndices, NOfAKind};

    fn card(id: u32, suit: Suit, value: CardValue) -> Card {
        Card::new(CardToken(id), Face::new(suit, value).unwrap())
    }

    fn manager_with(cards: Vec<Card>) -> SelectionManager {
        let mut manager = SelectionManager::default();
        for c in cards {
            manager.add_card(c).unwrap();
        }
        manager
    }

    fn assert_invariants(manager: &SelectionManager) {
        for token in manager.selected_tokens() {
            assert!(manager.contains(*token));
        }
        let mut seen = manager.selected_tokens().to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), manager.selected_tokens().len());
        for c in manager.cards() {
            assert_eq!(
                c.is_selected(),
                manager.selected_tokens().contains(&c.token())
            );
        }
    }

    #[test]
    fn test_add_duplicate() {
        let mut manager = manager_with(vec![card(1, Suit::Hearts, CardValue::Two)]);
        let err = manager
            .add_card(card(1, Suit::Hearts, CardValue::Two))
            .unwrap_err();
        assert_eq!(err, GameError::DuplicateCard(CardToken(1)));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_add_clears_stale_selection() {
        let mut c = card(1, Suit::Hearts, CardValue::Two);
        c.select();
        let manager = manager_with(vec![c]);
        assert!(!manager.get(CardToken(1)).unwrap().is_selected());
        assert_invariants(&manager);
    }

    #[test]
    fn test_activate_toggles() {
        let mut manager = manager_with(vec![
            card(1, Suit::Hearts, CardValue::Two),
            card(2, Suit::Clubs, CardValue::Three),
        ]);

        let r = manager.activate(CardToken(1)).unwrap();
        assert!(r.is_selected());
        assert_eq!(r.selected, vec![CardToken(1)]);

        let r = manager.activate(CardToken(2)).unwrap();
        assert_eq!(r.selected, vec![CardToken(1), CardToken(2)]);

        let r = manager.activate(CardToken(1)).unwrap();
        assert_eq!(r.toggle, Toggle::Deselected);
        assert_eq!(r.selected, vec![CardToken(2)]);
        assert_invariants(&manager);
    }

    #[test]
    fn test_activate_unknown() {
        let mut manager = manager_with(vec![card(1, Suit::Hearts, CardValue::Two)]);
        manager.activate(CardToken(1)).unwrap();

        let err = manager.activate(CardToken(99)).unwrap_err();
        assert_eq!(err, GameError::UnknownCard(CardToken(99)));
        assert_eq!(manager.selected_tokens(), &[CardToken(1)]);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_remove_card() {
        let mut manager = manager_with(vec![
            card(1, Suit::Hearts, CardValue::Two),
            card(2, Suit::Clubs, CardValue::Three),
        ]);
        manager.activate(CardToken(1)).unwrap();

        let removed = manager.remove_card(CardToken(1)).unwrap();
        assert!(!removed.is_selected());
        assert!(manager.selected_tokens().is_empty());
        assert_eq!(manager.len(), 1);

        // Redundant removal is fine.
        assert!(manager.remove_card(CardToken(1)).is_none());
        assert_invariants(&manager);
    }

    #[test]
    fn test_match_leaves_other_selected() {
        let mut manager = SelectionManager::with_rule(SelectionConfig::default(), NOfAKind(2));
        for c in [
            card(1, Suit::Hearts, CardValue::Nine),
            card(2, Suit::Clubs, CardValue::Nine),
            card(3, Suit::Spades, CardValue::Four),
        ] {
            manager.add_card(c).unwrap();
        }
        manager.activate(CardToken(1)).unwrap();
        manager.activate(CardToken(2)).unwrap();
        manager.activate(CardToken(3)).unwrap();
        assert!(!manager.evaluate_match().is_match());
        assert_eq!(manager.selected_tokens().len(), 3);

        manager.activate(CardToken(3)).unwrap();
        let result = manager.evaluate_match();
        assert_eq!(result.tokens(), vec![CardToken(1), CardToken(2)]);
        assert_eq!(manager.len(), 1);
        assert_invariants(&manager);
    }

    #[test]
    fn test_evaluate_empty_selection() {
        let mut manager = manager_with(vec![card(1, Suit::Hearts, CardValue::Two)]);
        assert_eq!(manager.evaluate_match(), MatchResult::NoMatch);
        assert!(manager.drain_events().is_empty());
    }

    #[test]
    fn test_partial_match_keeps_rest() {
        #[derive(Debug)]
        struct FirstTwo;
        impl MatchRule for FirstTwo {
            fn matches(&self, selected: &[&Card]) -> Option<MatchIndices> {
                (selected.len() >= 2).then(|| [0usize, 1, 1, 40].into_iter().collect())
            }
            fn name(&self) -> &str {
                "first-two"
            }
        }

        let mut manager = SelectionManager::with_rule(SelectionConfig::default(), FirstTwo);
        for id in 1..=3 {
            manager.add_card(card(id, Suit::Hearts, CardValue::Two)).unwrap();
        }
        for id in [3, 1, 2] {
            manager.activate(CardToken(id)).unwrap();
        }

        let result = manager.evaluate_match();
        assert_eq!(result.tokens(), vec![CardToken(3), CardToken(1)]);
        assert_eq!(manager.selected_tokens(), &[CardToken(2)]);
        assert!(manager.get(CardToken(2)).unwrap().is_selected());
        assert_invariants(&manager);
    }

    #[test]
    fn test_clear_selection() {
        let mut manager = manager_with(vec![
            card(1, Suit::Hearts, CardValue::Two),
            card(2, Suit::Clubs, CardValue::Three),
        ]);
        manager.activate(CardToken(1)).unwrap();
        manager.activate(CardToken(2)).unwrap();

        manager.clear_selection();

        assert!(manager.selected_tokens().is_empty());
        assert_eq!(manager.len(), 2);
        assert_invariants(&manager);
    }

    #[test]
    fn test_refuse_policy() {
        let config = SelectionConfig::default().with_limit(2, OverflowPolicy::Refuse);
        let mut manager = SelectionManager::new(config);
        for id in 1..=3 {
            manager.add_card(card(id, Suit::Hearts, CardValue::Two)).unwrap();
        }
        manager.activate(CardToken(1)).unwrap();
        manager.activate(CardToken(2)).unwrap();

        let r = manager.activate(CardToken(3)).unwrap();
        assert_eq!(r.toggle, Toggle::Refused);
        assert!(!r.is_selected());
        assert_eq!(r.selected, vec![CardToken(1), CardToken(2)]);
        assert!(!manager.get(CardToken(3)).unwrap().is_selected());

        // Deselecting is still allowed when full.
        let r = manager.activate(CardToken(1)).unwrap();
        assert_eq!(r.toggle, Toggle::Deselected);
        assert_invariants(&manager);
    }

    #[test]
    fn test_evict_oldest_policy() {
        let config = SelectionConfig::default().with_limit(2, OverflowPolicy::EvictOldest);
        let mut manager = SelectionManager::new(config);
        for id in 1..=3 {
            manager.add_card(card(id, Suit::Hearts, CardValue::Two)).unwrap();
        }
        manager.activate(CardToken(1)).unwrap();
        manager.activate(CardToken(2)).unwrap();

        let r = manager.activate(CardToken(3)).unwrap();
        assert_eq!(r.evicted, Some(CardToken(1)));
        assert_eq!(r.selected, vec![CardToken(2), CardToken(3)]);
        assert!(!manager.get(CardToken(1)).unwrap().is_selected());
        assert_invariants(&manager);
    }

    #[test]
    fn test_auto_evaluate() {
        let config = SelectionConfig::default().with_auto_evaluate(true);
        let mut manager = SelectionManager::new(config);
        manager.add_card(card(1, Suit::Spades, CardValue::Ace)).unwrap();
        manager.add_card(card(2, Suit::Spades, CardValue::Ace)).unwrap();
        manager.add_card(card(3, Suit::Clubs, CardValue::Ace)).unwrap();

        let r = manager.activate(CardToken(1)).unwrap();
        assert!(r.auto_match.is_none());

        let r = manager.activate(CardToken(2)).unwrap();
        let auto = r.auto_match.unwrap();
        assert!(auto.is_match());
        assert!(r.selected.is_empty());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_events() {
        let mut manager = manager_with(vec![
            card(1, Suit::Hearts, CardValue::King),
            card(2, Suit::Hearts, CardValue::King),
            card(3, Suit::Clubs, CardValue::Four),
        ]);
        manager.activate(CardToken(3)).unwrap();
        manager.activate(CardToken(3)).unwrap();
        manager.highlight(CardToken(3), true).unwrap();
        manager.highlight(CardToken(3), true).unwrap();
        manager.activate(CardToken(1)).unwrap();
        manager.activate(CardToken(2)).unwrap();
        manager.evaluate_match();
        manager.remove_card(CardToken(3));

        let events = manager.drain_events();
        assert_eq!(
            events,
            vec![
                SelectionEvent::Selected(CardToken(3)),
                SelectionEvent::Deselected(CardToken(3)),
                SelectionEvent::Highlighted {
                    token: CardToken(3),
                    enabled: true
                },
                SelectionEvent::Selected(CardToken(1)),
                SelectionEvent::Selected(CardToken(2)),
                SelectionEvent::Matched(SmallVec::from_slice(&[CardToken(1), CardToken(2)])),
                SelectionEvent::Removed(CardToken(3)),
            ]
        );
        assert!(manager.drain_events().is_empty());
    }

    #[test]
    fn test_evict_with_zero_limit_refuses() {
        let config = SelectionConfig::default().with_limit(0, OverflowPolicy::EvictOldest);
        let mut manager = SelectionManager::new(config);
        manager.add_card(card(1, Suit::Hearts, CardValue::Two)).unwrap();

        let r = manager.activate(CardToken(1)).unwrap();
        assert_eq!(r.toggle, Toggle::Refused);
        assert_eq!(r.evicted, None);
        assert!(r.selected.is_empty());
        assert!(!manager.get(CardToken(1)).unwrap().is_selected());
        assert_invariants(&manager);
    }

    #[test]
    fn test_events_off() {
        let config = SelectionConfig::default().with_record_events(false);
        let mut manager = SelectionManager::new(config);
        manager.add_card(card(1, Suit::Hearts, CardValue::King)).unwrap();
        manager.add_card(card(2, Suit::Hearts, CardValue::King)).unwrap();

        // Odd count leaves card 1 selected.
        for _ in 0..1_001 {
            manager.activate(CardToken(1)).unwrap();
        }
        manager.highlight(CardToken(2), true).unwrap();
        manager.activate(CardToken(2)).unwrap();
        assert!(manager.evaluate_match().is_match());

        assert!(manager.drain_events().is_empty());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_take_all() {
        let mut manager = manager_with(vec![
            card(2, Suit::Hearts, CardValue::Two),
            card(1, Suit::Clubs, CardValue::Three),
        ]);
        manager.activate(CardToken(2)).unwrap();

        let cards = manager.take_all();
        assert_eq!(
            cards.iter().map(Card::token).collect::<Vec<_>>(),
            vec![CardToken(1), CardToken(2)]
        );
        assert!(cards.iter().all(|c| !c.is_selected()));
        assert!(manager.is_empty());
        assert!(manager.selected_tokens().is_empty());
    }

    #[test]
    fn test_highlight_unknown() {
        let mut manager = SelectionManager::default();
        assert_eq!(
            manager.highlight(CardToken(4), true),
            Err(GameError::UnknownCard(CardToken(4)))
        );
    }
}
