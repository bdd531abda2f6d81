//! Match rules.
//!
//! A `MatchRule` looks at the current selection (in selection order) and
//! reports which of those cards form a match. The manager then retires
//! exactly that subset and leaves the rest of the selection alone.
//!
//! ## Provided Rules
//!
//! - `IdenticalPair`: two cards with the same suit and value
//! - `NOfAKind`: exactly N ordinary cards with the same value
//! - `SameSuitRun`: consecutive ranks in one ordinary suit
//! - `RuleFn`: any closure over the whole selection

use smallvec::SmallVec;

use crate::cards::Card;

/// Indices into the selection slice handed to `MatchRule::matches`.
pub type MatchIndices = SmallVec<[usize; 4]>;

/// Match predicate over the current selection.
///
/// ## Implementation Notes
///
/// - `matches` must not assume any selection length; return `None` if
///   the selection can't match.
/// - Returned indices refer to the `selected` slice. Out-of-range and
///   repeated indices are ignored by the manager.
/// - `arity` is the selection size at which auto-evaluation fires.
///   `None` means "evaluate after every selection".
pub trait MatchRule: std::fmt::Debug + Send {
    /// Indices of the matched cards, or `None` for no match.
    fn matches(&self, selected: &[&Card]) -> Option<MatchIndices>;

    /// Selection size this rule needs, if fixed.
    fn arity(&self) -> Option<usize> {
        None
    }

    /// Short name for logs.
    fn name(&self) -> &str;
}

fn all_indices(len: usize) -> MatchIndices {
    (0..len).collect()
}

/// Exactly two selected cards with identical suit and value.
///
/// ```
/// use shanghai_engine::cards::{Card, CardValue, Face, Suit};
/// use shanghai_engine::core::CardToken;
/// use shanghai_engine::selection::{IdenticalPair, MatchRule};
///
/// let face = Face::new(Suit::Hearts, CardValue::King).unwrap();
/// let a = Card::new(CardToken(1), face);
/// let b = Card::new(CardToken(2), face);
///
/// assert!(IdenticalPair.matches(&[&a, &b]).is_some());
/// assert!(IdenticalPair.matches(&[&a]).is_none());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IdenticalPair;

impl MatchRule for IdenticalPair {
    fn matches(&self, selected: &[&Card]) -> Option<MatchIndices> {
        match selected {
            [a, b] if a.face() == b.face() => Some(all_indices(2)),
            _ => None,
        }
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn name(&self) -> &str {
        "identical-pair"
    }
}

/// Exactly `n` selected ordinary cards sharing one value (suits may differ).
#[derive(Clone, Copy, Debug)]
pub struct NOfAKind(pub usize);

impl MatchRule for NOfAKind {
    fn matches(&self, selected: &[&Card]) -> Option<MatchIndices> {
        let n = self.0;
        if n < 2 || selected.len() != n {
            return None;
        }
        let value = selected[0].value();
        let same = selected
            .iter()
            .all(|card| !card.is_special() && card.value() == value);
        same.then(|| all_indices(n))
    }

    fn arity(&self) -> Option<usize> {
        Some(self.0)
    }

    fn name(&self) -> &str {
        "n-of-a-kind"
    }
}

/// At least `min_len` ordinary cards of one suit with consecutive ranks.
///
/// Selection order doesn't matter; ranks are sorted before checking.
/// Ace is high only.
#[derive(Clone, Copy, Debug)]
pub struct SameSuitRun {
    pub min_len: usize,
}

impl Default for SameSuitRun {
    fn default() -> Self {
        Self { min_len: 3 }
    }
}

impl MatchRule for SameSuitRun {
    fn matches(&self, selected: &[&Card]) -> Option<MatchIndices> {
        if selected.len() < self.min_len.max(2) {
            return None;
        }
        let suit = selected[0].suit();
        if suit.is_special() || selected.iter().any(|c| c.suit() != suit) {
            return None;
        }

        let mut ranks: SmallVec<[u8; 8]> = selected
            .iter()
            .map(|c| c.value().rank())
            .collect::<Option<_>>()?;
        ranks.sort_unstable();

        let consecutive = ranks.windows(2).all(|w| w[1] == w[0] + 1);
        consecutive.then(|| all_indices(selected.len()))
    }

    fn name(&self) -> &str {
        "same-suit-run"
    }
}

/// Closure adapter: the whole selection matches when `predicate` holds.
pub struct RuleFn<F> {
    name: String,
    arity: Option<usize>,
    predicate: F,
}

impl<F> RuleFn<F>
where
    F: Fn(&[&Card]) -> bool + Send,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            arity: None,
            predicate,
        }
    }

    /// Set the auto-evaluation arity.
    #[must_use]
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }
}

impl<F> std::fmt::Debug for RuleFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleFn")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl<F> MatchRule for RuleFn<F>
where
    F: Fn(&[&Card]) -> bool + Send,
{
    fn matches(&self, selected: &[&Card]) -> Option<MatchIndices> {
        if selected.is_empty() || !(self.predicate)(selected) {
            return None;
        }
        Some(all_indices(selected.len()))
    }

    fn arity(&self) -> Option<usize> {
        self.arity
    }

    fn name(&self) -> &str {
        &self.name
    }
}
