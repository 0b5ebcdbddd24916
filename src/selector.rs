//! Chooses the operators that reduce a token to a dictionary word.

use crate::dictionary::Dictionary;
use crate::operator::{Category, Operator};
use std::ops::Deref;

/// Ordered operators for one token.
///
/// Holds at most one operator per category in canonical order (casing, open
/// quote, punctuation, close quote, whitespace), or the literal sentinel alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorList(Vec<Operator>);

impl OperatorList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The singleton literal-block list.
    pub fn literal() -> Self {
        Self(vec![Operator::Literal])
    }

    /// Builds a list from operators already in canonical order.
    pub(crate) fn from_ordered(ops: Vec<Operator>) -> Self {
        debug_assert!(ops.windows(2).all(|w| w[0].category() < w[1].category()));
        Self(ops)
    }

    /// True if the token is stored as a literal block.
    pub fn is_literal(&self) -> bool {
        self.0.first() == Some(&Operator::Literal)
    }

    /// Strips every feature from `token`, in list order.
    pub fn clean(&self, token: &str) -> String {
        self.0
            .iter()
            .fold(token.to_owned(), |current, op| op.clean(&current))
    }

    /// Reapplies every feature to `word`, in list order.
    pub fn apply(&self, word: &str) -> String {
        self.0
            .iter()
            .fold(word.to_owned(), |current, op| op.apply(&current))
    }

    /// True if applying the list already emits the trailing whitespace.
    pub fn overwrites_trailing_space(&self) -> bool {
        self.0.iter().any(|op| op.overwrites_trailing_space())
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.0.contains(&op)
    }

    /// The operator of `category`, if present.
    pub fn get(&self, category: Category) -> Option<Operator> {
        self.0.iter().copied().find(|op| op.category() == category)
    }
}

impl Deref for OperatorList {
    type Target = [Operator];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a OperatorList {
    type Item = &'a Operator;
    type IntoIter = std::slice::Iter<'a, Operator>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Computes the operators that turn `token` into a dictionary word.
///
/// Returns an empty list for a dictionary word and the literal sentinel when
/// no reduction exists. Selection is greedy over a fixed priority order. A
/// candidate is accepted only if reapplying it to the dictionary word yields
/// `token` exactly, so every non-literal result is lossless.
pub fn min_applicable_ops(token: &str, dictionary: &Dictionary) -> OperatorList {
    if dictionary.contains(token) {
        return OperatorList::new();
    }

    let mut ops = Vec::with_capacity(5);

    let casing = [Operator::AllCaps, Operator::Capitalize]
        .into_iter()
        .find(|op| op.is_applied(token));
    if let Some(casing) = casing {
        ops.push(casing);
        let single = OperatorList::from_ordered(vec![casing]);
        if reproduces(&single, token, dictionary) {
            return single;
        }
    }

    if Operator::OpenQuote.is_applied(token) {
        ops.push(Operator::OpenQuote);
    }
    if let Some(punct) = Operator::PUNCTUATION_PRIORITY
        .into_iter()
        .find(|op| op.is_applied(token))
    {
        ops.push(punct);
    }
    if Operator::CloseQuote.is_applied(token) {
        ops.push(Operator::CloseQuote);
    }
    if let Some(space) = Operator::WHITESPACE_PRIORITY
        .into_iter()
        .find(|op| op.is_applied(token))
    {
        ops.push(space);
    }

    let ops = OperatorList::from_ordered(ops);
    if !ops.is_empty() && reproduces(&ops, token, dictionary) {
        ops
    } else {
        OperatorList::literal()
    }
}

/// Does cleaning `token` with `ops` hit the dictionary, and does applying
/// `ops` to that word give back `token`?
fn reproduces(ops: &OperatorList, token: &str, dictionary: &Dictionary) -> bool {
    let cleaned = ops.clean(token);
    dictionary.contains(&cleaned) && ops.apply(&cleaned) == token
}
