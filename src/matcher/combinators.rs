//! Boolean composition of matchers
//!
//! `All`, `Any` and `One` hold their operands in order. Combining two
//! values of the same kind with the matching operator flattens them into
//! one sequence, which evaluates exactly like the nested form.

use super::Matcher;
use crate::dom::NodeRef;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A composable matcher value
pub enum Match<'s> {
    /// Every operand matches (short-circuits); empty is `true`
    All(Vec<Match<'s>>),
    /// At least one operand matches (short-circuits); empty is `false`
    Any(Vec<Match<'s>>),
    /// An odd number of operands match; empty is `false`
    One(Vec<Match<'s>>),
    /// The operand does not match
    Not(Box<Match<'s>>),
    /// A leaf predicate
    Predicate(Box<dyn Matcher + Send + Sync + 's>),
}

impl<'s> Match<'s> {
    /// Wrap any matcher
    pub fn new<M>(matcher: M) -> Self
    where
        M: Matcher + Send + Sync + 's,
    {
        Match::Predicate(Box::new(matcher))
    }

    /// Wrap a closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(NodeRef<'_>) -> bool + Send + Sync + 's,
    {
        Match::Predicate(Box::new(f))
    }

    /// Matches every node
    pub fn always() -> Self {
        Match::All(Vec::new())
    }

    /// Matches no node
    pub fn never() -> Self {
        Match::Any(Vec::new())
    }
}

/// `All(matchers)`
pub fn all<'s>(matchers: impl IntoIterator<Item = Match<'s>>) -> Match<'s> {
    Match::All(matchers.into_iter().collect())
}

/// `Any(matchers)`
pub fn any<'s>(matchers: impl IntoIterator<Item = Match<'s>>) -> Match<'s> {
    Match::Any(matchers.into_iter().collect())
}

/// `One(matchers)`: parity of the operands
pub fn one<'s>(matchers: impl IntoIterator<Item = Match<'s>>) -> Match<'s> {
    Match::One(matchers.into_iter().collect())
}

/// `Not(matcher)`
pub fn not(matcher: Match<'_>) -> Match<'_> {
    Match::Not(Box::new(matcher))
}

impl Matcher for Match<'_> {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        match self {
            Match::All(ms) => ms.iter().all(|m| m.matches(node)),
            Match::Any(ms) => ms.iter().any(|m| m.matches(node)),
            Match::One(ms) => ms.iter().fold(false, |odd, m| odd ^ m.matches(node)),
            Match::Not(m) => !m.matches(node),
            Match::Predicate(p) => p.matches(node),
        }
    }
}

impl fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Match::All(ms) => f.debug_tuple("All").field(ms).finish(),
            Match::Any(ms) => f.debug_tuple("Any").field(ms).finish(),
            Match::One(ms) => f.debug_tuple("One").field(ms).finish(),
            Match::Not(m) => f.debug_tuple("Not").field(m).finish(),
            Match::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Join two operands under one combinator, splicing in operands that
/// already use it
fn join<'s>(
    lhs: Match<'s>,
    rhs: Match<'s>,
    unwrap: fn(Match<'s>) -> Result<Vec<Match<'s>>, Match<'s>>,
    wrap: fn(Vec<Match<'s>>) -> Match<'s>,
) -> Match<'s> {
    let mut operands = unwrap(lhs).unwrap_or_else(|m| vec![m]);
    match unwrap(rhs) {
        Ok(more) => operands.extend(more),
        Err(m) => operands.push(m),
    }
    wrap(operands)
}

impl<'s> BitAnd for Match<'s> {
    type Output = Match<'s>;

    fn bitand(self, rhs: Match<'s>) -> Match<'s> {
        join(
            self,
            rhs,
            |m| match m {
                Match::All(ms) => Ok(ms),
                m => Err(m),
            },
            Match::All,
        )
    }
}

impl<'s> BitOr for Match<'s> {
    type Output = Match<'s>;

    fn bitor(self, rhs: Match<'s>) -> Match<'s> {
        join(
            self,
            rhs,
            |m| match m {
                Match::Any(ms) => Ok(ms),
                m => Err(m),
            },
            Match::Any,
        )
    }
}

impl<'s> BitXor for Match<'s> {
    type Output = Match<'s>;

    fn bitxor(self, rhs: Match<'s>) -> Match<'s> {
        join(
            self,
            rhs,
            |m| match m {
                Match::One(ms) => Ok(ms),
                m => Err(m),
            },
            Match::One,
        )
    }
}

impl<'s> Not for Match<'s> {
    type Output = Match<'s>;

    fn not(self) -> Match<'s> {
        match self {
            Match::Not(inner) => *inner,
            m => Match::Not(Box::new(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use rstest::rstest;

    fn constant(value: bool) -> Match<'static> {
        Match::from_fn(move |_| value)
    }

    #[test]
    fn test_empty_combinators() {
        let doc = HtmlDocument::parse("<p></p>");
        let node = doc.root();
        assert!(all([]).matches(node));
        assert!(!any([]).matches(node));
        assert!(!one([]).matches(node));
        assert!(Match::always().matches(node));
        assert!(!Match::never().matches(node));
    }

    #[rstest]
    #[case(false, false, false)]
    #[case(false, false, true)]
    #[case(false, true, false)]
    #[case(false, true, true)]
    #[case(true, false, false)]
    #[case(true, false, true)]
    #[case(true, true, false)]
    #[case(true, true, true)]
    fn test_one_is_parity(#[case] a: bool, #[case] b: bool, #[case] c: bool) {
        let doc = HtmlDocument::parse("<p></p>");
        let m = one([constant(a), constant(b), constant(c)]);
        assert_eq!(m.matches(doc.root()), a ^ b ^ c);
        let chained = constant(a) ^ constant(b) ^ constant(c);
        assert_eq!(chained.matches(doc.root()), a ^ b ^ c);
    }

    #[rstest]
    #[case(false, false)]
    #[case(false, true)]
    #[case(true, false)]
    #[case(true, true)]
    fn test_operators(#[case] a: bool, #[case] b: bool) {
        let doc = HtmlDocument::parse("<p></p>");
        let node = doc.root();
        assert_eq!((constant(a) & constant(b)).matches(node), a && b);
        assert_eq!((constant(a) | constant(b)).matches(node), a || b);
        assert_eq!((constant(a) ^ constant(b)).matches(node), a ^ b);
        assert_eq!((!constant(a)).matches(node), !a);
    }

    #[test]
    fn test_same_kind_flattens() {
        let m = (constant(true) & constant(true)) & (constant(true) & constant(false));
        assert!(matches!(&m, Match::All(ms) if ms.len() == 4));
        let m = constant(true) | (constant(false) | constant(false));
        assert!(matches!(&m, Match::Any(ms) if ms.len() == 3));
        let m = (constant(true) ^ constant(false)) ^ constant(true);
        assert!(matches!(&m, Match::One(ms) if ms.len() == 3));
    }

    #[test]
    fn test_mixed_kinds_nest() {
        let m = (constant(true) | constant(false)) & constant(true);
        assert!(matches!(&m, Match::All(ms) if ms.len() == 2 && matches!(ms[0], Match::Any(_))));
    }

    #[test]
    fn test_double_negation_unwraps() {
        let m = !!constant(true);
        assert!(matches!(m, Match::Predicate(_)));
    }

    #[test]
    fn test_all_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = AtomicUsize::new(0);
        let doc = HtmlDocument::parse("<p></p>");
        let counting = Match::from_fn(|_| {
            calls.fetch_add(1, Ordering::Relaxed);
            true
        });
        let m = constant(false) & counting;
        assert!(!m.matches(doc.root()));
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_debug_output() {
        let m = !(constant(true) & constant(false));
        assert_eq!(format!("{m:?}"), "Not(All([Predicate(..), Predicate(..)]))");
    }
}
