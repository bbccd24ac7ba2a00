//! casematch-test: Test domain for conformance testing
//!
//! Provides a small integer-subject domain whose clause chains are plain data,
//! so conformance fixtures can describe them in YAML and run them through the
//! engine.
//!
//! # Example
//!
//! ```
//! use casematch_test::prelude::*;
//!
//! let chain = Chain::new()
//!     .clause(Rule::Literal(0), "zero")
//!     .clause(Rule::Guard(Bound::Lt(0)), "negative {subject}")
//!     .clause(Rule::Wildcard, "positive {subject}");
//!
//! assert_eq!(chain.evaluate(-3).as_deref(), Ok("negative -3"));
//! assert_eq!(chain.evaluate(0).as_deref(), Ok("zero"));
//! ```

use casematch::prelude::*;
use std::fmt;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Subject type of the test domain.
pub type Subject = i64;

/// Guard predicates over an integer subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `n < x`
    Lt(Subject),
    /// `n <= x`
    Le(Subject),
    /// `n > x`
    Gt(Subject),
    /// `n >= x`
    Ge(Subject),
    /// `lo <= n <= hi`
    Between(Subject, Subject),
    Even,
    Odd,
}

impl Bound {
    /// Evaluate the predicate.
    #[must_use]
    pub fn holds(self, n: Subject) -> bool {
        match self {
            Self::Lt(x) => n < x,
            Self::Le(x) => n <= x,
            Self::Gt(x) => n > x,
            Self::Ge(x) => n >= x,
            Self::Between(lo, hi) => (lo..=hi).contains(&n),
            Self::Even => n % 2 == 0,
            Self::Odd => n % 2 != 0,
        }
    }
}

/// One clause's pattern, as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Wildcard,
    Literal(Subject),
    OneOf(Vec<Subject>),
    Guard(Bound),
}

impl Rule {
    /// Build the engine pattern for this rule.
    #[must_use]
    pub fn pattern(&self) -> Pattern<'_, Subject> {
        match self {
            Self::Wildcard => wildcard(),
            Self::Literal(expected) => literal(*expected),
            Self::OneOf(candidates) => one_of(candidates.iter().copied()),
            Self::Guard(bound) => {
                let bound = *bound;
                guard(move |n: &Subject| bound.holds(*n))
            }
        }
    }
}

/// Clause result text; `{subject}` expands to the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    /// Create a template.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Expand the template for `subject`.
    #[must_use]
    pub fn render(&self, subject: Subject) -> String {
        self.0.replace("{subject}", &subject.to_string())
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered clause list over integer subjects.
///
/// Each evaluation builds a fresh match expression and attaches the clauses
/// in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    clauses: Vec<(Rule, Template)>,
}

/// Result of a traced chain evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Materialized result.
    pub result: Result<String, MatchError>,
    /// Index of the accepting clause, if any.
    pub resolved_by: Option<usize>,
    /// One step per clause.
    pub steps: Vec<ClauseStep>,
}

impl Chain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause (builder pattern).
    #[must_use]
    pub fn clause(mut self, rule: Rule, template: impl Into<Template>) -> Self {
        self.clauses.push((rule, template.into()));
        self
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if the chain has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate against `subject`.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotResolved`] if no clause accepts the subject.
    pub fn evaluate(&self, subject: Subject) -> Result<String, MatchError> {
        self.build(Match::new(subject)).materialize()
    }

    /// Evaluate against `subject`, recording every clause step.
    #[must_use]
    pub fn evaluate_traced(&self, subject: Subject) -> Evaluation {
        let m = self.build(Match::traced(subject));
        let resolved_by = m.resolved_by();
        let steps = m.trace().map(<[ClauseStep]>::to_vec).unwrap_or_default();
        Evaluation {
            result: m.materialize(),
            resolved_by,
            steps,
        }
    }

    fn build(&self, mut m: Match<Subject>) -> Match<Subject> {
        for (rule, template) in &self.clauses {
            m.attach(rule.pattern(), |n| template.render(*n));
        }
        m
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{Bound, Chain, Evaluation, Rule, Subject, Template};
    pub use casematch::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Bound::Lt(3).holds(2));
        assert!(!Bound::Lt(3).holds(3));
        assert!(Bound::Le(3).holds(3));
        assert!(Bound::Gt(-1).holds(0));
        assert!(Bound::Ge(0).holds(0));
        assert!(Bound::Between(1, 5).holds(5));
        assert!(!Bound::Between(1, 5).holds(6));
        assert!(Bound::Even.holds(-4));
        assert!(Bound::Odd.holds(-3));
    }

    #[test]
    fn test_template_expands_subject() {
        let template = Template::new("got {subject}, again {subject}");
        assert_eq!(template.render(7), "got 7, again 7");
        assert_eq!(Template::from("plain").render(1), "plain");
    }

    #[test]
    fn test_rule_patterns() {
        assert_eq!(Rule::Wildcard.pattern().kind(), PatternKind::Wildcard);
        assert_eq!(Rule::Literal(1).pattern().kind(), PatternKind::Literal);
        assert_eq!(Rule::OneOf(vec![1, 2]).pattern().kind(), PatternKind::Literal);
        assert_eq!(Rule::Guard(Bound::Even).pattern().kind(), PatternKind::Guard);
        assert!(Rule::OneOf(vec![1, 2]).pattern().accepts(&2));
        assert!(!Rule::OneOf(Vec::new()).pattern().accepts(&2));
    }

    #[test]
    fn test_chain_first_match_wins() {
        let chain = Chain::new()
            .clause(Rule::Guard(Bound::Gt(0)), "positive")
            .clause(Rule::Guard(Bound::Gt(10)), "big")
            .clause(Rule::Wildcard, "other");
        assert_eq!(chain.evaluate(50).as_deref(), Ok("positive"));
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_chain_unresolved() {
        let chain = Chain::new().clause(Rule::Literal(1), "one");
        assert_eq!(
            chain.evaluate(2),
            Err(MatchError::NotResolved { clauses: 1 })
        );
        assert!(Chain::new().is_empty());
        assert_eq!(
            Chain::new().evaluate(0),
            Err(MatchError::NotResolved { clauses: 0 })
        );
    }

    #[test]
    fn test_traced_evaluation() {
        let chain = Chain::new()
            .clause(Rule::Literal(0), "zero")
            .clause(Rule::OneOf(vec![1, 2, 3]), "small {subject}")
            .clause(Rule::Wildcard, "other");
        let evaluation = chain.evaluate_traced(2);

        assert_eq!(evaluation.result.as_deref(), Ok("small 2"));
        assert_eq!(evaluation.resolved_by, Some(1));
        let outcomes: Vec<_> = evaluation.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            [
                ClauseOutcome::Rejected,
                ClauseOutcome::Accepted,
                ClauseOutcome::Skipped
            ]
        );
    }
}
