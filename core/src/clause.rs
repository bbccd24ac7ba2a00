//! `Clause` — Pattern + handler, applied to an expression later
//!
//! A clause is the deferred form of an attach step. It can be built before the
//! expression exists, stored, and applied with `expression | clause`.

use crate::{Pattern, PatternKind};
use std::fmt;

/// Applies a pre-built clause to a match expression.
///
/// Implemented by [`Clause`] for [`Match`](crate::Match) and
/// [`MultiMatch`](crate::MultiMatch), and by
/// [`VariantClause`](crate::VariantClause) for
/// [`VariantMatch`](crate::VariantMatch). Every expression type implements
/// `BitOr<C>` for any `C: Attach<Self>`, which is what makes
/// `expression | clause` work.
pub trait Attach<M> {
    /// Perform the attach step against `expression` and return it.
    fn attach_to(self, expression: M) -> M;
}

/// A pattern bound to its handler.
///
/// # Type Parameters
///
/// - `S`: The subject shape the pattern tests
/// - `F`: The handler; its signature is checked when the clause is attached
///
/// # Example
///
/// ```
/// use casematch::prelude::*;
///
/// // Clauses built ahead of the expression
/// let is_zero = literal(0) >> |_: &i32| "zero";
/// let fallback = wildcard() >> |_: &i32| "nonzero";
///
/// let m = match_on(0) | is_zero | fallback;
/// assert_eq!(m.materialize::<&str>(), Ok("zero"));
/// ```
pub struct Clause<'p, S, F> {
    pattern: Pattern<'p, S>,
    handler: F,
}

impl<'p, S, F> Clause<'p, S, F> {
    /// Bind a pattern to a handler.
    pub fn new(pattern: Pattern<'p, S>, handler: F) -> Self {
        Self { pattern, handler }
    }

    /// The clause's pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern<'p, S> {
        &self.pattern
    }

    /// Kind of the clause's pattern.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.pattern.kind()
    }

    /// Split into pattern and handler.
    pub fn into_parts(self) -> (Pattern<'p, S>, F) {
        (self.pattern, self.handler)
    }
}

impl<S, F> fmt::Debug for Clause<'_, S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}
