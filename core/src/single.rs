//! Match — Single-subject match expression
//!
//! The entry point for matching one value: build with [`match_on`], attach
//! clauses in order, then [`materialize`](Match::materialize) the result.

use crate::expression::Expression;
use crate::{Attach, Clause, ClauseStep, MatchError, Pattern};
use std::fmt::{self, Debug};
use std::ops::BitOr;

/// Single-subject match expression with first-match-wins semantics.
///
/// # Type Parameters
///
/// - `S`: The subject type. The expression owns the subject for its whole lifetime.
///
/// # INV (Dijkstra): First-match-wins
///
/// Clauses are evaluated in attachment order. The first accepting pattern runs
/// its handler; every later clause is skipped without evaluating its pattern.
///
/// # Example
///
/// ```
/// use casematch::prelude::*;
///
/// fn classify(n: i32) -> Result<String, MatchError> {
///     match_on(n)
///         .with(literal(0), |_| "zero".to_string())
///         .with(guard(|n: &i32| *n < 0), |n| format!("negative {}", -n))
///         .with(wildcard(), |n| format!("positive {n}"))
///         .materialize()
/// }
///
/// assert_eq!(classify(0).as_deref(), Ok("zero"));
/// assert_eq!(classify(-4).as_deref(), Ok("negative 4"));
/// assert_eq!(classify(9).as_deref(), Ok("positive 9"));
/// ```
pub struct Match<S> {
    expr: Expression<S>,
}

/// Start a single-subject match.
pub fn match_on<S>(subject: S) -> Match<S> {
    Match::new(subject)
}

impl<S> Match<S> {
    /// Create an unresolved match around `subject`.
    pub fn new(subject: S) -> Self {
        Self {
            expr: Expression::new(subject),
        }
    }

    /// Create an unresolved match that records a [`ClauseStep`] per clause.
    pub fn traced(subject: S) -> Self {
        Self {
            expr: Expression::traced(subject),
        }
    }

    /// Attach a clause and return the expression (builder form).
    ///
    /// If already resolved this is a no-op: the pattern is not evaluated and
    /// the handler does not run.
    #[must_use]
    pub fn with<R, F>(mut self, pattern: Pattern<'_, S>, handler: F) -> Self
    where
        R: 'static,
        F: FnOnce(&S) -> R,
    {
        self.attach(pattern, handler);
        self
    }

    /// Attach a clause in place.
    ///
    /// If the pattern or handler panics, the expression is left exactly as it
    /// was before this call.
    pub fn attach<R, F>(&mut self, pattern: Pattern<'_, S>, handler: F) -> &mut Self
    where
        R: 'static,
        F: FnOnce(&S) -> R,
    {
        self.expr
            .step(pattern.kind(), |subject| pattern.accepts(subject), handler);
        self
    }

    /// Attach a clause whose handler can fail.
    ///
    /// On acceptance, an `Err` from the handler is returned as-is and the
    /// expression is dropped. On `Ok`, the value is stored as with [`with`](Self::with).
    ///
    /// # Errors
    ///
    /// Returns the handler's error unchanged.
    pub fn try_with<R, E, F>(mut self, pattern: Pattern<'_, S>, handler: F) -> Result<Self, E>
    where
        R: 'static,
        F: FnOnce(&S) -> Result<R, E>,
    {
        self.try_attach(pattern, handler)?;
        Ok(self)
    }

    /// In-place form of [`try_with`](Self::try_with).
    ///
    /// On `Err` the expression stays unresolved and the clause is not counted.
    ///
    /// # Errors
    ///
    /// Returns the handler's error unchanged.
    pub fn try_attach<R, E, F>(&mut self, pattern: Pattern<'_, S>, handler: F) -> Result<&mut Self, E>
    where
        R: 'static,
        F: FnOnce(&S) -> Result<R, E>,
    {
        self.expr
            .try_step(pattern.kind(), |subject| pattern.accepts(subject), handler)?;
        Ok(self)
    }

    /// Read the result as `T`, consuming the expression.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NotResolved`] if no clause accepted the subject
    /// - [`MatchError::ResultTypeMismatch`] if the winning handler did not return a `T`
    pub fn materialize<T: 'static>(self) -> Result<T, MatchError> {
        self.expr.materialize()
    }

    /// Borrow the result as `T`.
    ///
    /// # Errors
    ///
    /// Same as [`materialize`](Self::materialize).
    pub fn peek<T: 'static>(&self) -> Result<&T, MatchError> {
        self.expr.peek()
    }

    /// The subject.
    #[must_use]
    pub fn subject(&self) -> &S {
        self.expr.subject()
    }

    /// Give the subject back, discarding any result.
    pub fn into_subject(self) -> S {
        self.expr.into_subject()
    }

    /// Returns `true` once a clause has accepted.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.expr.is_resolved()
    }

    /// Attachment index of the clause that resolved the expression.
    #[must_use]
    pub fn resolved_by(&self) -> Option<usize> {
        self.expr.resolved_by()
    }

    /// Number of clauses attached so far.
    #[must_use]
    pub fn clauses(&self) -> usize {
        self.expr.clauses()
    }

    /// Type name of the stored result, if resolved.
    #[must_use]
    pub fn result_type(&self) -> Option<&'static str> {
        self.expr.stored_type()
    }

    /// Recorded clause steps, if built with [`traced`](Self::traced).
    #[must_use]
    pub fn trace(&self) -> Option<&[ClauseStep]> {
        self.expr.trace()
    }
}

impl<'p, S, F, R> Attach<Match<S>> for Clause<'p, S, F>
where
    R: 'static,
    F: FnOnce(&S) -> R,
{
    fn attach_to(self, expression: Match<S>) -> Match<S> {
        let (pattern, handler) = self.into_parts();
        expression.with(pattern, handler)
    }
}

/// `expression | clause` applies the clause.
impl<S, C: Attach<Match<S>>> BitOr<C> for Match<S> {
    type Output = Self;

    fn bitor(self, clause: C) -> Self {
        clause.attach_to(self)
    }
}

impl<S: Debug> Debug for Match<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("subject", self.subject())
            .field("clauses", &self.clauses())
            .field("resolved_by", &self.resolved_by())
            .field("result_type", &self.result_type())
            .finish()
    }
}
