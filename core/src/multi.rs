//! `MultiMatch` — Fixed-arity subject groups
//!
//! A `MultiMatch` owns a tuple of 1 to 4 subjects. Patterns test the whole
//! tuple; guards built with [`guard1`]..[`guard4`] and all handlers receive the
//! values positionally.

use crate::expression::Expression;
use crate::{Attach, Clause, ClauseStep, MatchError, Pattern};
use std::fmt::{self, Debug};
use std::ops::BitOr;

/// Multi-subject match expression.
///
/// Same state machine and first-match-wins contract as [`Match`](crate::Match),
/// with a tuple subject.
///
/// # Example
///
/// ```
/// use casematch::prelude::*;
///
/// fn newton_sqrt(x: f64, guess: f64) -> f64 {
///     match_all((x, guess))
///         .with(guard2(|x: &f64, g: &f64| (g * g - x).abs() < 1e-4), |_, g| *g)
///         .with(wildcard(), |x, g| newton_sqrt(*x, (g + x / g) / 2.0))
///         .materialize()
///         .unwrap_or(f64::NAN)
/// }
///
/// assert!((newton_sqrt(2.0, 1.0) - 2f64.sqrt()).abs() < 1e-4);
/// ```
pub struct MultiMatch<S> {
    expr: Expression<S>,
}

/// Start a multi-subject match over a tuple of subjects.
pub fn match_all<S>(subjects: S) -> MultiMatch<S> {
    MultiMatch::new(subjects)
}

impl<S> MultiMatch<S> {
    /// Create an unresolved match around the subject tuple.
    pub fn new(subjects: S) -> Self {
        Self {
            expr: Expression::new(subjects),
        }
    }

    /// Create an unresolved match that records a [`ClauseStep`] per clause.
    pub fn traced(subjects: S) -> Self {
        Self {
            expr: Expression::traced(subjects),
        }
    }

    /// Read the result as `T`, consuming the expression.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NotResolved`] if no clause accepted the subjects
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

    /// The subject tuple.
    #[must_use]
    pub fn subjects(&self) -> &S {
        self.expr.subject()
    }

    /// Give the subject tuple back, discarding any result.
    pub fn into_subjects(self) -> S {
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

/// `expression | clause` applies the clause.
impl<S, C: Attach<MultiMatch<S>>> BitOr<C> for MultiMatch<S> {
    type Output = Self;

    fn bitor(self, clause: C) -> Self {
        clause.attach_to(self)
    }
}

impl<S: Debug> Debug for MultiMatch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiMatch")
            .field("subjects", self.subjects())
            .field("clauses", &self.clauses())
            .field("resolved_by", &self.resolved_by())
            .field("result_type", &self.result_type())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Per-arity positional API
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! positional {
    ($guard:ident: $($name:ident . $idx:tt),+) => {
        /// Guard over a subject tuple; the predicate receives the values positionally.
        ///
        /// Annotate the closure parameters so the closure is general over the
        /// borrows it receives.
        pub fn $guard<'p, $($name: 'p,)+ F>(predicate: F) -> Pattern<'p, ($($name,)+)>
        where
            F: Fn($(&$name),+) -> bool + 'p,
        {
            Pattern::Guard(Box::new(move |subjects: &($($name,)+)| {
                predicate($(&subjects.$idx),+)
            }))
        }

        impl<$($name),+> MultiMatch<($($name,)+)> {
            /// Attach a clause and return the expression (builder form).
            ///
            /// If already resolved this is a no-op: the pattern is not evaluated
            /// and the handler does not run.
            #[must_use]
            pub fn with<R, F>(mut self, pattern: Pattern<'_, ($($name,)+)>, handler: F) -> Self
            where
                R: 'static,
                F: FnOnce($(&$name),+) -> R,
            {
                self.attach(pattern, handler);
                self
            }

            /// Attach a clause in place.
            ///
            /// If the pattern or handler panics, the expression is left exactly
            /// as it was before this call.
            pub fn attach<R, F>(&mut self, pattern: Pattern<'_, ($($name,)+)>, handler: F) -> &mut Self
            where
                R: 'static,
                F: FnOnce($(&$name),+) -> R,
            {
                self.expr.step(
                    pattern.kind(),
                    |subjects| pattern.accepts(subjects),
                    |subjects| handler($(&subjects.$idx),+),
                );
                self
            }

            /// Attach a clause whose handler can fail.
            ///
            /// # Errors
            ///
            /// Returns the handler's error unchanged; the expression is dropped.
            pub fn try_with<R, E, F>(
                mut self,
                pattern: Pattern<'_, ($($name,)+)>,
                handler: F,
            ) -> Result<Self, E>
            where
                R: 'static,
                F: FnOnce($(&$name),+) -> Result<R, E>,
            {
                self.expr.try_step(
                    pattern.kind(),
                    |subjects| pattern.accepts(subjects),
                    |subjects| handler($(&subjects.$idx),+),
                )?;
                Ok(self)
            }
        }

        impl<'p, $($name,)+ F, R> Attach<MultiMatch<($($name,)+)>> for Clause<'p, ($($name,)+), F>
        where
            R: 'static,
            F: FnOnce($(&$name),+) -> R,
        {
            fn attach_to(self, expression: MultiMatch<($($name,)+)>) -> MultiMatch<($($name,)+)> {
                let (pattern, handler) = self.into_parts();
                expression.with(pattern, handler)
            }
        }
    };
}

positional!(guard1: A.0);
positional!(guard2: A.0, B.1);
positional!(guard3: A.0, B.1, C.2);
positional!(guard4: A.0, B.1, C.2, D.3);
