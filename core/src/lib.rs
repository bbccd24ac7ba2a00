//! casematch - runtime pattern-matching expressions
//!
//! A match expression owns a subject, accepts `pattern → handler` clauses one at a
//! time, and resolves on the first clause whose pattern accepts the subject.
//!
//! # Architecture
//!
//! - [`Pattern<S>`] — Closed set of pattern kinds: Literal, Wildcard, Guard, TypeTag
//! - [`ValueMatcher<S>`] — Literal comparisons (whole value, per tuple position, value sets)
//! - [`Clause<S, F>`] — A pattern bound to its handler, applied later with `|`
//! - [`Match<S>`] — Single-subject expression
//! - [`MultiMatch<(A, B, ..)>`] — Fixed-arity subject group, positional guards and handlers
//! - [`VariantMatch<U>`] — Tagged-union subject, handlers receive the extracted payload
//! - [`ResultCell`] — Write-once, type-erased storage for the winning handler's output
//!
//! # Key Design Insights
//!
//! 1. **First-match-wins**: clauses are evaluated in attachment order. After the first
//!    acceptance, later clauses are skipped without evaluating their patterns.
//!
//! 2. **Exactly-once**: at most one handler runs per expression.
//!
//! 3. **Erasure at the result**: the winning handler's output is stored type-erased and
//!    checked against the requested type only at [`Match::materialize`].
//!
//! # Example
//!
//! ```
//! use casematch::prelude::*;
//!
//! let label = match_on(5)
//!     .with(literal(0), |_| "zero")
//!     .with(wildcard(), |_| "nonzero")
//!     .materialize::<&str>();
//!
//! assert_eq!(label, Ok("nonzero"));
//! ```
//!
//! The same chain in operator notation. Closures in operator position need an
//! annotated parameter type:
//!
//! ```
//! use casematch::prelude::*;
//!
//! let label = (match_on(0)
//!     | (literal(0) >> |_: &i32| "zero")
//!     | (wildcard() >> |_: &i32| "nonzero"))
//!     .materialize::<&str>();
//!
//! assert_eq!(label, Ok("zero"));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod clause;
mod expression;
mod multi;
mod pattern;
mod result_cell;
mod single;
mod trace;
mod value_matcher;
mod variant;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use clause::{Attach, Clause};
pub use multi::{guard1, guard2, guard3, guard4, match_all, MultiMatch};
pub use pattern::{guard, literal, one_of, wildcard, Pattern, TagProbe};
pub use result_cell::ResultCell;
pub use single::{match_on, Match};
pub use value_matcher::{fields, Exact, Field, Fields, OneOf, ValueMatcher};
pub use variant::{match_variant, type_tag, Alternative, TypeTag, VariantClause, VariantMatch};

// Trace types
pub use trace::{ClauseOutcome, ClauseStep, PatternKind};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use casematch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Pattern builders
        fields,
        guard,
        guard1,
        guard2,
        guard3,
        guard4,
        literal,
        // Entry points
        match_all,
        match_on,
        match_variant,
        one_of,
        type_tag,
        wildcard,
        // Traits
        Alternative,
        Attach,
        // Core types
        Clause,
        ClauseOutcome,
        ClauseStep,
        Field,
        Match,
        // Errors
        MatchError,
        MultiMatch,
        Pattern,
        PatternKind,
        TypeTag,
        ValueMatcher,
        VariantMatch,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors raised when reading a match expression's result.
///
/// Materialization errors come from the clause chain itself: the same chain
/// on the same subject fails the same way every time.
///
/// Panics inside guards and handlers are not translated into this type; they
/// unwind to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// No clause accepted the subject.
    #[error(
        "match not resolved: none of the {clauses} attached clause(s) accepted the subject; \
         end the chain with a wildcard clause"
    )]
    NotResolved {
        /// Number of clauses attached before materialization.
        clauses: usize,
    },

    /// The winning handler produced a different type than the one requested.
    #[error(
        "result type mismatch: requested `{requested}`, but the winning handler produced `{actual}`"
    )]
    ResultTypeMismatch {
        /// The type passed to `materialize` / `peek`.
        requested: &'static str,
        /// The type the winning handler returned.
        actual: &'static str,
    },

    /// A payload was extracted for an alternative the union does not currently hold.
    #[error("invalid extraction: the union does not currently hold `{expected}`")]
    InvalidExtraction {
        /// The payload type that was requested.
        expected: &'static str,
    },
}
