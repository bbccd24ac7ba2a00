//! Evaluation trace types for debugging clause chains.
//!
//! A traced expression (built with `Match::traced`, `MultiMatch::traced` or
//! `VariantMatch::traced`) records one [`ClauseStep`] per attached clause:
//! which kind of pattern it was and whether it accepted, rejected, or was
//! skipped because an earlier clause had already resolved the expression.
//!
//! # Example
//!
//! ```
//! use casematch::prelude::*;
//!
//! let m = Match::traced(3)
//!     .with(literal(1), |_| "one")
//!     .with(guard(|n: &i32| n % 2 == 1), |_| "odd")
//!     .with(wildcard(), |_| "other");
//!
//! let outcomes: Vec<ClauseOutcome> = m
//!     .trace()
//!     .unwrap_or_default()
//!     .iter()
//!     .map(|step| step.outcome)
//!     .collect();
//! assert_eq!(
//!     outcomes,
//!     [ClauseOutcome::Rejected, ClauseOutcome::Accepted, ClauseOutcome::Skipped]
//! );
//! ```

use std::fmt;

/// The four pattern kinds a clause can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatternKind {
    /// Value equality against an expected value.
    Literal,
    /// Accepts everything.
    Wildcard,
    /// User predicate.
    Guard,
    /// Active-alternative check on a tagged union.
    TypeTag,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Literal => "literal",
            Self::Wildcard => "wildcard",
            Self::Guard => "guard",
            Self::TypeTag => "type_tag",
        })
    }
}

/// What happened to one clause during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClauseOutcome {
    /// The pattern accepted the subject and the handler ran.
    Accepted,
    /// The pattern was evaluated and did not accept.
    Rejected,
    /// Attached after resolution; the pattern was never evaluated.
    Skipped,
}

/// One clause's evaluation in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClauseStep {
    /// Attachment index (0-based).
    pub index: usize,
    /// Kind of the clause's pattern.
    pub kind: PatternKind,
    /// Evaluation outcome.
    pub outcome: ClauseOutcome,
}

impl ClauseStep {
    /// Returns `true` if this clause resolved the expression.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.outcome == ClauseOutcome::Accepted
    }

    /// Returns `true` if this clause's pattern was actually evaluated.
    #[must_use]
    pub fn evaluated(&self) -> bool {
        self.outcome != ClauseOutcome::Skipped
    }
}

impl fmt::Display for ClauseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            ClauseOutcome::Accepted => "accepted",
            ClauseOutcome::Rejected => "rejected",
            ClauseOutcome::Skipped => "skipped",
        };
        write!(f, "clause[{}] {}: {outcome}", self.index, self.kind)
    }
}
