//! Shared attach/resolve core for all match flavors
//!
//! `Match`, `MultiMatch` and `VariantMatch` differ only in how they call their
//! handlers. The state machine lives here:
//!
//! ```text
//! Unresolved ──(clause accepts)──▶ Resolved(index)
//!     │                               │
//!     └── materialize: NotResolved    └── materialize: value or ResultTypeMismatch
//! ```

use crate::{ClauseOutcome, ClauseStep, MatchError, PatternKind, ResultCell};
use std::any;
use std::convert::Infallible;
use tracing::{debug, trace};

/// Subject + result cell + resolution state.
///
/// # INV (Dijkstra): First-match-wins
///
/// Once `resolved_by` is set, no later step evaluates its pattern or runs its
/// handler, and the cell is never written again.
///
/// # INV: Failed steps leave no trace
///
/// If a pattern or handler panics (or a fallible handler returns `Err`), the
/// clause counter, resolution state and trace are exactly as they were before
/// the step began.
pub(crate) struct Expression<S> {
    subject: S,
    cell: ResultCell,
    clauses: usize,
    resolved_by: Option<usize>,
    trace: Option<Vec<ClauseStep>>,
}

impl<S> Expression<S> {
    pub(crate) fn new(subject: S) -> Self {
        Self {
            subject,
            cell: ResultCell::new(),
            clauses: 0,
            resolved_by: None,
            trace: None,
        }
    }

    pub(crate) fn traced(subject: S) -> Self {
        Self {
            trace: Some(Vec::new()),
            ..Self::new(subject)
        }
    }

    /// One attach step with an infallible handler.
    pub(crate) fn step<R, A, H>(&mut self, kind: PatternKind, accepts: A, handler: H)
    where
        R: 'static,
        A: FnOnce(&S) -> bool,
        H: FnOnce(&S) -> R,
    {
        let result: Result<(), Infallible> =
            self.try_step(kind, accepts, |subject| Ok(handler(subject)));
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// One attach step.
    ///
    /// `accepts` runs only while unresolved; `handler` runs only when `accepts`
    /// returned `true`. A handler `Err` is handed back untouched.
    pub(crate) fn try_step<R, E, A, H>(
        &mut self,
        kind: PatternKind,
        accepts: A,
        handler: H,
    ) -> Result<(), E>
    where
        R: 'static,
        A: FnOnce(&S) -> bool,
        H: FnOnce(&S) -> Result<R, E>,
    {
        let index = self.clauses;

        if let Some(winner) = self.resolved_by {
            trace!(index, %kind, winner, "clause skipped: already resolved");
            self.record(index, kind, ClauseOutcome::Skipped);
            return Ok(());
        }

        if !accepts(&self.subject) {
            trace!(index, %kind, "clause rejected");
            self.record(index, kind, ClauseOutcome::Rejected);
            return Ok(());
        }

        let value = handler(&self.subject)?;
        self.cell.store(value);
        self.resolved_by = Some(index);
        debug!(
            index,
            %kind,
            result_type = any::type_name::<R>(),
            "match resolved"
        );
        self.record(index, kind, ClauseOutcome::Accepted);
        Ok(())
    }

    fn record(&mut self, index: usize, kind: PatternKind, outcome: ClauseOutcome) {
        self.clauses = index + 1;
        if let Some(steps) = &mut self.trace {
            steps.push(ClauseStep {
                index,
                kind,
                outcome,
            });
        }
    }

    pub(crate) fn materialize<T: 'static>(self) -> Result<T, MatchError> {
        let clauses = self.clauses;
        self.cell
            .into_inner::<T>()
            .unwrap_or(Err(MatchError::NotResolved { clauses }))
            .inspect_err(|err| debug!(%err, "materialization failed"))
    }

    pub(crate) fn peek<T: 'static>(&self) -> Result<&T, MatchError> {
        self.cell
            .get::<T>()
            .unwrap_or(Err(MatchError::NotResolved {
                clauses: self.clauses,
            }))
            .inspect_err(|err| debug!(%err, "peek failed"))
    }

    pub(crate) fn subject(&self) -> &S {
        &self.subject
    }

    pub(crate) fn into_subject(self) -> S {
        self.subject
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.resolved_by.is_some()
    }

    pub(crate) fn resolved_by(&self) -> Option<usize> {
        self.resolved_by
    }

    pub(crate) fn clauses(&self) -> usize {
        self.clauses
    }

    pub(crate) fn stored_type(&self) -> Option<&'static str> {
        self.cell.stored_type()
    }

    pub(crate) fn trace(&self) -> Option<&[ClauseStep]> {
        self.trace.as_deref()
    }
}
