//! `ValueMatcher` — Literal comparisons behind the Literal pattern kind
//!
//! A Literal pattern owns one boxed [`ValueMatcher`]. The trait lets whole-value
//! equality, per-position tuple equality, and literal sets share one pattern kind.
//!
//! # Available Matchers
//!
//! - [`Exact`] — Whole-subject equality (single values and whole tuples)
//! - [`Fields`] — Per-position equality over tuples, with [`Field::Any`] holes
//! - [`OneOf`] — Subject equals any of a set of literals

use crate::Pattern;
use std::fmt::Debug;

/// Compares a subject against expected literal data.
///
/// # Example
///
/// ```
/// use casematch::{Exact, ValueMatcher};
///
/// let matcher = Exact::new(7);
/// assert!(matcher.matches(&7));
/// assert!(!matcher.matches(&8));
/// ```
pub trait ValueMatcher<S>: Debug {
    /// Check if the subject matches.
    fn matches(&self, subject: &S) -> bool;
}

impl<S, M: ValueMatcher<S> + ?Sized> ValueMatcher<S> for Box<M> {
    fn matches(&self, subject: &S) -> bool {
        (**self).matches(subject)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Exact
// ═══════════════════════════════════════════════════════════════════════════════

/// Whole-subject equality.
///
/// For multi-subject matches the expected value is the whole tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Exact<T> {
    expected: T,
}

impl<T> Exact<T> {
    /// Create an exact matcher for the expected value.
    pub fn new(expected: T) -> Self {
        Self { expected }
    }

    /// Returns the expected value.
    #[must_use]
    pub fn expected(&self) -> &T {
        &self.expected
    }
}

impl<T: PartialEq + Debug> ValueMatcher<T> for Exact<T> {
    fn matches(&self, subject: &T) -> bool {
        *subject == self.expected
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fields
// ═══════════════════════════════════════════════════════════════════════════════

/// One position of a tuple literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// The subject value at this position must equal this one.
    Is(T),
    /// Any value at this position.
    Any,
}

impl<T: PartialEq> Field<T> {
    /// Check one subject position.
    #[inline]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::Is(expected) => value == expected,
            Self::Any => true,
        }
    }
}

/// Per-position tuple literal.
///
/// Holds a tuple of [`Field`]s, one per subject position. Accepts when every
/// `Field::Is` position is equal and ignores `Field::Any` positions.
///
/// # Example
///
/// ```
/// use casematch::{Field, Fields, ValueMatcher};
///
/// let capacity_zero = Fields::new((Field::Any, Field::Is(0)));
/// assert!(capacity_zero.matches(&(vec![1, 2, 3], 0)));
/// assert!(capacity_zero.matches(&(Vec::new(), 0)));
/// assert!(!capacity_zero.matches(&(vec![1], 4)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fields<F> {
    fields: F,
}

impl<F> Fields<F> {
    /// Wrap a tuple of [`Field`]s.
    pub fn new(fields: F) -> Self {
        Self { fields }
    }
}

macro_rules! impl_fields {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: PartialEq + Debug),+> ValueMatcher<($($name,)+)>
            for Fields<($(Field<$name>,)+)>
        {
            fn matches(&self, subject: &($($name,)+)) -> bool {
                true $(&& self.fields.$idx.matches(&subject.$idx))+
            }
        }
    };
}

impl_fields!(A.0);
impl_fields!(A.0, B.1);
impl_fields!(A.0, B.1, C.2);
impl_fields!(A.0, B.1, C.2, D.3);

/// Build a Literal pattern from per-position [`Field`]s.
///
/// ```
/// use casematch::prelude::*;
///
/// let outcome = match_all((vec![(2, 3), (3, 4)], 0))
///     .with(fields((Field::Any, Field::Is(0))), |_, _| "empty knapsack")
///     .with(wildcard(), |_, _| "keep packing")
///     .materialize::<&str>();
/// assert_eq!(outcome, Ok("empty knapsack"));
/// ```
pub fn fields<'p, S, F>(fields: F) -> Pattern<'p, S>
where
    Fields<F>: ValueMatcher<S> + 'p,
{
    Pattern::Literal(Box::new(Fields::new(fields)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// OneOf
// ═══════════════════════════════════════════════════════════════════════════════

/// Accepts when the subject equals any of the candidates.
///
/// An empty candidate list accepts nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf<T> {
    candidates: Vec<T>,
}

impl<T> OneOf<T> {
    /// Create a matcher over the candidate values.
    pub fn new(candidates: impl IntoIterator<Item = T>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }

    /// Returns the candidate values.
    #[must_use]
    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }
}

impl<T: PartialEq + Debug> ValueMatcher<T> for OneOf<T> {
    fn matches(&self, subject: &T) -> bool {
        self.candidates.contains(subject)
    }
}
