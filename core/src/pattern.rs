//! Pattern — The closed set of subject tests
//!
//! A [`Pattern<S>`] decides whether a clause accepts a subject of shape `S`.
//! `S` is a single value for [`Match`](crate::Match), a tuple for
//! [`MultiMatch`](crate::MultiMatch), and the union type for
//! [`VariantMatch`](crate::VariantMatch).

use crate::{Alternative, Clause, Exact, OneOf, PatternKind, TypeTag, ValueMatcher};
use std::any;
use std::fmt::{self, Debug};
use std::ops::Shr;

/// A subject test.
///
/// # Variants
///
/// - `Literal` — Equality against expected literal data (see [`ValueMatcher`])
/// - `Wildcard` — Accepts everything
/// - `Guard` — User predicate over the subject
/// - `TypeTag` — Accepts when a tagged union holds one specific alternative
///
/// Patterns are immutable once built. Attaching a pattern consumes it, so a
/// pattern is evaluated at most once.
///
/// # Example
///
/// ```
/// use casematch::prelude::*;
///
/// assert!(literal(3).accepts(&3));
/// assert!(wildcard::<&str>().accepts(&"anything"));
/// assert!(guard(|n: &i32| *n > 10).accepts(&11));
/// assert!(!one_of([1, 2]).accepts(&3));
/// ```
pub enum Pattern<'p, S> {
    /// Equality against expected literal data.
    Literal(Box<dyn ValueMatcher<S> + 'p>),

    /// Accepts every subject.
    Wildcard,

    /// Accepts when the predicate returns `true`.
    Guard(Box<dyn Fn(&S) -> bool + 'p>),

    /// Accepts when the union currently holds one alternative.
    TypeTag(TagProbe<S>),
}

impl<'p, S> Pattern<'p, S> {
    /// Test the subject.
    ///
    /// A `Guard` predicate runs exactly once per call. A panic inside it
    /// propagates to the caller.
    pub fn accepts(&self, subject: &S) -> bool {
        match self {
            Self::Literal(matcher) => matcher.matches(subject),
            Self::Wildcard => true,
            Self::Guard(predicate) => predicate(subject),
            Self::TypeTag(probe) => probe.accepts(subject),
        }
    }

    /// The kind of this pattern.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Literal(_) => PatternKind::Literal,
            Self::Wildcard => PatternKind::Wildcard,
            Self::Guard(_) => PatternKind::Guard,
            Self::TypeTag(_) => PatternKind::TypeTag,
        }
    }

    /// Returns `true` if this is the `Wildcard` variant.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Bind this pattern to a handler, producing a deferred [`Clause`].
    pub fn then<F>(self, handler: F) -> Clause<'p, S, F> {
        Clause::new(self, handler)
    }
}

impl<S> Debug for Pattern<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(matcher) => f.debug_tuple("Literal").field(matcher).finish(),
            Self::Wildcard => f.write_str("Wildcard"),
            Self::Guard(_) => f.write_str("Guard(..)"),
            Self::TypeTag(probe) => f.debug_tuple("TypeTag").field(&probe.name()).finish(),
        }
    }
}

/// `pattern >> handler` builds a [`Clause`].
impl<'p, S, F> Shr<F> for Pattern<'p, S> {
    type Output = Clause<'p, S, F>;

    fn shr(self, handler: F) -> Self::Output {
        Clause::new(self, handler)
    }
}

impl<'p, U, P: Alternative<U>> From<TypeTag<P>> for Pattern<'p, U> {
    fn from(_: TypeTag<P>) -> Self {
        Self::TypeTag(TagProbe::of::<P>())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TagProbe
// ═══════════════════════════════════════════════════════════════════════════════

/// Type-erased alternative check over a union `U`.
///
/// This is the untyped half of a [`TypeTag`]: it can tell whether the union
/// holds the alternative, but cannot hand out the payload.
pub struct TagProbe<U> {
    name: &'static str,
    probe: fn(&U) -> bool,
}

impl<U> TagProbe<U> {
    /// Probe for the alternative carrying payload `P`.
    #[must_use]
    pub fn of<P: Alternative<U>>() -> Self {
        Self {
            name: any::type_name::<P>(),
            probe: P::is_active,
        }
    }

    /// Payload type name of the probed alternative.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the union currently holds the probed alternative.
    #[inline]
    pub fn accepts(&self, union: &U) -> bool {
        (self.probe)(union)
    }
}

impl<U> Clone for TagProbe<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for TagProbe<U> {}

impl<U> Debug for TagProbe<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TagProbe").field(&self.name).finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builders
// ═══════════════════════════════════════════════════════════════════════════════

/// Accept subjects equal to `expected`.
///
/// For multi-subject matches, pass the whole expected tuple, or use
/// [`fields`](crate::fields) to leave positions open.
pub fn literal<'p, T>(expected: T) -> Pattern<'p, T>
where
    T: PartialEq + Debug + 'p,
{
    Pattern::Literal(Box::new(Exact::new(expected)))
}

/// Accept subjects equal to any of the candidates.
pub fn one_of<'p, T>(candidates: impl IntoIterator<Item = T>) -> Pattern<'p, T>
where
    T: PartialEq + Debug + 'p,
{
    Pattern::Literal(Box::new(OneOf::new(candidates)))
}

/// Accept every subject.
#[must_use]
pub fn wildcard<'p, S>() -> Pattern<'p, S> {
    Pattern::Wildcard
}

/// Accept subjects for which `predicate` returns `true`.
///
/// Annotate the closure parameter (`|n: &i32| ..`) so the closure is general
/// over the borrow it receives.
///
/// For multi-subject matches, [`guard2`](crate::guard2) and friends pass the
/// values positionally instead of as one tuple.
pub fn guard<'p, S, F>(predicate: F) -> Pattern<'p, S>
where
    F: Fn(&S) -> bool + 'p,
{
    Pattern::Guard(Box::new(predicate))
}
