//! `VariantMatch` — Case analysis over tagged unions
//!
//! The subject is an enum whose variants each wrap one payload type. Payload
//! types implement [`Alternative<U>`] (usually through [`alternatives!`]), and a
//! [`TypeTag<P>`] dispatches on which alternative is active. Handlers receive
//! the extracted payload, not the enum.
//!
//! ```text
//! enum Op { Add(Add), Sub(Sub) }      alternatives! { Op { Add => Add, Sub => Sub } }
//!
//! match_variant(op)
//!     .with(type_tag::<Add>(), |add| ..)   // handler gets &Add
//!     .with(type_tag::<Sub>(), |sub| ..)   // handler gets &Sub
//! ```
//!
//! [`alternatives!`]: crate::alternatives

use crate::expression::Expression;
use crate::{Attach, Clause, ClauseStep, MatchError, Pattern, PatternKind};
use std::any;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ops::{BitOr, Shr};

/// A payload type carried by one variant of the union `U`.
///
/// # INV (Dijkstra): Extraction agrees with the tag
///
/// `extract(u)` returns `Some` exactly when `u` holds this alternative, and the
/// returned payload is the one stored in `u`.
pub trait Alternative<U>: Sized {
    /// The payload, if `union` currently holds this alternative.
    fn extract(union: &U) -> Option<&Self>;

    /// Returns `true` if `union` currently holds this alternative.
    fn is_active(union: &U) -> bool {
        Self::extract(union).is_some()
    }
}

/// A borrowed union dispatches like the owned one.
///
/// ```
/// use casematch::prelude::*;
///
/// enum Token {
///     Number(f64),
///     Word(String),
/// }
///
/// casematch::alternatives! { Token { Number => f64, Word => String } }
///
/// let token = Token::Number(2.5);
/// let doubled = match_variant(&token)
///     .with(type_tag::<f64>(), |n| n * 2.0)
///     .otherwise(|_| 0.0)
///     .materialize::<f64>();
/// assert_eq!(doubled, Ok(5.0));
/// ```
impl<'a, U, P: Alternative<U>> Alternative<&'a U> for P {
    fn extract<'b>(union: &'b &'a U) -> Option<&'b Self> {
        P::extract(*union)
    }
}

/// Implement [`Alternative`] for each payload of a newtype-variant enum.
///
/// ```
/// use casematch::prelude::*;
///
/// enum Token {
///     Number(f64),
///     Word(String),
/// }
///
/// casematch::alternatives! {
///     Token {
///         Number => f64,
///         Word => String,
///     }
/// }
///
/// let len = match_variant(Token::Word("hello".into()))
///     .with(type_tag::<f64>(), |_| 0)
///     .with(type_tag::<String>(), |word| word.len())
///     .materialize::<usize>();
/// assert_eq!(len, Ok(5));
/// ```
///
/// Each payload type may appear in only one variant.
#[macro_export]
macro_rules! alternatives {
    ($union:ident { $($variant:ident => $payload:ty),+ $(,)? }) => {
        $(
            impl $crate::Alternative<$union> for $payload {
                #[allow(unreachable_patterns)]
                fn extract(union: &$union) -> ::std::option::Option<&Self> {
                    match union {
                        $union::$variant(payload) => ::std::option::Option::Some(payload),
                        _ => ::std::option::Option::None,
                    }
                }
            }
        )+
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// TypeTag
// ═══════════════════════════════════════════════════════════════════════════════

/// Pattern that accepts when a union holds the alternative carrying `P`.
///
/// Carries no data. Convert to a [`Pattern`] with `Pattern::from` to use it in a
/// single-subject match, where the handler sees the whole union.
pub struct TypeTag<P> {
    _payload: PhantomData<fn() -> P>,
}

/// Tag for the alternative whose payload is `P`.
#[must_use]
pub fn type_tag<P>() -> TypeTag<P> {
    TypeTag {
        _payload: PhantomData,
    }
}

impl<P> TypeTag<P> {
    /// Payload type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        any::type_name::<P>()
    }

    /// Returns `true` if `union` holds this alternative. Never inspects the payload value.
    pub fn accepts<U>(&self, union: &U) -> bool
    where
        P: Alternative<U>,
    {
        P::is_active(union)
    }

    /// Borrow the payload.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidExtraction`] if `union` holds another alternative.
    pub fn extract<'u, U>(&self, union: &'u U) -> Result<&'u P, MatchError>
    where
        P: Alternative<U>,
    {
        P::extract(union).ok_or(MatchError::InvalidExtraction {
            expected: self.name(),
        })
    }
}

impl<P> Clone for TypeTag<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for TypeTag<P> {}

impl<P> Debug for TypeTag<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.name()).finish()
    }
}

/// A [`TypeTag`] bound to a payload handler.
///
/// Built with `type_tag::<P>() >> handler` and applied with
/// `variant_match | clause`.
pub struct VariantClause<P, F> {
    tag: TypeTag<P>,
    handler: F,
}

impl<P, F> VariantClause<P, F> {
    /// Bind a tag to a handler.
    pub fn new(tag: TypeTag<P>, handler: F) -> Self {
        Self { tag, handler }
    }

    /// Split into tag and handler.
    pub fn into_parts(self) -> (TypeTag<P>, F) {
        (self.tag, self.handler)
    }
}

impl<P, F> Debug for VariantClause<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantClause")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// `type_tag::<P>() >> handler` builds a [`VariantClause`].
impl<P, F> Shr<F> for TypeTag<P> {
    type Output = VariantClause<P, F>;

    fn shr(self, handler: F) -> Self::Output {
        VariantClause::new(self, handler)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VariantMatch
// ═══════════════════════════════════════════════════════════════════════════════

/// Tagged-union match expression.
///
/// With one clause per alternative the chain is an exhaustive case analysis.
/// Partial analyses end with [`otherwise`](Self::otherwise).
///
/// # Example
///
/// ```
/// use casematch::prelude::*;
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
/// #[derive(Debug, PartialEq)]
/// struct Fahrenheit(f64);
///
/// enum Reading {
///     C(Celsius),
///     F(Fahrenheit),
/// }
///
/// casematch::alternatives! { Reading { C => Celsius, F => Fahrenheit } }
///
/// let kelvin = match_variant(Reading::F(Fahrenheit(212.0)))
///     .with(type_tag::<Celsius>(), |c| c.0 + 273.15)
///     .with(type_tag::<Fahrenheit>(), |f| (f.0 - 32.0) / 1.8 + 273.15)
///     .materialize::<f64>()
///     .unwrap();
/// assert!((kelvin - 373.15).abs() < 1e-9);
/// ```
pub struct VariantMatch<U> {
    expr: Expression<U>,
}

/// Start a tagged-union match.
pub fn match_variant<U>(union: U) -> VariantMatch<U> {
    VariantMatch::new(union)
}

impl<U> VariantMatch<U> {
    /// Create an unresolved match around the union value.
    pub fn new(union: U) -> Self {
        Self {
            expr: Expression::new(union),
        }
    }

    /// Create an unresolved match that records a [`ClauseStep`] per clause.
    pub fn traced(union: U) -> Self {
        Self {
            expr: Expression::traced(union),
        }
    }

    /// Attach a `(TypeTag<P>, handler(&P))` clause and return the expression.
    ///
    /// # Panics
    ///
    /// If the [`Alternative`] impl for `P` reports the alternative as active
    /// but then fails to extract it.
    #[must_use]
    pub fn with<P, R, F>(mut self, tag: TypeTag<P>, handler: F) -> Self
    where
        P: Alternative<U>,
        R: 'static,
        F: FnOnce(&P) -> R,
    {
        self.attach(tag, handler);
        self
    }

    /// Attach a `(TypeTag<P>, handler(&P))` clause in place.
    ///
    /// # Panics
    ///
    /// Same as [`with`](Self::with).
    pub fn attach<P, R, F>(&mut self, tag: TypeTag<P>, handler: F) -> &mut Self
    where
        P: Alternative<U>,
        R: 'static,
        F: FnOnce(&P) -> R,
    {
        self.expr.step(
            PatternKind::TypeTag,
            |union| tag.accepts(union),
            |union| match tag.extract(union) {
                Ok(payload) => handler(payload),
                Err(err) => panic!("{err} after its tag was accepted"),
            },
        );
        self
    }

    /// Attach a clause whose payload handler can fail.
    ///
    /// # Errors
    ///
    /// Returns the handler's error unchanged; the expression is dropped.
    ///
    /// # Panics
    ///
    /// Same as [`with`](Self::with).
    pub fn try_with<P, R, E, F>(mut self, tag: TypeTag<P>, handler: F) -> Result<Self, E>
    where
        P: Alternative<U>,
        R: 'static,
        F: FnOnce(&P) -> Result<R, E>,
    {
        self.expr.try_step(
            PatternKind::TypeTag,
            |union| tag.accepts(union),
            |union| match tag.extract(union) {
                Ok(payload) => handler(payload),
                Err(err) => panic!("{err} after its tag was accepted"),
            },
        )?;
        Ok(self)
    }

    /// Attach an arbitrary pattern over the whole union; the handler sees `&U`.
    #[must_use]
    pub fn when<R, F>(mut self, pattern: Pattern<'_, U>, handler: F) -> Self
    where
        R: 'static,
        F: FnOnce(&U) -> R,
    {
        self.expr
            .step(pattern.kind(), |union| pattern.accepts(union), handler);
        self
    }

    /// Fallback clause: a wildcard over the whole union.
    #[must_use]
    pub fn otherwise<R, F>(self, handler: F) -> Self
    where
        R: 'static,
        F: FnOnce(&U) -> R,
    {
        self.when(Pattern::Wildcard, handler)
    }

    /// Read the result as `T`, consuming the expression.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NotResolved`] if no clause covered the active alternative
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

    /// The union value.
    #[must_use]
    pub fn subject(&self) -> &U {
        self.expr.subject()
    }

    /// Give the union back, discarding any result.
    pub fn into_subject(self) -> U {
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

impl<U, P, F, R> Attach<VariantMatch<U>> for VariantClause<P, F>
where
    P: Alternative<U>,
    R: 'static,
    F: FnOnce(&P) -> R,
{
    fn attach_to(self, expression: VariantMatch<U>) -> VariantMatch<U> {
        let (tag, handler) = self.into_parts();
        expression.with(tag, handler)
    }
}

impl<'p, U, F, R> Attach<VariantMatch<U>> for Clause<'p, U, F>
where
    R: 'static,
    F: FnOnce(&U) -> R,
{
    fn attach_to(self, expression: VariantMatch<U>) -> VariantMatch<U> {
        let (pattern, handler) = self.into_parts();
        expression.when(pattern, handler)
    }
}

/// `expression | clause` applies the clause.
impl<U, C: Attach<VariantMatch<U>>> BitOr<C> for VariantMatch<U> {
    type Output = Self;

    fn bitor(self, clause: C) -> Self {
        clause.attach_to(self)
    }
}

impl<U: Debug> Debug for VariantMatch<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantMatch")
            .field("subject", self.subject())
            .field("clauses", &self.clauses())
            .field("resolved_by", &self.resolved_by())
            .field("result_type", &self.result_type())
            .finish()
    }
}
