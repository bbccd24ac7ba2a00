//! `ResultCell` — Write-once, type-erased storage for a match result
//!
//! The cell stores whatever the winning handler returned without knowing its type,
//! and checks the type only when the caller reads it back. This is the same erasure
//! move as a `dyn Any` payload behind a downcast, with the stored type's name kept
//! alongside for error messages.

use crate::MatchError;
use std::any::{self, Any};
use std::fmt;

/// Write-once holder for the winning handler's output.
///
/// # INV: Write-once
///
/// Once filled, [`store`](Self::store) refuses further writes and keeps the
/// original value.
///
/// # Example
///
/// ```
/// use casematch::{MatchError, ResultCell};
///
/// let mut cell = ResultCell::new();
/// assert!(cell.store(42_u32));
/// assert!(!cell.store(7_u32)); // already filled
///
/// assert_eq!(cell.get::<u32>(), Some(Ok(&42)));
/// assert!(matches!(
///     cell.get::<i64>(),
///     Some(Err(MatchError::ResultTypeMismatch { .. }))
/// ));
/// ```
#[derive(Default)]
pub struct ResultCell {
    value: Option<Box<dyn Any>>,
    stored_type: Option<&'static str>,
}

impl ResultCell {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once a value has been stored.
    #[inline]
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    /// Name of the stored value's type, if any.
    #[must_use]
    pub fn stored_type(&self) -> Option<&'static str> {
        self.stored_type
    }

    /// Store a value.
    ///
    /// Returns `false` without touching the cell if it is already filled.
    pub fn store<R: 'static>(&mut self, value: R) -> bool {
        if self.value.is_some() {
            return false;
        }
        self.value = Some(Box::new(value));
        self.stored_type = Some(any::type_name::<R>());
        true
    }

    /// Borrow the stored value as `T`.
    ///
    /// Returns `None` if the cell is empty, and
    /// [`MatchError::ResultTypeMismatch`] if the stored value is not a `T`.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<Result<&T, MatchError>> {
        let value = self.value.as_ref()?;
        Some(
            value
                .downcast_ref::<T>()
                .ok_or_else(|| self.mismatch::<T>()),
        )
    }

    /// Take the stored value as `T`, consuming the cell.
    ///
    /// Same failure modes as [`get`](Self::get).
    #[must_use]
    pub fn into_inner<T: 'static>(self) -> Option<Result<T, MatchError>> {
        let mismatch = self.mismatch::<T>();
        let value = self.value?;
        Some(value.downcast::<T>().map(|v| *v).map_err(|_| mismatch))
    }

    fn mismatch<T: 'static>(&self) -> MatchError {
        MatchError::ResultTypeMismatch {
            requested: any::type_name::<T>(),
            actual: self.stored_type.unwrap_or("<empty>"),
        }
    }
}

impl fmt::Debug for ResultCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCell")
            .field("filled", &self.is_filled())
            .field("stored_type", &self.stored_type)
            .finish()
    }
}
