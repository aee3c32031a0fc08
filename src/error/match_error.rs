//! Validation error records.
//!
//! This module provides [`MatchError`] for a single path-qualified failure and
//! [`MatchErrors`] for the non-empty failure side of a parse outcome.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::KeyPath;

/// A single validation failure.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, MatchError};
/// use serde_json::json;
///
/// let error = MatchError::new(KeyPath::from("order.extra"), json!(2), "should not exist");
///
/// assert_eq!(error.path.as_str(), "order.extra");
/// assert_eq!(error.value, json!(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatchError {
    /// Where in the candidate value the failure was found.
    pub path: KeyPath,
    /// The offending value. Missing fields are reported as `null`.
    pub value: Value,
    /// Human-readable reason.
    pub message: String,
}

impl MatchError {
    /// Creates a new error record.
    pub fn new(path: KeyPath, value: Value, message: impl Into<String>) -> Self {
        Self {
            path,
            value,
            message: message.into(),
        }
    }
}

impl Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for MatchError {}

/// A non-empty, ordered collection of validation failures.
///
/// This is the failure side of [`Matcher::safe_parse`](crate::Matcher::safe_parse).
/// It implements `Semigroup`, so failures from sibling matchers combine in
/// order without ever being deduplicated.
///
/// ```rust
/// use matchkit::{KeyPath, MatchError, MatchErrors};
/// use serde_json::Value;
/// use stillwater::prelude::*;
///
/// let a = MatchErrors::single(MatchError::new(KeyPath::from("a"), Value::Null, "is required"));
/// let b = MatchErrors::single(MatchError::new(KeyPath::from("b"), Value::Null, "is required"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatchErrors(NonEmptyVec<MatchError>);

impl MatchErrors {
    /// Creates a collection holding one error.
    pub fn single(error: MatchError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a flat list, or `None` when the list is empty.
    pub fn from_vec(errors: Vec<MatchError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `Vec`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors in order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchError> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &MatchError {
        self.0.head()
    }

    /// Returns every error recorded at `path`.
    pub fn at_path(&self, path: &str) -> Vec<&MatchError> {
        self.0.iter().filter(|e| e.path.as_str() == path).collect()
    }

    /// Converts this collection into a flat `Vec`.
    pub fn into_vec(self) -> Vec<MatchError> {
        self.0.into_vec()
    }
}

impl Semigroup for MatchErrors {
    fn combine(self, other: Self) -> Self {
        MatchErrors(self.0.combine(other.0))
    }
}

impl Display for MatchErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for MatchErrors {}

impl IntoIterator for MatchErrors {
    type Item = MatchError;
    type IntoIter = std::vec::IntoIter<MatchError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<MatchErrors>();
    assert_sync::<MatchErrors>();
};
