//! The matcher protocol.
//!
//! Two traits split the protocol in half:
//!
//! - [`MatcherKind`] is what a matcher author implements. It may signal
//!   failure either with a bare message or with a list of records, and may
//!   signal success with "nothing" or with an empty list.
//! - [`Matcher`] is what callers and compound matchers consume. It always
//!   speaks in flat, ordered [`MatchError`] lists, so composition never has to
//!   care which convention a nested kind uses.
//!
//! Every `MatcherKind` is a `Matcher` through a blanket implementation.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, MatchError, MatchErrors};
use crate::path::KeyPath;

use super::spec::{Options, Spec};

/// A shared, type-erased matcher.
pub type MatcherRef = Arc<dyn Matcher>;

/// What a single matcher kind reports for one candidate value.
///
/// Both success conventions (`Pass` and an empty `Errors` list) mean the
/// value matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The value matched.
    Pass,
    /// The value failed with a single message about the value as a whole.
    Message(String),
    /// The value failed with these records (an empty list means it matched).
    Errors(Vec<MatchError>),
}

impl Verdict {
    /// Returns true if this verdict signals a match.
    pub fn is_pass(&self) -> bool {
        match self {
            Verdict::Pass => true,
            Verdict::Message(_) => false,
            Verdict::Errors(errors) => errors.is_empty(),
        }
    }

    /// Normalizes this verdict into error records.
    ///
    /// A bare message is wrapped into one record located at `path` and
    /// carrying `value`.
    pub fn into_errors(self, path: &KeyPath, value: &Value) -> Vec<MatchError> {
        match self {
            Verdict::Pass => Vec::new(),
            Verdict::Message(message) => {
                vec![MatchError::new(path.clone(), value.clone(), message)]
            }
            Verdict::Errors(errors) => errors,
        }
    }
}

impl From<()> for Verdict {
    fn from(_: ()) -> Self {
        Verdict::Pass
    }
}

impl From<Option<String>> for Verdict {
    fn from(message: Option<String>) -> Self {
        message.map_or(Verdict::Pass, Verdict::Message)
    }
}

impl From<String> for Verdict {
    fn from(message: String) -> Self {
        Verdict::Message(message)
    }
}

impl From<&str> for Verdict {
    fn from(message: &str) -> Self {
        Verdict::Message(message.to_string())
    }
}

impl From<Vec<MatchError>> for Verdict {
    fn from(errors: Vec<MatchError>) -> Self {
        Verdict::Errors(errors)
    }
}

/// Builds a parse outcome: the errors if there are any, the value otherwise.
pub fn outcome(
    errors: Vec<MatchError>,
    value: impl FnOnce() -> Value,
) -> Validation<Value, MatchErrors> {
    match MatchErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(value()),
    }
}

/// A constructed validator.
///
/// Matchers are immutable once built, so one instance can be shared across
/// threads and called any number of times.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, Match, Matcher, Options};
/// use serde_json::json;
///
/// let id = Match::uuid(Options::new()).unwrap();
///
/// let errors = id.match_value(&KeyPath::from("id"), &json!("nope"), None);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].path.as_str(), "id");
/// assert_eq!(errors[0].message, "should be a UUID");
/// ```
pub trait Matcher: Send + Sync {
    /// Error-collecting mode: returns every violation found, empty when the
    /// value matches.
    fn match_value(&self, path: &KeyPath, value: &Value, index: Option<usize>)
        -> Vec<MatchError>;

    /// Fail-fast mode: either the (possibly reshaped) value or a non-empty
    /// list of errors, never both.
    fn safe_parse(
        &self,
        path: &KeyPath,
        value: &Value,
        index: Option<usize>,
    ) -> Validation<Value, MatchErrors>;

    /// Projects this matcher into a JSON Schema description.
    fn to_json_schema(&self) -> Value;

    /// Returns true if an object field using this matcher may be absent.
    fn accepts_missing(&self) -> bool {
        false
    }
}

/// The implementation side of a matcher.
///
/// Implement this trait to add a matcher kind. Construction goes through
/// [`factory`](super::factory), and every `MatcherKind` automatically
/// implements [`Matcher`].
///
/// # Example
///
/// ```rust
/// use matchkit::{BuildError, KeyPath, Matcher, MatcherKind, Options, Spec, Verdict, factory};
/// use serde_json::{json, Value};
///
/// struct Even;
///
/// impl MatcherKind for Even {
///     const KIND: &'static str = "even";
///
///     fn initialize(_spec: Spec, _options: Options) -> Result<Self, BuildError> {
///         Ok(Even)
///     }
///
///     fn match_at(&self, _path: &KeyPath, value: &Value, _index: Option<usize>) -> Verdict {
///         match value.as_i64() {
///             Some(n) if n % 2 == 0 => Verdict::Pass,
///             _ => Verdict::from("should be even"),
///         }
///     }
///
///     fn json_schema(&self) -> Value {
///         json!({ "type": "integer", "multipleOf": 2 })
///     }
/// }
///
/// let even = factory::<Even>().build(Spec::Empty, Options::new()).unwrap();
/// assert!(even.match_value(&KeyPath::root(), &json!(4), None).is_empty());
/// assert_eq!(even.match_value(&KeyPath::root(), &json!(3), None).len(), 1);
/// ```
pub trait MatcherKind: Send + Sync + Sized {
    /// Short name used in construction errors and logs.
    const KIND: &'static str;

    /// Validates `spec` and `options` and builds the matcher.
    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError>;

    /// Checks one candidate value.
    fn match_at(&self, path: &KeyPath, value: &Value, index: Option<usize>) -> Verdict;

    /// Fail-fast mode. By default the input is passed through unchanged when
    /// `match_at` reports no errors.
    fn safe_parse_at(
        &self,
        path: &KeyPath,
        value: &Value,
        index: Option<usize>,
    ) -> Validation<Value, MatchErrors> {
        let errors = self.match_at(path, value, index).into_errors(path, value);
        outcome(errors, || value.clone())
    }

    /// Builds this matcher's JSON Schema description.
    fn json_schema(&self) -> Value;

    /// Returns true if an object field using this kind may be absent.
    fn is_optional(&self) -> bool {
        false
    }
}

impl<K: MatcherKind> Matcher for K {
    fn match_value(
        &self,
        path: &KeyPath,
        value: &Value,
        index: Option<usize>,
    ) -> Vec<MatchError> {
        self.match_at(path, value, index).into_errors(path, value)
    }

    fn safe_parse(
        &self,
        path: &KeyPath,
        value: &Value,
        index: Option<usize>,
    ) -> Validation<Value, MatchErrors> {
        self.safe_parse_at(path, value, index)
    }

    fn to_json_schema(&self) -> Value {
        self.json_schema()
    }

    fn accepts_missing(&self) -> bool {
        self.is_optional()
    }
}
