//! Matcher definitions.
//!
//! Matchers are built once from a [`Spec`] and an [`Options`] bag, then
//! called any number of times in either of two modes:
//!
//! - [`Matcher::match_value`] collects every error into a flat list,
//! - [`Matcher::safe_parse`] returns either the errors or the parsed value.
//!
//! Both modes report the same violations for the same input.
//!
//! # Example
//!
//! ```rust
//! use matchkit::{KeyPath, Match, Matcher, Options, Shape};
//! use serde_json::json;
//!
//! let account = Match::object_with_only(
//!     Shape::new()
//!         .field("id", Match::uuid(Options::new().with("version", 4)).unwrap())
//!         .field("name", Match::string().min_len(1)),
//!     Options::new(),
//! )
//! .unwrap();
//!
//! let errors = account.match_value(
//!     &KeyPath::root(),
//!     &json!({"id": "oops", "name": ""}),
//!     None,
//! );
//! let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
//! assert_eq!(paths, vec!["id", "name"]);
//! ```

mod array;
mod factory;
mod numeric;
mod object;
mod object_with_only;
mod optional;
mod spec;
mod string;
mod traits;
mod uuid;

pub use array::ArrayMatcher;
pub use factory::{factory, Constructor};
pub use numeric::IntegerMatcher;
pub use object::ObjectMatcher;
pub use object_with_only::ObjectWithOnly;
pub use optional::OptionalMatcher;
pub use spec::{ConstraintFn, OptionValue, Options, Shape, Spec};
pub use string::StringMatcher;
pub use traits::{outcome, Matcher, MatcherKind, MatcherRef, Verdict};
pub use uuid::UuidMatcher;

use crate::error::BuildError;

/// Entry point for creating matchers.
///
/// Kinds that take a spec or options are built through the [`factory`] and
/// can fail at construction; the builder-style kinds cannot.
pub struct Match;

impl Match {
    /// Creates a generic object matcher over `spec`.
    ///
    /// Undeclared fields are allowed and dropped from parsed output.
    pub fn object(spec: impl Into<Spec>, options: Options) -> Result<ObjectMatcher, BuildError> {
        factory::<ObjectMatcher>().build(spec, options)
    }

    /// Creates an exact-shape object matcher over `spec`.
    ///
    /// Recognizes the `description` and `constraints` options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use matchkit::{BuildError, Match, Options};
    /// use serde_json::json;
    ///
    /// let result = Match::object_with_only(json!("not an object"), Options::new());
    /// assert!(matches!(result, Err(BuildError::InvalidSpec { .. })));
    /// ```
    pub fn object_with_only(
        spec: impl Into<Spec>,
        options: Options,
    ) -> Result<ObjectWithOnly, BuildError> {
        factory::<ObjectWithOnly>().build(spec, options)
    }

    /// Creates a UUID matcher.
    ///
    /// Recognizes the `version` and `description` options.
    pub fn uuid(options: Options) -> Result<UuidMatcher, BuildError> {
        factory::<UuidMatcher>().build(Spec::Empty, options)
    }

    /// Creates a string matcher.
    pub fn string() -> StringMatcher {
        StringMatcher::new()
    }

    /// Creates an integer matcher.
    pub fn integer() -> IntegerMatcher {
        IntegerMatcher::new()
    }

    /// Creates an array matcher whose items must match `item`.
    pub fn array<M: Matcher + 'static>(item: M) -> ArrayMatcher {
        ArrayMatcher::new(item)
    }

    /// Wraps `inner` so that `null` and missing fields pass.
    pub fn optional<M: Matcher + 'static>(inner: M) -> OptionalMatcher {
        OptionalMatcher::new(inner)
    }
}
