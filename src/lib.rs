//! # Matchkit
//!
//! Composable structural matchers that check runtime JSON values against
//! declarative shapes, report every violation with an exact path, and project
//! themselves into JSON Schema.
//!
//! ## Overview
//!
//! A matcher is built once from a spec and an options bag, then called as
//! often as needed. Compound matchers hold other matchers behind the shared
//! [`Matcher`] trait, so new kinds plug in without touching composition code.
//! Every call runs in one of two modes:
//!
//! - **error-collecting** ([`Matcher::match_value`]): a flat, ordered list of
//!   [`MatchError`] records, empty when the value matches,
//! - **fail-fast** ([`Matcher::safe_parse`]): a `stillwater::Validation` that
//!   holds either the non-empty [`MatchErrors`] or the parsed value.
//!
//! ## Core Types
//!
//! - [`KeyPath`]: dotted path to a value (e.g. `users[0].email`)
//! - [`MatchError`]: one failure with path, offending value and message
//! - [`MatcherKind`] and [`factory`]: how a matcher kind is implemented and built
//! - [`Match`]: entry point for the built-in kinds
//!
//! ## Example
//!
//! ```rust
//! use matchkit::{KeyPath, Match, Matcher, Options, Shape};
//! use serde_json::json;
//!
//! let order = Match::object_with_only(
//!     Shape::new()
//!         .field("id", Match::uuid(Options::new()).unwrap())
//!         .field("quantity", Match::integer().min(1)),
//!     Options::new().description("an order"),
//! )
//! .unwrap();
//!
//! let value = json!({"id": "123e4567-e89b-12d3-a456-426614174000", "quantity": 2});
//! assert!(order.match_value(&KeyPath::root(), &value, None).is_empty());
//!
//! let value = json!({"id": "123e4567-e89b-12d3-a456-426614174000", "quantity": 2, "note": "x"});
//! let errors = order.match_value(&KeyPath::root(), &value, None);
//! assert_eq!(errors[0].path.as_str(), "note");
//! assert_eq!(errors[0].message, "should not exist");
//! ```

pub mod error;
pub mod interop;
pub mod matcher;
pub mod path;
pub mod registry;

pub use error::{BuildError, MatchError, MatchErrors};
pub use matcher::{
    factory, ArrayMatcher, ConstraintFn, Constructor, IntegerMatcher, Match, Matcher, MatcherKind,
    MatcherRef, ObjectMatcher, ObjectWithOnly, OptionValue, OptionalMatcher, Options, Shape, Spec,
    StringMatcher, UuidMatcher, Verdict,
};
pub use path::KeyPath;
pub use registry::{MatcherRegistry, RegistryError};

/// Type alias for fail-fast outcomes.
pub type ParseResult = stillwater::Validation<serde_json::Value, MatchErrors>;
