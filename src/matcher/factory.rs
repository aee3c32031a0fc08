//! The matcher factory.
//!
//! [`factory`] turns a [`MatcherKind`] into a [`Constructor`]. Constructors
//! validate the spec and options once, up front, and hand back either a
//! complete matcher or a [`BuildError`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::error::BuildError;

use super::spec::{Options, Spec};
use super::traits::{MatcherKind, MatcherRef};

/// Builds matchers of kind `K`.
pub struct Constructor<K> {
    _kind: PhantomData<fn() -> K>,
}

/// Returns the constructor for matcher kind `K`.
///
/// # Example
///
/// ```rust
/// use matchkit::{factory, ObjectWithOnly, Options, Shape, Spec};
/// use serde_json::json;
///
/// let exact = factory::<ObjectWithOnly>();
///
/// assert!(exact.build(Shape::new(), Options::new()).is_ok());
/// assert!(exact.build(Spec::from(json!("not an object")), Options::new()).is_err());
/// ```
pub fn factory<K: MatcherKind>() -> Constructor<K> {
    Constructor {
        _kind: PhantomData,
    }
}

impl<K: MatcherKind> Constructor<K> {
    /// Constructs a matcher, failing immediately on a malformed spec or options.
    pub fn build(&self, spec: impl Into<Spec>, options: Options) -> Result<K, BuildError> {
        let spec = spec.into();
        let described = spec.describe();
        let keys = options.keys().collect::<Vec<_>>().join(",");

        match K::initialize(spec, options) {
            Ok(matcher) => {
                debug!(kind = K::KIND, spec = described, options = %keys, "matcher constructed");
                Ok(matcher)
            }
            Err(error) => {
                debug!(kind = K::KIND, spec = described, options = %keys, %error, "matcher construction rejected");
                Err(error)
            }
        }
    }

    /// Constructs a matcher behind a shared, type-erased handle.
    pub fn build_ref(&self, spec: impl Into<Spec>, options: Options) -> Result<MatcherRef, BuildError>
    where
        K: 'static,
    {
        Ok(Arc::new(self.build(spec, options)?))
    }

    /// Returns the kind name of the matchers this constructor builds.
    pub fn kind(&self) -> &'static str {
        K::KIND
    }
}

impl<K> Clone for Constructor<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Constructor<K> {}

impl<K: MatcherKind> fmt::Debug for Constructor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("kind", &K::KIND).finish()
    }
}
