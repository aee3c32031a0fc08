//! Named matcher storage.
//!
//! This module provides [`MatcherRegistry`], which stores shared matchers
//! under names, validates values by name, and exports every registered
//! matcher as one JSON Schema document with `$defs`.

use parking_lot::RwLock;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use stillwater::Validation;
use tracing::trace;

use crate::error::{MatchError, MatchErrors};
use crate::interop::{self, DRAFT_2020_12};
use crate::matcher::{Matcher, MatcherRef};
use crate::path::KeyPath;

/// Type alias for the matcher storage map.
type MatcherMap = Arc<RwLock<BTreeMap<String, MatcherRef>>>;

/// A thread-safe registry of named matchers.
///
/// Many threads can validate concurrently; registration takes a write lock.
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use matchkit::{Match, MatcherRegistry, Options, Shape};
/// use serde_json::json;
///
/// let registry = MatcherRegistry::new();
/// registry.register("UserId", Match::uuid(Options::new()).unwrap()).unwrap();
/// registry
///     .register(
///         "User",
///         Match::object_with_only(
///             Shape::new().field("name", Match::string()),
///             Options::new(),
///         )
///         .unwrap(),
///     )
///     .unwrap();
///
/// let errors = registry.match_value("User", &json!({"name": "Al", "x": 1})).unwrap();
/// assert_eq!(errors[0].path.as_str(), "x");
/// ```
#[derive(Clone, Default)]
pub struct MatcherRegistry {
    matchers: MatcherMap,
}

impl MatcherRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a matcher under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already taken.
    pub fn register<M>(&self, name: impl Into<String>, matcher: M) -> Result<(), RegistryError>
    where
        M: Matcher + 'static,
    {
        self.register_ref(name, Arc::new(matcher))
    }

    /// Registers an already shared matcher under `name`.
    pub fn register_ref(
        &self,
        name: impl Into<String>,
        matcher: MatcherRef,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut matchers = self.matchers.write();

        if matchers.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        trace!(name = %name, "matcher registered");
        matchers.insert(name, matcher);
        Ok(())
    }

    /// Retrieves a matcher by name.
    pub fn get(&self, name: &str) -> Option<MatcherRef> {
        self.matchers.read().get(name).cloned()
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.matchers.read().keys().cloned().collect()
    }

    /// Runs the named matcher in error-collecting mode at the root path.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no matcher has that name.
    pub fn match_value(&self, name: &str, value: &Value) -> Result<Vec<MatchError>, RegistryError> {
        let matcher = self.lookup(name)?;
        Ok(matcher.match_value(&KeyPath::root(), value, None))
    }

    /// Runs the named matcher in fail-fast mode at the root path.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no matcher has that name.
    pub fn safe_parse(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<Validation<Value, MatchErrors>, RegistryError> {
        let matcher = self.lookup(name)?;
        Ok(matcher.safe_parse(&KeyPath::root(), value, None))
    }

    /// Exports every registered matcher under `$defs`.
    ///
    /// ```rust
    /// use matchkit::{Match, MatcherRegistry, Options};
    ///
    /// let registry = MatcherRegistry::new();
    /// registry.register("Id", Match::uuid(Options::new().with("version", 4)).unwrap()).unwrap();
    ///
    /// let doc = registry.to_json_schema();
    /// assert_eq!(doc["$defs"]["Id"]["format"], "uuid-v4");
    /// ```
    pub fn to_json_schema(&self) -> Value {
        let matchers = self.matchers.read();
        let mut defs = serde_json::Map::new();

        for (name, matcher) in matchers.iter() {
            defs.insert(name.clone(), matcher.to_json_schema());
        }

        json!({
            "$schema": DRAFT_2020_12,
            "$defs": defs
        })
    }

    /// Exports one matcher as a standalone JSON Schema document.
    pub fn export(&self, name: &str) -> Option<Value> {
        self.get(name)
            .map(|matcher| interop::document(matcher.to_json_schema()))
    }

    fn lookup(&self, name: &str) -> Result<MatcherRef, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a matcher with a name that already exists.
    #[error("matcher '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to use a name that was never registered.
    #[error("matcher '{0}' not found")]
    NotFound(String),
}
