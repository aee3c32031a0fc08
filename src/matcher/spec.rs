//! Construction inputs: the spec a matcher is built from and its options bag.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{BuildError, MatchError};
use crate::path::KeyPath;

use super::traits::{Matcher, MatcherRef};

/// A cross-field check run by object matchers after per-field validation.
///
/// Receives the object's path, the object itself, and its index when it is
/// an array item.
pub type ConstraintFn =
    Arc<dyn Fn(&KeyPath, &Value, Option<usize>) -> Vec<MatchError> + Send + Sync>;

/// An ordered mapping from field name to nested matcher.
///
/// # Example
///
/// ```rust
/// use matchkit::{Match, Options, Shape};
///
/// let shape = Shape::new()
///     .field("id", Match::uuid(Options::new()).unwrap())
///     .field("name", Match::string());
///
/// assert!(shape.contains("id"));
/// assert_eq!(shape.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Shape {
    fields: IndexMap<String, MatcherRef>,
}

impl Shape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. A later field with the same name replaces the earlier
    /// matcher but keeps its position.
    pub fn field<M>(self, name: impl Into<String>, matcher: M) -> Self
    where
        M: Matcher + 'static,
    {
        self.field_ref(name, Arc::new(matcher))
    }

    /// Adds a field backed by an already shared matcher.
    pub fn field_ref(mut self, name: impl Into<String>, matcher: MatcherRef) -> Self {
        self.fields.insert(name.into(), matcher);
        self
    }

    /// Returns true if `name` is a declared field.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the matcher declared for `name`.
    pub fn get(&self, name: &str) -> Option<&MatcherRef> {
        self.fields.get(name)
    }

    /// Iterates over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MatcherRef)> {
        self.fields.iter()
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.fields.keys()).finish()
    }
}

/// What a matcher is built from.
///
/// Compound kinds take a [`Shape`] or a nested matcher. Primitive kinds take
/// [`Spec::Empty`] or a plain object of configuration, layered under their
/// [`Options`]. Plain JSON lands in [`Spec::Config`], which lets callers hand
/// over dynamic input and have the matcher kind reject it at construction
/// time.
#[derive(Clone, Default)]
pub enum Spec {
    /// No spec.
    #[default]
    Empty,
    /// Field name to nested matcher.
    Shape(Shape),
    /// A single nested matcher (array items, optional wrappers).
    Matcher(MatcherRef),
    /// Raw configuration data.
    Config(Value),
}

impl Spec {
    /// Describes the spec for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Spec::Empty => "nothing",
            Spec::Shape(_) => "a field mapping",
            Spec::Matcher(_) => "a matcher",
            Spec::Config(value) => match value {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                Value::String(_) => "a string",
                Value::Array(_) => "an array",
                Value::Object(_) => "a plain object",
            },
        }
    }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spec::Empty => f.write_str("Empty"),
            Spec::Shape(shape) => f.debug_tuple("Shape").field(shape).finish(),
            Spec::Matcher(_) => f.write_str("Matcher(..)"),
            Spec::Config(value) => f.debug_tuple("Config").field(value).finish(),
        }
    }
}

impl From<Shape> for Spec {
    fn from(shape: Shape) -> Self {
        Spec::Shape(shape)
    }
}

impl From<MatcherRef> for Spec {
    fn from(matcher: MatcherRef) -> Self {
        Spec::Matcher(matcher)
    }
}

impl From<Value> for Spec {
    fn from(value: Value) -> Self {
        Spec::Config(value)
    }
}

impl From<&str> for Spec {
    fn from(text: &str) -> Self {
        Spec::Config(Value::String(text.to_string()))
    }
}

/// One entry of an options bag.
#[derive(Clone)]
pub enum OptionValue {
    /// Plain data.
    Value(Value),
    /// A cross-field constraint function.
    Constraints(ConstraintFn),
}

/// The options bag a matcher is built with.
///
/// Keys are free-form; each matcher kind reads the keys it recognizes and
/// checks their types at construction. Values that are `null`, `false`, `0`
/// or `""` count as unset, except for numeric bounds where only `null` does.
///
/// # Example
///
/// ```rust
/// use matchkit::Options;
///
/// let options = Options::new()
///     .description("account identifier")
///     .with("version", 4);
///
/// assert_eq!(options.description_text().unwrap().as_deref(), Some("account identifier"));
/// ```
#[derive(Clone, Default)]
pub struct Options {
    entries: IndexMap<String, OptionValue>,
}

impl Options {
    /// Creates an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a plain option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .insert(key.into(), OptionValue::Value(value.into()));
        self
    }

    /// Sets the human-readable description propagated into schema output.
    pub fn description(self, text: impl Into<String>) -> Self {
        self.with("description", Value::String(text.into()))
    }

    /// Sets the cross-field constraint function.
    pub fn constraints<F>(mut self, constraints: F) -> Self
    where
        F: Fn(&KeyPath, &Value, Option<usize>) -> Vec<MatchError> + Send + Sync + 'static,
    {
        self.entries.insert(
            "constraints".to_string(),
            OptionValue::Constraints(Arc::new(constraints)),
        );
        self
    }

    /// Returns the plain value stored under `key`, ignoring unset values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(OptionValue::Value(value)) if !is_unset(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if `key` holds anything, set or not.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over option keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Reads `description`, which must be text when set.
    pub fn description_text(&self) -> Result<Option<String>, BuildError> {
        self.str_value("description")
    }

    /// Reads `constraints`, which must be a function when set.
    pub fn constraint_fn(&self) -> Result<Option<ConstraintFn>, BuildError> {
        match self.entries.get("constraints") {
            None => Ok(None),
            Some(OptionValue::Constraints(f)) => Ok(Some(Arc::clone(f))),
            Some(OptionValue::Value(value)) if is_unset(value) => Ok(None),
            Some(OptionValue::Value(_)) => Err(BuildError::InvalidConstraints),
        }
    }

    /// Reads a text option.
    pub fn str_value(&self, key: &str) -> Result<Option<String>, BuildError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(BuildError::option(key, "must be a string")),
        }
    }

    /// Reads a non-negative integer option. Zero is a meaningful bound here,
    /// so only `null` counts as unset.
    pub fn usize_value(&self, key: &str) -> Result<Option<usize>, BuildError> {
        match self.bound(key)? {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| BuildError::option(key, "must be a non-negative integer")),
        }
    }

    /// Reads an integer option. Only `null` counts as unset.
    pub fn i64_value(&self, key: &str) -> Result<Option<i64>, BuildError> {
        match self.bound(key)? {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| BuildError::option(key, "must be an integer")),
        }
    }

    fn bound(&self, key: &str) -> Result<Option<&Value>, BuildError> {
        match self.entries.get(key) {
            None | Some(OptionValue::Value(Value::Null)) => Ok(None),
            Some(OptionValue::Value(value)) => Ok(Some(value)),
            Some(OptionValue::Constraints(_)) => Err(BuildError::option(key, "must be data")),
        }
    }

    /// Reads an option that may be given as text or as a number, rendered as
    /// text.
    pub fn text_or_number(&self, key: &str) -> Result<Option<String>, BuildError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(Value::Number(n)) => Ok(Some(match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i.to_string(),
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => {
                    format!("{}", f as i64)
                }
                _ => n.to_string(),
            })),
            Some(_) => Err(BuildError::option(key, "must be a string or a number")),
        }
    }

    /// Layers the configuration carried by a plain-object spec under these
    /// options. Keys already present in the options win.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidSpec` for anything other than
    /// [`Spec::Empty`] or a plain object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use matchkit::{Options, Spec};
    /// use serde_json::json;
    ///
    /// let options = Options::new()
    ///     .with("version", 4)
    ///     .merge_spec("uuid", Spec::from(json!({"version": 1, "description": "id"})))
    ///     .unwrap();
    ///
    /// assert_eq!(options.get("version"), Some(&json!(4)));
    /// assert_eq!(options.get("description"), Some(&json!("id")));
    /// ```
    pub fn merge_spec(mut self, kind: &'static str, spec: Spec) -> Result<Self, BuildError> {
        match spec {
            Spec::Empty => Ok(self),
            Spec::Config(Value::Object(config)) => {
                for (key, value) in config {
                    if !self.entries.contains_key(&key) {
                        self.entries.insert(key, OptionValue::Value(value));
                    }
                }
                Ok(self)
            }
            other => Err(BuildError::spec(
                kind,
                format!("must be a plain object of options, got {}", other.describe()),
            )),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.entries {
            match value {
                OptionValue::Value(v) => map.entry(key, v),
                OptionValue::Constraints(_) => map.entry(key, &"<fn>"),
            };
        }
        map.finish()
    }
}

/// Returns true for values that leave an option unset.
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
