//! Array matching.
//!
//! This module provides [`ArrayMatcher`], which validates every item against
//! one nested matcher and checks the array's length.

use std::sync::Arc;

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{BuildError, MatchError, MatchErrors};
use crate::interop::json_schema;
use crate::path::KeyPath;

use super::spec::{Options, Spec};
use super::traits::{outcome, Matcher, MatcherKind, MatcherRef, Verdict};

/// A matcher for arrays whose items all match one nested matcher.
///
/// Items are checked at `path[i]` and receive their position as `index`.
/// Item errors come first, in item order, followed by length errors.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, Match, Matcher, Options};
/// use serde_json::json;
///
/// let ids = Match::array(Match::uuid(Options::new()).unwrap()).max_len(2);
///
/// let errors = ids.match_value(&KeyPath::from("ids"), &json!(["x"]), None);
/// assert_eq!(errors[0].path.as_str(), "ids[0]");
/// ```
pub struct ArrayMatcher {
    item: MatcherRef,
    min_len: Option<usize>,
    max_len: Option<usize>,
    description: Option<String>,
}

impl ArrayMatcher {
    /// Creates an array matcher over `item`.
    pub fn new<M: Matcher + 'static>(item: M) -> Self {
        Self::from_ref(Arc::new(item))
    }

    /// Creates an array matcher over an already shared item matcher.
    pub fn from_ref(item: MatcherRef) -> Self {
        Self {
            item,
            min_len: None,
            max_len: None,
            description: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    /// Requires at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Sets the description propagated into schema output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    fn length_errors(&self, path: &KeyPath, value: &Value, len: usize) -> Vec<MatchError> {
        let mut errors = Vec::new();
        if let Some(min) = self.min_len.filter(|min| len < *min) {
            errors.push(MatchError::new(
                path.clone(),
                value.clone(),
                format!("should have at least {} items", min),
            ));
        }
        if let Some(max) = self.max_len.filter(|max| len > *max) {
            errors.push(MatchError::new(
                path.clone(),
                value.clone(),
                format!("should have at most {} items", max),
            ));
        }
        errors
    }
}

impl MatcherKind for ArrayMatcher {
    const KIND: &'static str = "array";

    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError> {
        let item = match spec {
            Spec::Matcher(item) => item,
            other => {
                return Err(BuildError::spec(
                    Self::KIND,
                    format!("must be the item matcher, got {}", other.describe()),
                ))
            }
        };

        Ok(Self {
            item,
            min_len: options.usize_value("min_length")?,
            max_len: options.usize_value("max_length")?,
            description: options.description_text()?,
        })
    }

    fn match_at(&self, path: &KeyPath, value: &Value, _index: Option<usize>) -> Verdict {
        let items = match value.as_array() {
            Some(items) => items,
            None => return Verdict::from("should be an array"),
        };

        let mut errors: Vec<MatchError> = items
            .iter()
            .enumerate()
            .flat_map(|(i, item)| self.item.match_value(&path.item(i), item, Some(i)))
            .collect();
        errors.extend(self.length_errors(path, value, items.len()));

        Verdict::from(errors)
    }

    fn safe_parse_at(
        &self,
        path: &KeyPath,
        value: &Value,
        _index: Option<usize>,
    ) -> Validation<Value, MatchErrors> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                return Validation::Failure(MatchErrors::single(MatchError::new(
                    path.clone(),
                    value.clone(),
                    "should be an array",
                )))
            }
        };

        let mut errors = Vec::new();
        let mut parsed = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match self.item.safe_parse(&path.item(i), item, Some(i)) {
                Validation::Success(v) => parsed.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }
        errors.extend(self.length_errors(path, value, items.len()));

        outcome(errors, || Value::Array(parsed))
    }

    fn json_schema(&self) -> Value {
        let mut schema = json!({
            "type": "array",
            "items": self.item.to_json_schema(),
        });
        if let Some(min) = self.min_len {
            json_schema::set(&mut schema, "minItems", json!(min));
        }
        if let Some(max) = self.max_len {
            json_schema::set(&mut schema, "maxItems", json!(max));
        }
        json_schema::describe(&mut schema, self.description.as_deref());
        schema
    }
}
