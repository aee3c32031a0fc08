//! Integer matching.

use serde_json::{json, Value};

use crate::error::{BuildError, MatchError};
use crate::interop::json_schema;
use crate::path::KeyPath;

use super::spec::{Options, Spec};
use super::traits::{MatcherKind, Verdict};

/// A matcher for integer values with optional inclusive bounds.
///
/// Floats are rejected even when they have no fractional part.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, Match, Matcher};
/// use serde_json::json;
///
/// let percent = Match::integer().min(0).max(100);
///
/// assert!(percent.match_value(&KeyPath::root(), &json!(50), None).is_empty());
/// assert_eq!(percent.match_value(&KeyPath::root(), &json!(101), None)[0].message, "should be <= 100");
/// assert_eq!(percent.match_value(&KeyPath::root(), &json!(1.5), None)[0].message, "should be an integer");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntegerMatcher {
    min: Option<i64>,
    max: Option<i64>,
    description: Option<String>,
}

impl IntegerMatcher {
    /// Creates an integer matcher with no bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the value to be at least `value`.
    pub fn min(mut self, value: i64) -> Self {
        self.min = Some(value);
        self
    }

    /// Requires the value to be at most `value`.
    pub fn max(mut self, value: i64) -> Self {
        self.max = Some(value);
        self
    }

    /// Sets the description propagated into schema output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl MatcherKind for IntegerMatcher {
    const KIND: &'static str = "integer";

    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError> {
        let options = options.merge_spec(Self::KIND, spec)?;

        Ok(Self {
            min: options.i64_value("min")?,
            max: options.i64_value("max")?,
            description: options.description_text()?,
        })
    }

    fn match_at(&self, path: &KeyPath, value: &Value, _index: Option<usize>) -> Verdict {
        let n = match value.as_i64() {
            Some(n) => n,
            None => return Verdict::from("should be an integer"),
        };

        let mut errors = Vec::new();
        if let Some(min) = self.min.filter(|min| n < *min) {
            errors.push(MatchError::new(
                path.clone(),
                value.clone(),
                format!("should be >= {}", min),
            ));
        }
        if let Some(max) = self.max.filter(|max| n > *max) {
            errors.push(MatchError::new(
                path.clone(),
                value.clone(),
                format!("should be <= {}", max),
            ));
        }
        Verdict::from(errors)
    }

    fn json_schema(&self) -> Value {
        let mut schema = json!({ "type": "integer" });
        if let Some(min) = self.min {
            json_schema::set(&mut schema, "minimum", json!(min));
        }
        if let Some(max) = self.max {
            json_schema::set(&mut schema, "maximum", json!(max));
        }
        json_schema::describe(&mut schema, self.description.as_deref());
        schema
    }
}
