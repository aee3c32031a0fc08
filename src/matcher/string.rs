//! String matching.
//!
//! This module provides [`StringMatcher`] for text values with length and
//! pattern constraints.

use regex::Regex;
use serde_json::{json, Value};

use crate::error::{BuildError, MatchError};
use crate::interop::json_schema;
use crate::path::KeyPath;

use super::spec::{Options, Spec};
use super::traits::{MatcherKind, Verdict};

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
}

/// A matcher for string values.
///
/// Length is counted in Unicode scalar values. Every violated constraint is
/// reported, not just the first one.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, Match, Matcher};
/// use serde_json::json;
///
/// let code = Match::string()
///     .min_len(3)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// assert!(code.match_value(&KeyPath::root(), &json!("abc"), None).is_empty());
///
/// // too short and not lowercase: both reported
/// assert_eq!(code.match_value(&KeyPath::root(), &json!("A"), None).len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct StringMatcher {
    constraints: Vec<StringConstraint>,
    description: Option<String>,
}

impl StringMatcher {
    /// Creates a string matcher with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least `min` characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(StringConstraint::MinLength(min));
        self
    }

    /// Requires at most `max` characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.push(StringConstraint::MaxLength(max));
        self
    }

    /// Requires the value to match `pattern`.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.constraints
            .push(StringConstraint::Pattern(Regex::new(pattern)?));
        Ok(self)
    }

    /// Sets the description propagated into schema output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl MatcherKind for StringMatcher {
    const KIND: &'static str = "string";

    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError> {
        let options = options.merge_spec(Self::KIND, spec)?;

        let mut matcher = Self::new();
        if let Some(min) = options.usize_value("min_length")? {
            matcher = matcher.min_len(min);
        }
        if let Some(max) = options.usize_value("max_length")? {
            matcher = matcher.max_len(max);
        }
        if let Some(pattern) = options.str_value("pattern")? {
            matcher = matcher.pattern(&pattern)?;
        }
        matcher.description = options.description_text()?;
        Ok(matcher)
    }

    fn match_at(&self, path: &KeyPath, value: &Value, _index: Option<usize>) -> Verdict {
        let s = match value.as_str() {
            Some(s) => s,
            None => return Verdict::from("should be a string"),
        };

        let errors: Vec<MatchError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s))
            .map(|message| MatchError::new(path.clone(), value.clone(), message))
            .collect();

        Verdict::from(errors)
    }

    fn json_schema(&self) -> Value {
        let mut schema = json!({ "type": "string" });
        for constraint in &self.constraints {
            match constraint {
                StringConstraint::MinLength(min) => {
                    json_schema::set(&mut schema, "minLength", json!(min))
                }
                StringConstraint::MaxLength(max) => {
                    json_schema::set(&mut schema, "maxLength", json!(max))
                }
                StringConstraint::Pattern(regex) => {
                    json_schema::set(&mut schema, "pattern", json!(regex.as_str()))
                }
            }
        }
        json_schema::describe(&mut schema, self.description.as_deref());
        schema
    }
}

/// Returns the failure message for one constraint, if it is violated.
fn check_constraint(constraint: &StringConstraint, value: &str) -> Option<String> {
    match constraint {
        StringConstraint::MinLength(min) => {
            (value.chars().count() < *min).then(|| format!("should have length >= {}", min))
        }
        StringConstraint::MaxLength(max) => {
            (value.chars().count() > *max).then(|| format!("should have length <= {}", max))
        }
        StringConstraint::Pattern(regex) => {
            (!regex.is_match(value)).then(|| format!("should match pattern {}", regex.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;

    fn check(matcher: &StringMatcher, value: Value) -> Vec<MatchError> {
        matcher.match_value(&KeyPath::root(), &value, None)
    }

    #[test]
    fn test_accepts_string() {
        assert!(check(&StringMatcher::new(), json!("hello")).is_empty());
    }

    #[test]
    fn test_rejects_non_string() {
        let matcher = StringMatcher::new();
        for value in [json!(42), json!(null), json!(true), json!([1]), json!({})] {
            let errors = check(&matcher, value);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].message, "should be a string");
        }
    }

    #[test]
    fn test_length_constraints() {
        let matcher = StringMatcher::new().min_len(2).max_len(4);

        assert!(check(&matcher, json!("abc")).is_empty());
        assert_eq!(check(&matcher, json!("a"))[0].message, "should have length >= 2");
        assert_eq!(
            check(&matcher, json!("abcde"))[0].message,
            "should have length <= 4"
        );
    }

    #[test]
    fn test_unicode_length() {
        let matcher = StringMatcher::new().min_len(3).max_len(3);
        assert!(check(&matcher, json!("日本語")).is_empty());
        assert_eq!(check(&matcher, json!("🎉🎊")).len(), 1);
    }

    #[test]
    fn test_errors_accumulate() {
        let matcher = StringMatcher::new().min_len(10).pattern(r"^\d+$").unwrap();
        let errors = check(&matcher, json!("abc"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(StringMatcher::new().pattern("[invalid").is_err());

        let result =
            StringMatcher::initialize(Spec::Empty, Options::new().with("pattern", "[invalid"));
        assert!(matches!(result, Err(BuildError::InvalidPattern(_))));
    }

    #[test]
    fn test_initialize_from_options() {
        let matcher = StringMatcher::initialize(
            Spec::Empty,
            Options::new()
                .with("min_length", 1)
                .with("max_length", 8)
                .with("pattern", "^[a-z]+$")
                .description("slug"),
        )
        .unwrap();

        assert_eq!(
            matcher.json_schema(),
            json!({
                "type": "string",
                "minLength": 1,
                "maxLength": 8,
                "pattern": "^[a-z]+$",
                "description": "slug"
            })
        );
    }

    #[test]
    fn test_initialize_from_spec_config() {
        let matcher = StringMatcher::initialize(
            Spec::from(json!({"max_length": 4, "description": "code"})),
            Options::new(),
        )
        .unwrap();
        assert_eq!(
            matcher.json_schema(),
            json!({"type": "string", "maxLength": 4, "description": "code"})
        );
    }
}
