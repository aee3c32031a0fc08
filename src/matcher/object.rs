//! Generic object matching.
//!
//! This module provides [`ObjectMatcher`], which checks that a value is an
//! object and delegates each declared field to its nested matcher. Fields the
//! shape does not declare are ignored here; [`ObjectWithOnly`](super::ObjectWithOnly)
//! builds closed-shape checking on top.

use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::error::{BuildError, MatchError, MatchErrors};
use crate::interop::json_schema;
use crate::path::KeyPath;

use super::spec::{Options, Shape, Spec};
use super::traits::{outcome, MatcherKind, Verdict};

/// A matcher for objects with named fields.
///
/// A declared field is required unless its matcher accepts missing values
/// (see [`Match::optional`](super::Match::optional)). All field errors are
/// accumulated in declaration order rather than stopping at the first one.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, Match, Matcher, Options, Shape};
/// use serde_json::json;
///
/// let user = Match::object(
///     Shape::new()
///         .field("name", Match::string().min_len(1))
///         .field("age", Match::integer().min(0))
///         .field("email", Match::optional(Match::string())),
///     Options::new(),
/// )
/// .unwrap();
///
/// let errors = user.match_value(&KeyPath::root(), &json!({"name": "", "age": -1}), None);
/// let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
/// assert_eq!(paths, vec!["name", "age"]);
/// ```
pub struct ObjectMatcher {
    fields: Shape,
    description: Option<String>,
}

impl ObjectMatcher {
    /// Creates an object matcher over `fields` with no options.
    pub fn new(fields: Shape) -> Self {
        Self {
            fields,
            description: None,
        }
    }

    /// Returns the declared fields.
    pub fn fields(&self) -> &Shape {
        &self.fields
    }

    /// Returns the configured description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl MatcherKind for ObjectMatcher {
    const KIND: &'static str = "object";

    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError> {
        let fields = match spec {
            Spec::Shape(fields) => fields,
            Spec::Config(Value::Object(map)) if map.is_empty() => Shape::new(),
            other => {
                return Err(BuildError::spec(
                    Self::KIND,
                    format!(
                        "must be a mapping of field names to matchers, got {}",
                        other.describe()
                    ),
                ))
            }
        };

        Ok(Self {
            fields,
            description: options.description_text()?,
        })
    }

    fn match_at(&self, path: &KeyPath, value: &Value, _index: Option<usize>) -> Verdict {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return Verdict::from("should be an object"),
        };

        let mut errors = Vec::new();
        for (name, matcher) in self.fields.iter() {
            let field_path = path.child(name);
            match obj.get(name) {
                Some(field_value) => {
                    errors.extend(matcher.match_value(&field_path, field_value, None));
                }
                None if matcher.accepts_missing() => {}
                None => errors.push(missing(field_path)),
            }
        }

        Verdict::from(errors)
    }

    fn safe_parse_at(
        &self,
        path: &KeyPath,
        value: &Value,
        _index: Option<usize>,
    ) -> Validation<Value, MatchErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                return Validation::Failure(MatchErrors::single(MatchError::new(
                    path.clone(),
                    value.clone(),
                    "should be an object",
                )))
            }
        };

        let mut errors = Vec::new();
        let mut parsed = Map::new();
        for (name, matcher) in self.fields.iter() {
            let field_path = path.child(name);
            match obj.get(name) {
                Some(field_value) => match matcher.safe_parse(&field_path, field_value, None) {
                    Validation::Success(v) => {
                        parsed.insert(name.clone(), v);
                    }
                    Validation::Failure(e) => errors.extend(e),
                },
                None if matcher.accepts_missing() => {}
                None => errors.push(missing(field_path)),
            }
        }

        outcome(errors, || Value::Object(parsed))
    }

    fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, matcher) in self.fields.iter() {
            properties.insert(name.clone(), matcher.to_json_schema());
            if !matcher.accepts_missing() {
                required.push(Value::String(name.clone()));
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            json_schema::set(&mut schema, "required", Value::Array(required));
        }
        json_schema::describe(&mut schema, self.description.as_deref());
        schema
    }
}

fn missing(path: KeyPath) -> MatchError {
    MatchError::new(path, Value::Null, "is required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{Match, Matcher};
    use pretty_assertions::assert_eq;

    fn user() -> ObjectMatcher {
        ObjectMatcher::new(
            Shape::new()
                .field("name", Match::string().min_len(1))
                .field("age", Match::integer().min(0))
                .field("nickname", Match::optional(Match::string())),
        )
    }

    #[test]
    fn test_rejects_non_object() {
        let matcher = user();
        for value in [json!("x"), json!(1), json!(null), json!([1, 2])] {
            let errors = matcher.match_value(&KeyPath::root(), &value, None);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].message, "should be an object");
            assert_eq!(errors[0].value, value);
        }
    }

    #[test]
    fn test_valid_object() {
        let errors = user().match_value(&KeyPath::root(), &json!({"name": "Al", "age": 3}), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_required_fields_in_declaration_order() {
        let errors = user().match_value(&KeyPath::from("body"), &json!({}), None);
        let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();

        assert_eq!(paths, vec!["body.name", "body.age"]);
        assert!(errors.iter().all(|e| e.message == "is required"));
        assert!(errors.iter().all(|e| e.value.is_null()));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let errors = user().match_value(
            &KeyPath::root(),
            &json!({"name": "Al", "age": 3, "extra": true}),
            None,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_nested_paths() {
        let outer = ObjectMatcher::new(Shape::new().field(
            "address",
            ObjectMatcher::new(Shape::new().field("zip", Match::string())),
        ));

        let errors = outer.match_value(&KeyPath::from("user"), &json!({"address": {"zip": 1}}), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path.as_str(), "user.address.zip");
        assert_eq!(errors[0].value, json!(1));
    }

    #[test]
    fn test_safe_parse_keeps_declared_fields_only() {
        let parsed = user()
            .safe_parse(
                &KeyPath::root(),
                &json!({"name": "Al", "age": 3, "extra": true}),
                None,
            )
            .into_result()
            .unwrap();

        assert_eq!(parsed, json!({"name": "Al", "age": 3}));
    }

    #[test]
    fn test_safe_parse_accumulates() {
        let errors = user()
            .safe_parse(&KeyPath::root(), &json!({"name": "", "nickname": 5}), None)
            .into_result()
            .unwrap_err();

        let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["name", "age", "nickname"]);
    }

    #[test]
    fn test_json_schema() {
        let matcher = ObjectMatcher::initialize(
            Spec::Shape(
                Shape::new()
                    .field("name", Match::string())
                    .field("nickname", Match::optional(Match::string())),
            ),
            Options::new().description("a user"),
        )
        .unwrap();

        assert_eq!(
            matcher.to_json_schema(),
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "nickname": {"type": "string"}
                },
                "required": ["name"],
                "description": "a user"
            })
        );
    }

    #[test]
    fn test_rejects_non_shape_spec() {
        let result = ObjectMatcher::initialize(Spec::from("fields"), Options::new());
        assert!(matches!(result, Err(BuildError::InvalidSpec { kind: "object", .. })));
    }

    #[test]
    fn test_empty_plain_object_spec() {
        let matcher = ObjectMatcher::initialize(Spec::from(json!({})), Options::new()).unwrap();
        assert!(matcher.fields().is_empty());
        assert_eq!(matcher.json_schema(), json!({"type": "object", "properties": {}}));
    }
}
