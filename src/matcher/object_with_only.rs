//! Exact-shape object matching.
//!
//! [`ObjectWithOnly`] accepts an object only if its declared fields validate
//! and it carries no other fields. An optional constraint function runs last
//! for cross-field rules no single field matcher can express.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, MatchError, MatchErrors};
use crate::interop::json_schema;
use crate::path::KeyPath;

use super::object::ObjectMatcher;
use super::spec::{ConstraintFn, Options, Shape, Spec};
use super::traits::{outcome, Matcher, MatcherKind, Verdict};

/// A closed-shape object matcher.
///
/// Validation runs in three stages and records come out in that order:
///
/// 1. per-field validation through a generic [`ObjectMatcher`]; if it fails,
///    its errors are returned as they are and nothing else runs,
/// 2. one `"should not exist"` record per undeclared key,
/// 3. the constraint function, if configured.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, Match, Matcher, Options, Shape};
/// use serde_json::json;
///
/// let point = Match::object_with_only(
///     Shape::new().field("x", Match::integer()).field("y", Match::integer()),
///     Options::new().description("a point"),
/// )
/// .unwrap();
///
/// let errors = point.match_value(&KeyPath::root(), &json!({"x": 1, "y": 2, "z": 3}), None);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].path.as_str(), "z");
/// assert_eq!(errors[0].message, "should not exist");
///
/// assert_eq!(point.to_json_schema()["additionalProperties"], false);
/// ```
pub struct ObjectWithOnly {
    object: ObjectMatcher,
    constraints: Option<ConstraintFn>,
    description: Option<String>,
}

impl ObjectWithOnly {
    /// Returns the configured description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns true if a cross-field constraint function is configured.
    pub fn has_constraints(&self) -> bool {
        self.constraints.is_some()
    }

    /// Reports each key of `value` the shape does not declare.
    ///
    /// Only the object's own keys are considered, and a key counts as present
    /// whatever its value, including `null` and `false`.
    fn undeclared(&self, path: &KeyPath, value: &Value) -> Vec<MatchError> {
        let fields = self.object.fields();
        value
            .as_object()
            .into_iter()
            .flatten()
            .filter(|(key, _)| !fields.contains(key))
            .map(|(key, v)| MatchError::new(path.child(key), v.clone(), "should not exist"))
            .collect()
    }

    /// Runs the extra-field scan and the constraint function.
    ///
    /// Both validation modes share this so they report identical records.
    fn closed_shape_errors(
        &self,
        path: &KeyPath,
        value: &Value,
        index: Option<usize>,
    ) -> Vec<MatchError> {
        let mut errors = self.undeclared(path, value);
        if let Some(constraints) = &self.constraints {
            errors.extend(constraints(path, value, index));
        }
        errors
    }
}

impl MatcherKind for ObjectWithOnly {
    const KIND: &'static str = "objectWithOnly";

    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError> {
        let fields = match spec {
            Spec::Shape(fields) => fields,
            Spec::Config(Value::Object(map)) if map.is_empty() => Shape::new(),
            other => {
                return Err(BuildError::spec(
                    Self::KIND,
                    format!("must be an object, got {}", other.describe()),
                ))
            }
        };
        let constraints = options.constraint_fn()?;
        let description = options.description_text()?;

        Ok(Self {
            object: ObjectMatcher::new(fields),
            constraints,
            description,
        })
    }

    fn match_at(&self, path: &KeyPath, value: &Value, index: Option<usize>) -> Verdict {
        let field_errors = self.object.match_value(path, value, index);
        if !field_errors.is_empty() {
            return Verdict::from(field_errors);
        }

        Verdict::from(self.closed_shape_errors(path, value, index))
    }

    fn safe_parse_at(
        &self,
        path: &KeyPath,
        value: &Value,
        index: Option<usize>,
    ) -> Validation<Value, MatchErrors> {
        let parsed = match self.object.safe_parse(path, value, index) {
            Validation::Success(parsed) => parsed,
            failure @ Validation::Failure(_) => return failure,
        };

        outcome(self.closed_shape_errors(path, value, index), || parsed)
    }

    fn json_schema(&self) -> Value {
        let mut schema = self.object.to_json_schema();
        json_schema::set(&mut schema, "additionalProperties", Value::Bool(false));
        json_schema::describe(&mut schema, self.description.as_deref());
        schema
    }
}
