//! Optional values.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, MatchErrors};
use crate::interop::json_schema;
use crate::path::KeyPath;

use super::spec::{Options, Spec};
use super::traits::{Matcher, MatcherKind, MatcherRef, Verdict};

/// Wraps a matcher so that `null` and missing object fields pass.
///
/// Any other value is delegated to the inner matcher unchanged.
pub struct OptionalMatcher {
    inner: MatcherRef,
    description: Option<String>,
}

impl OptionalMatcher {
    /// Wraps `inner`.
    pub fn new<M: Matcher + 'static>(inner: M) -> Self {
        Self {
            inner: Arc::new(inner),
            description: None,
        }
    }

    /// Sets the description, which overrides the inner one in schema output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl MatcherKind for OptionalMatcher {
    const KIND: &'static str = "optional";

    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError> {
        match spec {
            Spec::Matcher(inner) => Ok(Self {
                inner,
                description: options.description_text()?,
            }),
            other => Err(BuildError::spec(
                Self::KIND,
                format!("must be the wrapped matcher, got {}", other.describe()),
            )),
        }
    }

    fn match_at(&self, path: &KeyPath, value: &Value, index: Option<usize>) -> Verdict {
        if value.is_null() {
            return Verdict::Pass;
        }
        Verdict::from(self.inner.match_value(path, value, index))
    }

    fn safe_parse_at(
        &self,
        path: &KeyPath,
        value: &Value,
        index: Option<usize>,
    ) -> Validation<Value, MatchErrors> {
        if value.is_null() {
            return Validation::Success(Value::Null);
        }
        self.inner.safe_parse(path, value, index)
    }

    fn json_schema(&self) -> Value {
        let mut schema = self.inner.to_json_schema();
        json_schema::describe(&mut schema, self.description.as_deref());
        schema
    }

    fn is_optional(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::IntegerMatcher;
    use serde_json::json;

    #[test]
    fn test_null_passes() {
        let matcher = OptionalMatcher::new(IntegerMatcher::new());
        assert!(matcher.match_value(&KeyPath::root(), &json!(null), None).is_empty());
        assert!(matcher.accepts_missing());
    }

    #[test]
    fn test_delegates_other_values() {
        let matcher = OptionalMatcher::new(IntegerMatcher::new().min(1));
        let errors = matcher.match_value(&KeyPath::from("n"), &json!(0), None);
        assert_eq!(errors[0].message, "should be >= 1");
        assert_eq!(errors[0].path.as_str(), "n");
    }

    #[test]
    fn test_schema_is_inner_schema() {
        let matcher = OptionalMatcher::new(IntegerMatcher::new());
        assert_eq!(matcher.to_json_schema(), json!({"type": "integer"}));
    }

    #[test]
    fn test_description_on_top_of_inner_schema() {
        use crate::matcher::factory;

        let inner: MatcherRef = Arc::new(IntegerMatcher::new().description("count"));
        let matcher = factory::<OptionalMatcher>()
            .build(inner, Options::new().description("x"))
            .unwrap();
        assert_eq!(
            matcher.to_json_schema(),
            json!({"type": "integer", "description": "x"})
        );

        let matcher = OptionalMatcher::new(IntegerMatcher::new().description("count"));
        assert_eq!(matcher.to_json_schema()["description"], "count");
    }

    #[test]
    fn test_initialize_rejects_bad_description() {
        let inner: MatcherRef = Arc::new(IntegerMatcher::new());
        let result =
            OptionalMatcher::initialize(Spec::from(inner), Options::new().with("description", 3));
        assert!(matches!(result, Err(BuildError::InvalidOption { .. })));
    }
}
