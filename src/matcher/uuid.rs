//! UUID matching.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

use crate::error::BuildError;
use crate::interop::json_schema;
use crate::path::KeyPath;

use super::spec::{Options, Spec};
use super::traits::{MatcherKind, Verdict};

/// Byte offset of the version nibble in the canonical layout.
const VERSION_OFFSET: usize = 14;

fn canonical() -> &'static Regex {
    static CANONICAL: OnceLock<Regex> = OnceLock::new();
    CANONICAL.get_or_init(|| {
        Regex::new(
            r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
        )
        .expect("canonical UUID pattern compiles")
    })
}

/// Matches 36-character hyphenated UUID strings, optionally pinned to one
/// version.
///
/// Failure is always the same single message, fixed at construction:
/// `"should be a UUID"`, or `"should be a UUID version N"` when a version is
/// configured.
///
/// # Example
///
/// ```rust
/// use matchkit::{KeyPath, Match, Matcher, Options};
/// use serde_json::json;
///
/// let v1 = Match::uuid(Options::new().with("version", 1)).unwrap();
///
/// let id = json!("123e4567-e89b-12d3-a456-426614174000");
/// assert!(v1.match_value(&KeyPath::root(), &id, None).is_empty());
///
/// let v2 = Match::uuid(Options::new().with("version", 2)).unwrap();
/// let errors = v2.match_value(&KeyPath::root(), &id, None);
/// assert_eq!(errors[0].message, "should be a UUID version 2");
/// ```
#[derive(Debug, Clone)]
pub struct UuidMatcher {
    version: Option<String>,
    description: Option<String>,
    message: String,
}

impl UuidMatcher {
    /// Returns the configured version digit, as text.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl MatcherKind for UuidMatcher {
    const KIND: &'static str = "uuid";

    fn initialize(spec: Spec, options: Options) -> Result<Self, BuildError> {
        let options = options.merge_spec(Self::KIND, spec)?;

        let version = options.text_or_number("version")?;
        let message = match &version {
            Some(v) => format!("should be a UUID version {}", v),
            None => "should be a UUID".to_string(),
        };

        Ok(Self {
            version,
            description: options.description_text()?,
            message,
        })
    }

    fn match_at(&self, _path: &KeyPath, value: &Value, _index: Option<usize>) -> Verdict {
        let text = match value.as_str() {
            Some(text) => text,
            None => return Verdict::from(self.message.as_str()),
        };
        if !canonical().is_match(text) {
            return Verdict::from(self.message.as_str());
        }
        if let Some(version) = &self.version {
            if text.get(VERSION_OFFSET..VERSION_OFFSET + 1) != Some(version.as_str()) {
                return Verdict::from(self.message.as_str());
            }
        }
        Verdict::Pass
    }

    fn json_schema(&self) -> Value {
        let format = match &self.version {
            Some(v) => format!("uuid-v{}", v),
            None => "uuid".to_string(),
        };
        let mut schema = json!({ "type": "string", "format": format });
        json_schema::describe(&mut schema, self.description.as_deref());
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;

    const SAMPLE: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn uuid(options: Options) -> UuidMatcher {
        UuidMatcher::initialize(Spec::Empty, options).unwrap()
    }

    fn check(matcher: &UuidMatcher, value: Value) -> Vec<crate::MatchError> {
        matcher.match_value(&KeyPath::from("id"), &value, None)
    }

    #[test]
    fn test_accepts_canonical() {
        assert!(check(&uuid(Options::new()), json!(SAMPLE)).is_empty());
    }

    #[test]
    fn test_version_constraint() {
        assert!(check(&uuid(Options::new().with("version", 1)), json!(SAMPLE)).is_empty());
        assert!(check(&uuid(Options::new().with("version", "1")), json!(SAMPLE)).is_empty());

        let errors = check(&uuid(Options::new().with("version", 2)), json!(SAMPLE));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "should be a UUID version 2");
    }

    #[test]
    fn test_case_insensitive() {
        let upper = SAMPLE.to_uppercase();
        assert!(check(&uuid(Options::new()), json!(upper)).is_empty());
        assert!(check(&uuid(Options::new().with("version", 1)), json!(upper)).is_empty());
    }

    #[test]
    fn test_rejects_malformed() {
        let matcher = uuid(Options::new());
        for value in [
            "not-a-uuid",
            "",
            "123e4567e89b12d3a456426614174000",
            "123e4567-e89b-62d3-a456-426614174000",
            "123e4567-e89b-12d3-c456-426614174000",
            "123e4567-e89b-12d3-a456-4266141740000",
            "g23e4567-e89b-12d3-a456-426614174000",
        ] {
            let errors = check(&matcher, json!(value));
            assert_eq!(errors.len(), 1, "{value}");
            assert_eq!(errors[0].message, "should be a UUID");
        }
    }

    #[test]
    fn test_non_text_uses_same_message() {
        let matcher = uuid(Options::new().with("version", 4));
        for value in [json!(123), json!(null), json!({}), json!([SAMPLE])] {
            let errors = check(&matcher, value.clone());
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].message, "should be a UUID version 4");
            assert_eq!(errors[0].path.as_str(), "id");
            assert_eq!(errors[0].value, value);
        }
    }

    #[test]
    fn test_unset_version_values() {
        for options in [
            Options::new().with("version", Value::Null),
            Options::new().with("version", 0),
            Options::new().with("version", ""),
        ] {
            let matcher = uuid(options);
            assert_eq!(matcher.version(), None);
            assert_eq!(matcher.message(), "should be a UUID");
        }
    }

    #[test]
    fn test_invalid_version_type() {
        let result = UuidMatcher::initialize(Spec::Empty, Options::new().with("version", true));
        assert!(matches!(result, Err(BuildError::InvalidOption { .. })));
    }

    #[test]
    fn test_version_from_spec() {
        use crate::matcher::factory;

        let matcher = factory::<UuidMatcher>()
            .build(json!({"version": 2}), Options::new())
            .unwrap();
        assert_eq!(matcher.version(), Some("2"));
        assert_eq!(check(&matcher, json!(SAMPLE))[0].message, "should be a UUID version 2");

        let matcher = factory::<UuidMatcher>()
            .build(json!({"version": 2, "description": "id"}), Options::new().with("version", 1))
            .unwrap();
        assert_eq!(matcher.version(), Some("1"));
        assert!(check(&matcher, json!(SAMPLE)).is_empty());
        assert_eq!(matcher.json_schema()["description"], "id");
    }

    #[test]
    fn test_rejects_non_object_spec() {
        for spec in [Spec::from("v4"), Spec::from(json!(4)), Spec::from(json!([4]))] {
            let result = UuidMatcher::initialize(spec, Options::new());
            assert!(matches!(result, Err(BuildError::InvalidSpec { kind: "uuid", .. })));
        }
    }

    #[test]
    fn test_json_schema() {
        assert_eq!(
            uuid(Options::new()).json_schema(),
            json!({"type": "string", "format": "uuid"})
        );
        assert_eq!(
            uuid(Options::new().with("version", 4).description("request id")).json_schema(),
            json!({"type": "string", "format": "uuid-v4", "description": "request id"})
        );
    }
}
