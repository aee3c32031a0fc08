//! Integration tests for UUID matching.

use matchkit::{factory, KeyPath, Match, Matcher, Options, Spec, UuidMatcher};
use serde_json::json;

const SAMPLE: &str = "123e4567-e89b-12d3-a456-426614174000";

fn messages(matcher: &impl Matcher, value: serde_json::Value) -> Vec<String> {
    matcher
        .match_value(&KeyPath::root(), &value, None)
        .into_iter()
        .map(|e| e.message)
        .collect()
}

#[test]
fn test_sample_without_version() {
    let matcher = Match::uuid(Options::new()).unwrap();
    assert!(messages(&matcher, json!(SAMPLE)).is_empty());
}

#[test]
fn test_sample_with_matching_version() {
    let matcher = Match::uuid(Options::new().with("version", 1)).unwrap();
    assert!(messages(&matcher, json!(SAMPLE)).is_empty());
}

#[test]
fn test_sample_with_other_version() {
    let matcher = Match::uuid(Options::new().with("version", 2)).unwrap();
    assert_eq!(
        messages(&matcher, json!(SAMPLE)),
        vec!["should be a UUID version 2"]
    );
}

#[test]
fn test_not_a_uuid_always_fails() {
    for options in [Options::new(), Options::new().with("version", 4)] {
        let matcher = Match::uuid(options).unwrap();
        assert_eq!(messages(&matcher, json!("not-a-uuid")).len(), 1);
    }
}

#[test]
fn test_uppercase_accepted() {
    let matcher = Match::uuid(Options::new()).unwrap();
    assert!(messages(&matcher, json!(SAMPLE.to_uppercase())).is_empty());
}

#[test]
fn test_non_text_gets_the_uuid_message() {
    let matcher = Match::uuid(Options::new()).unwrap();
    assert_eq!(messages(&matcher, json!(123)), vec!["should be a UUID"]);
}

#[test]
fn test_empty_string_fails() {
    let matcher = Match::uuid(Options::new()).unwrap();
    assert_eq!(messages(&matcher, json!("")), vec!["should be a UUID"]);
}

#[test]
fn test_version_given_as_text() {
    let v4 = "f47ac10b-58cc-4372-a567-0e02b2c3d479";
    let matcher = Match::uuid(Options::new().with("version", "4")).unwrap();
    assert!(messages(&matcher, json!(v4)).is_empty());
    assert_eq!(messages(&matcher, json!(SAMPLE)).len(), 1);
}

#[test]
fn test_embedded_in_object_gets_field_path() {
    let matcher = Match::object(
        matchkit::Shape::new().field("id", Match::uuid(Options::new()).unwrap()),
        Options::new(),
    )
    .unwrap();

    let errors = matcher.match_value(&KeyPath::from("req"), &json!({"id": 123}), None);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.as_str(), "req.id");
    assert_eq!(errors[0].value, json!(123));
    assert_eq!(errors[0].message, "should be a UUID");
}

#[test]
fn test_safe_parse_passes_text_through() {
    let matcher = factory::<UuidMatcher>()
        .build(Spec::Empty, Options::new())
        .unwrap();

    let parsed = matcher
        .safe_parse(&KeyPath::root(), &json!(SAMPLE), None)
        .into_result()
        .unwrap();
    assert_eq!(parsed, json!(SAMPLE));
}
