//! JSON Schema projection helpers.
//!
//! Schema descriptions are plain `serde_json::Value` trees: object nodes carry
//! `type`, `properties` and optionally `required`, `additionalProperties` and
//! `description`; scalar nodes carry `type`, an optional `format` and an
//! optional `description`. No matcher state leaks into them.

use serde_json::Value;

/// The `$schema` URI stamped on standalone documents.
pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Wraps a schema description as a standalone document by setting `$schema`.
///
/// # Example
///
/// ```rust
/// use matchkit::{interop, Match, Matcher, Options};
///
/// let doc = interop::document(Match::uuid(Options::new()).unwrap().to_json_schema());
///
/// assert_eq!(doc["$schema"], interop::DRAFT_2020_12);
/// assert_eq!(doc["format"], "uuid");
/// ```
pub fn document(mut schema: Value) -> Value {
    if let Some(map) = schema.as_object_mut() {
        map.insert("$schema".to_string(), Value::String(DRAFT_2020_12.to_string()));
    }
    schema
}

/// Sets `key` on a schema node. Non-object nodes are left untouched.
pub(crate) fn set(schema: &mut Value, key: &str, value: Value) {
    if let Some(map) = schema.as_object_mut() {
        map.insert(key.to_string(), value);
    }
}

/// Sets `description` when there is one.
pub(crate) fn describe(schema: &mut Value, description: Option<&str>) {
    if let Some(text) = description {
        set(schema, "description", Value::String(text.to_string()));
    }
}
