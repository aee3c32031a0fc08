//! Interoperability with other schema formats.
//!
//! Matchers project themselves into JSON Schema through
//! [`Matcher::to_json_schema`](crate::Matcher::to_json_schema); this module
//! holds the shared pieces of that projection.

pub mod json_schema;

pub use json_schema::{document, DRAFT_2020_12};
