//! Error types for matcher construction and validation failures.
//!
//! Validation failures are data: [`MatchError`] records carrying a path, the
//! offending value and a message. Construction failures are real errors
//! ([`BuildError`]) and abort matcher creation.

mod build_error;
mod match_error;

pub use build_error::BuildError;
pub use match_error::{MatchError, MatchErrors};
