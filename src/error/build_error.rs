//! Matcher construction errors.

/// Errors raised while constructing a matcher.
///
/// Construction either yields a complete matcher or one of these; a matcher
/// is never returned half-built, and none of these are deferred to
/// validation time.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The spec has the wrong shape for this kind of matcher.
    #[error("invalid spec for {kind} matcher: {reason}")]
    InvalidSpec {
        /// The matcher kind being constructed.
        kind: &'static str,
        /// What was wrong with the spec.
        reason: String,
    },

    /// `constraints` was given but is not a function.
    #[error("invalid constraints, must be a function")]
    InvalidConstraints,

    /// A recognized option holds a value of the wrong type.
    #[error("invalid option '{key}': {reason}")]
    InvalidOption {
        /// The option key.
        key: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// A `pattern` option did not compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl BuildError {
    pub(crate) fn spec(kind: &'static str, reason: impl Into<String>) -> Self {
        BuildError::InvalidSpec {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn option(key: &str, reason: impl Into<String>) -> Self {
        BuildError::InvalidOption {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
