//! Textual key paths for locating values in nested structures.
//!
//! A [`KeyPath`] is a dotted string such as `user.address.zip`. The empty
//! string denotes the root. Paths are built purely by concatenation, so a
//! matcher never needs to know how deep it sits in the tree.

use std::fmt::{self, Display};

/// A dotted path to a value in a nested JSON-like structure.
///
/// # Example
///
/// ```rust
/// use matchkit::KeyPath;
///
/// let path = KeyPath::root()
///     .child("users")
///     .item(0)
///     .child("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct KeyPath(String);

impl KeyPath {
    /// Creates the empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path of a field below this one.
    ///
    /// The field name is appended after a `.`, or used on its own when this
    /// path is the root.
    pub fn child(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{}", self.0, key))
        }
    }

    /// Returns the path of an array item below this one.
    pub fn item(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    /// Returns true if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the final segment of this path is `key`.
    pub fn ends_with_key(&self, key: &str) -> bool {
        self.0 == key || self.0.ends_with(&format!(".{}", key))
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
