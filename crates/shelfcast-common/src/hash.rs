//! Content hash identifiers.
//!
//! Books and tracks are keyed by the hex rendering of a digest over their
//! bytes. [`ContentHash`] keeps those keys from mixing with arbitrary strings
//! while still allowing lookups by `&str` (query parameters arrive as plain
//! text).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Hex-rendered content digest identifying a book or a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Render raw digest bytes as a lowercase hex key.
    #[must_use]
    pub fn from_digest(bytes: impl AsRef<[u8]>) -> Self {
        Self(hex::encode(bytes))
    }

    /// Borrow the hex key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ContentHash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContentHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}
