//! Versions that do not follow the structured notation

use std::fmt;

/// A version known only by its string, e.g. `b1.7.3` or `20w14infinite`.
///
/// Opaque versions have no meaningful ordering; they are equal only to the
/// identical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueVersion {
    friendly: String,
}

impl OpaqueVersion {
    pub fn new(version: impl Into<String>) -> Self {
        OpaqueVersion {
            friendly: version.into(),
        }
    }

    pub fn friendly_string(&self) -> &str {
        &self.friendly
    }
}

impl fmt::Display for OpaqueVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.friendly)
    }
}
