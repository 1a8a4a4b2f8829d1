//! Version model
//!
//! A [`Version`] is either a [`SemanticVersion`] or, for strings that fail structured
//! parsing, an [`OpaqueVersion`] compared only by its string.

mod opaque;
mod semantic;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub use opaque::OpaqueVersion;
pub use semantic::{Component, SemanticVersion};

use crate::version_parser::{VersionParser, VersionParserError};

/// A single version of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    Semantic(SemanticVersion),
    Opaque(OpaqueVersion),
}

impl Version {
    /// Parse a concrete version, falling back to an opaque version.
    pub fn parse(version: &str) -> Result<Self, VersionParserError> {
        VersionParser::new().parse(version)
    }

    pub fn friendly_string(&self) -> &str {
        match self {
            Version::Semantic(v) => v.friendly_string(),
            Version::Opaque(v) => v.friendly_string(),
        }
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self, Version::Semantic(_))
    }

    pub fn as_semantic(&self) -> Option<&SemanticVersion> {
        match self {
            Version::Semantic(v) => Some(v),
            Version::Opaque(_) => None,
        }
    }

    /// Compare two versions.
    ///
    /// Two semantic versions use [`SemanticVersion::compare_to`], any other pair falls
    /// back to comparing the friendly strings lexically.
    pub fn compare_to(&self, other: &Version) -> Ordering {
        match (self, other) {
            (Version::Semantic(a), Version::Semantic(b)) => a.compare_to(b),
            _ => self.friendly_string().cmp(other.friendly_string()),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.compare_to(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl From<SemanticVersion> for Version {
    fn from(version: SemanticVersion) -> Self {
        Version::Semantic(version)
    }
}

impl From<OpaqueVersion> for Version {
    fn from(version: OpaqueVersion) -> Self {
        Version::Opaque(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.friendly_string())
    }
}

impl FromStr for Version {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

#[cfg(feature = "serde")]
serialize_to_string!(Version);
#[cfg(feature = "serde")]
deserialize_from_str!(Version, "version");
