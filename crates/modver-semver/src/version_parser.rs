//! Version parsing

use thiserror::Error;

use crate::version::{OpaqueVersion, SemanticVersion, Version};

/// Error type for version and predicate parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParserError {
    #[error("Version must be a non-empty string")]
    Empty,
    #[error("Did not provide version components")]
    NoComponents,
    #[error("Missing version number component in \"{0}\"")]
    MissingComponent(String),
    #[error("Negative or missing trailing version number component in \"{0}\"")]
    TrailingSeparator(String),
    #[error("Could not parse version number component \"{0}\"")]
    InvalidComponent(String),
    #[error("Version number component \"{0}\" is too large")]
    ComponentOverflow(String),
    #[error("Invalid prerelease string \"{0}\"")]
    InvalidPrerelease(String),
    #[error("Pre-release versions are not allowed to use X-ranges: \"{0}\"")]
    WildcardWithPrerelease(String),
    #[error("Interjacent wildcards (1.x.2) are disallowed: \"{0}\"")]
    InterjacentWildcard(String),
    #[error("Versions of form 'x' or 'X' are not allowed: \"{0}\"")]
    BareWildcard(String),
    #[error("Invalid predicate \"{predicate}\": wildcard ranges support at most three components")]
    WildcardTooDeep { predicate: String },
    #[error("Invalid predicate \"{predicate}\": version ranges with wildcards (.x) require using the equality operator or no operator at all")]
    WildcardOperator { predicate: String },
    #[error("Invalid predicate \"{predicate}\": \"{version}\" is not a semantic version and only supports the equality operator")]
    OpaqueOperator { predicate: String, version: String },
}

impl VersionParserError {
    /// Whether the input was a malformed wildcard range literal rather than an
    /// arbitrary non-semantic string.
    pub fn is_wildcard_misuse(&self) -> bool {
        matches!(
            self,
            VersionParserError::WildcardWithPrerelease(_)
                | VersionParserError::InterjacentWildcard(_)
                | VersionParserError::BareWildcard(_)
        )
    }
}

/// Turns strings into [`Version`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionParser;

impl VersionParser {
    /// Create a new parser
    pub fn new() -> Self {
        VersionParser
    }

    /// Parse a concrete version, preferring the structured form.
    ///
    /// Anything that is not a structured version becomes an opaque version; only the
    /// empty string is rejected.
    pub fn parse(&self, version: &str) -> Result<Version, VersionParserError> {
        self.parse_with(version, false)
    }

    /// Parse the version part of a range term, where a trailing `x`, `X` or `*`
    /// component is allowed.
    ///
    /// Malformed wildcards (`x`, `1.x.2`, `1.x-beta`) are errors instead of opaque
    /// versions.
    pub fn parse_range_literal(&self, version: &str) -> Result<Version, VersionParserError> {
        self.parse_with(version, true)
    }

    /// Parse a version that must be in the structured form.
    pub fn parse_semantic(&self, version: &str) -> Result<SemanticVersion, VersionParserError> {
        SemanticVersion::parse(version, false)
    }

    /// Check if a string is a valid structured version
    pub fn is_valid(&self, version: &str) -> bool {
        self.parse_semantic(version).is_ok()
    }

    fn parse_with(&self, version: &str, allow_wildcard: bool) -> Result<Version, VersionParserError> {
        if version.is_empty() {
            return Err(VersionParserError::Empty);
        }

        match SemanticVersion::parse(version, allow_wildcard) {
            Ok(semantic) => Ok(Version::Semantic(semantic)),
            Err(err) if err.is_wildcard_misuse() => Err(err),
            Err(err) => {
                log::debug!("Treating \"{}\" as an opaque version: {}", version, err);
                Ok(Version::Opaque(OpaqueVersion::new(version)))
            }
        }
    }
}
