//! Bound type for interval endpoints

use std::cmp::Ordering;
use std::fmt;

use crate::version::Version;

/// One present endpoint of a [`VersionInterval`](super::VersionInterval).
///
/// A missing endpoint is `None` at the interval level, so an absent bound can never
/// be compared as if it were present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    version: Version,
    is_inclusive: bool,
}

impl Bound {
    /// Create a new bound
    pub fn new(version: impl Into<Version>, is_inclusive: bool) -> Self {
        Bound {
            version: version.into(),
            is_inclusive,
        }
    }

    pub fn inclusive(version: impl Into<Version>) -> Self {
        Self::new(version, true)
    }

    pub fn exclusive(version: impl Into<Version>) -> Self {
        Self::new(version, false)
    }

    /// Get the version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check if the bound is inclusive
    pub fn is_inclusive(&self) -> bool {
        self.is_inclusive
    }

    pub fn is_semantic(&self) -> bool {
        self.version.is_semantic()
    }

    /// The same version with the opposite inclusivity, i.e. the bound of the
    /// complement on the other side.
    pub(crate) fn flipped(&self) -> Bound {
        Bound {
            version: self.version.clone(),
            is_inclusive: !self.is_inclusive,
        }
    }

    /// Whether this bound, used as the lower (`lower == true`) or upper end of an
    /// interval, lets `version` through.
    ///
    /// An opaque bound only knows its own version. Opaque versions rank below every
    /// semantic bound.
    pub(crate) fn admits(&self, version: &Version, lower: bool) -> bool {
        match (&self.version, version) {
            (Version::Semantic(bound), Version::Semantic(version)) => match version.compare_to(bound) {
                Ordering::Equal => self.is_inclusive,
                Ordering::Greater => lower,
                Ordering::Less => !lower,
            },
            (Version::Semantic(_), Version::Opaque(_)) => !lower,
            _ => (&self.version == version) == self.is_inclusive,
        }
    }

    /// Compare the versions of two bounds, ignoring inclusivity
    pub(crate) fn compare_version(&self, other: &Bound) -> Ordering {
        self.version.compare_to(&other.version)
    }

    /// Whether this bound, used as an upper bound, and `min`, used as a lower bound,
    /// leave at least one version between them.
    pub(crate) fn admits_lower(&self, min: &Bound) -> bool {
        match min.compare_version(self) {
            Ordering::Less => true,
            Ordering::Equal => min.is_inclusive && self.is_inclusive,
            Ordering::Greater => false,
        }
    }
}

/// Compare two optional lower bounds; `None` is negative infinity.
///
/// At the same version an inclusive lower bound is lower than an exclusive one.
pub(crate) fn compare_min(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .compare_version(b)
            .then_with(|| b.is_inclusive.cmp(&a.is_inclusive)),
    }
}

/// Compare two optional upper bounds; `None` is positive infinity.
///
/// At the same version an exclusive upper bound is lower than an inclusive one.
pub(crate) fn compare_max(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a
            .compare_version(b)
            .then_with(|| a.is_inclusive.cmp(&b.is_inclusive)),
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.version,
            if self.is_inclusive {
                "inclusive"
            } else {
                "exclusive"
            }
        )
    }
}
