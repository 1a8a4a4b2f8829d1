//! Dependency declarations between mods

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constraint::{VersionInterval, VersionRequirement};
use crate::version::Version;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dependency kind \"{0}\"")]
pub struct UnknownDependencyKind(pub String);

/// How a dependency on another mod is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Depends,
    Recommends,
    Suggests,
    Conflicts,
    Breaks,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 5] = [
        DependencyKind::Depends,
        DependencyKind::Recommends,
        DependencyKind::Suggests,
        DependencyKind::Conflicts,
        DependencyKind::Breaks,
    ];

    /// Key used in mod metadata and dependency overrides
    pub fn key(&self) -> &'static str {
        match self {
            DependencyKind::Depends => "depends",
            DependencyKind::Recommends => "recommends",
            DependencyKind::Suggests => "suggests",
            DependencyKind::Conflicts => "conflicts",
            DependencyKind::Breaks => "breaks",
        }
    }

    /// Whether the dependency asks for the other mod rather than against it
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            DependencyKind::Depends | DependencyKind::Recommends | DependencyKind::Suggests
        )
    }

    /// Whether loading may continue when the dependency is not met
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            DependencyKind::Recommends | DependencyKind::Suggests | DependencyKind::Conflicts
        )
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DependencyKind {
    type Err = UnknownDependencyKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownDependencyKind(s.to_string()))
    }
}

/// A dependency of one mod on versions of another
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    kind: DependencyKind,
    id: String,
    requirement: VersionRequirement,
}

impl Dependency {
    pub fn new(kind: DependencyKind, id: impl Into<String>, requirement: VersionRequirement) -> Self {
        Dependency {
            kind,
            id: id.into(),
            requirement,
        }
    }

    pub fn kind(&self) -> DependencyKind {
        self.kind
    }

    /// Id of the mod depended on
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn requirement(&self) -> &VersionRequirement {
        &self.requirement
    }

    /// Check whether `version` is one of the versions named by the requirement.
    ///
    /// For negative kinds a match means the two mods clash.
    pub fn matches(&self, version: &Version) -> bool {
        self.requirement.matches(version)
    }

    /// Intervals of versions of the other mod that satisfy this dependency.
    ///
    /// Negative kinds allow everything outside the declared ranges.
    pub fn allowed_intervals(&self) -> Vec<VersionInterval> {
        let intervals = self.requirement.intervals();

        if self.kind.is_positive() {
            intervals
        } else {
            VersionInterval::not_all(&intervals)
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {} @ [{}]}}", self.kind, self.id, self.requirement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn dependency(kind: DependencyKind, ranges: &[&str]) -> Dependency {
        Dependency::new(kind, "foo", VersionRequirement::parse(ranges).unwrap())
    }

    #[test]
    fn test_kind_flags() {
        let flags: Vec<_> = DependencyKind::ALL
            .iter()
            .map(|kind| (kind.key(), kind.is_positive(), kind.is_soft()))
            .collect();

        assert_eq!(
            flags,
            [
                ("depends", true, false),
                ("recommends", true, true),
                ("suggests", true, true),
                ("conflicts", false, true),
                ("breaks", false, false),
            ]
        );
    }

    #[test]
    fn test_kind_from_key() {
        for kind in DependencyKind::ALL {
            assert_eq!(DependencyKind::from_key(kind.key()), Some(kind));
            assert_eq!(kind.to_string().parse::<DependencyKind>(), Ok(kind));
        }
        assert_eq!(DependencyKind::from_key("Depends"), None);
        assert_eq!(
            "requires".parse::<DependencyKind>(),
            Err(UnknownDependencyKind("requires".to_string()))
        );
    }

    #[test]
    fn test_matches() {
        let depends = dependency(DependencyKind::Depends, &[">=1.0", "0.9.x"]);
        assert!(depends.matches(&v("1.4")));
        assert!(depends.matches(&v("0.9.3")));
        assert!(!depends.matches(&v("0.8")));

        let breaks = dependency(DependencyKind::Breaks, &["<1.2"]);
        assert!(breaks.matches(&v("1.1")));
        assert!(!breaks.matches(&v("1.2")));
    }

    #[test]
    fn test_allowed_intervals() {
        let depends = dependency(DependencyKind::Depends, &["^1.2"]);
        assert_eq!(depends.allowed_intervals(), depends.requirement().intervals());

        let breaks = dependency(DependencyKind::Breaks, &["<1.2", ">=2.0"]);
        let allowed = breaks.allowed_intervals();
        assert_eq!(allowed.len(), 1);
        assert_eq!(allowed[0].to_string(), "[1.2,2.0)");
        assert!(allowed[0].contains(&v("1.5")));
        assert!(!allowed[0].contains(&v("2.0")));

        let conflicts = dependency(DependencyKind::Conflicts, &["*"]);
        assert!(conflicts.allowed_intervals().is_empty());
    }

    #[test]
    fn test_breaks_opaque_version() {
        let snapshot = v("23w13a");
        let breaks = dependency(DependencyKind::Breaks, &["23w13a"]);

        let depends = dependency(DependencyKind::Depends, &["23w13a"]);
        let allowed = VersionInterval::and_all(&depends.allowed_intervals(), &breaks.allowed_intervals());
        assert!(allowed.is_empty());

        let depends = dependency(DependencyKind::Depends, &[">=1.19", "23w13a"]);
        let allowed = VersionInterval::and_all(&depends.allowed_intervals(), &breaks.allowed_intervals());
        let rendered: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["[1.19,∞)"]);
        assert!(!allowed.iter().any(|interval| interval.contains(&snapshot)));
        assert!(allowed.iter().any(|interval| interval.contains(&v("1.20.4"))));
    }

    #[test]
    fn test_display() {
        let depends = dependency(DependencyKind::Depends, &[">=1.0", "2.x"]);
        assert_eq!(depends.to_string(), "{depends foo @ [>=1.0 || 2.x]}");
        assert_eq!(depends.id(), "foo");
        assert_eq!(depends.kind(), DependencyKind::Depends);
    }
}
