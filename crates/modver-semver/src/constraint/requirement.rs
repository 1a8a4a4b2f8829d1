//! Alternatives of range expressions, as declared for one dependency

use std::fmt;
use std::str::FromStr;

use super::interval::VersionInterval;
use super::predicate::VersionPredicate;
use crate::version::Version;
use crate::version_parser::VersionParserError;

/// A version requirement made of several alternative range expressions.
///
/// A version satisfies the requirement if any of the predicates accepts it, so a
/// requirement without any range matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VersionRequirement {
    ranges: Vec<String>,
    predicates: Vec<VersionPredicate>,
}

impl VersionRequirement {
    /// Parse each range expression; identical predicates are kept once.
    pub fn parse<I, S>(ranges: I) -> Result<Self, VersionParserError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requirement = VersionRequirement::default();

        for range in ranges {
            let range = range.as_ref();
            let predicate = VersionPredicate::parse(range)?;

            if !requirement.predicates.contains(&predicate) {
                requirement.predicates.push(predicate);
            }
            requirement.ranges.push(range.to_string());
        }

        Ok(requirement)
    }

    /// The requirement accepting every version
    pub fn any() -> Self {
        VersionRequirement {
            ranges: vec!["*".to_string()],
            predicates: vec![VersionPredicate::any()],
        }
    }

    /// The range expressions as written
    pub fn ranges(&self) -> &[String] {
        &self.ranges
    }

    pub fn predicates(&self) -> &[VersionPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check whether any predicate accepts `version`
    pub fn matches(&self, version: &Version) -> bool {
        self.predicates.iter().any(|predicate| predicate.test(version))
    }

    /// The disjoint, sorted intervals covered by all predicates together.
    ///
    /// Predicates whose terms contradict each other contribute nothing.
    pub fn intervals(&self) -> Vec<VersionInterval> {
        self.predicates
            .iter()
            .filter_map(VersionPredicate::interval)
            .fold(Vec::new(), |acc, interval| VersionInterval::or(&acc, &interval))
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ranges.join(" || "))
    }
}

impl FromStr for VersionRequirement {
    type Err = VersionParserError;

    /// Parse alternatives separated by `||`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRequirement::parse(s.split("||").map(str::trim))
    }
}

#[cfg(feature = "serde")]
serialize_to_string!(VersionRequirement);
#[cfg(feature = "serde")]
deserialize_from_str!(VersionRequirement, "version requirement");

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn render(intervals: &[VersionInterval]) -> Vec<String> {
        intervals.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_matches_any_alternative() {
        let requirement = VersionRequirement::parse([">=1.0 <1.5", "2.x"]).unwrap();
        assert!(requirement.matches(&v("1.2")));
        assert!(requirement.matches(&v("2.7.1")));
        assert!(!requirement.matches(&v("1.6")));
        assert!(!requirement.matches(&v("3.0")));
    }

    #[test]
    fn test_empty_matches_nothing() {
        let requirement = VersionRequirement::parse(Vec::<String>::new()).unwrap();
        assert!(requirement.is_empty());
        assert!(!requirement.matches(&v("1.0")));
        assert!(requirement.intervals().is_empty());
    }

    #[test]
    fn test_any() {
        let requirement = VersionRequirement::any();
        assert!(requirement.matches(&v("foo")));
        assert_eq!(requirement.intervals(), vec![VersionInterval::INFINITE]);
        assert_eq!(requirement, VersionRequirement::parse(["*"]).unwrap());
    }

    #[test]
    fn test_intervals_are_merged() {
        let requirement = VersionRequirement::parse(["^2.0", ">=1.0 <2.0", "<0.5"]).unwrap();
        assert_eq!(render(&requirement.intervals()), ["(-∞,0.5)", "[1.0,3-)"]);
    }

    #[test]
    fn test_contradicting_predicate_is_skipped() {
        let requirement = VersionRequirement::parse([">=2.0 <1.0", "1.0"]).unwrap();
        assert_eq!(render(&requirement.intervals()), ["[1.0,1.0]"]);
    }

    #[test]
    fn test_duplicates() {
        let requirement = VersionRequirement::parse(["^1.0", "^1.0", " ^1.0 "]).unwrap();
        assert_eq!(requirement.predicates().len(), 1);
        assert_eq!(requirement.ranges().len(), 3);
    }

    #[test]
    fn test_error() {
        assert!(VersionRequirement::parse(["^1.0", ">x"]).is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let requirement: VersionRequirement = ">=1.0 || 2.x".parse().unwrap();
        assert_eq!(requirement.ranges(), [">=1.0", "2.x"]);
        assert_eq!(requirement.to_string(), ">=1.0 || 2.x");
        assert!(requirement.matches(&v("2.3")));
    }
}
