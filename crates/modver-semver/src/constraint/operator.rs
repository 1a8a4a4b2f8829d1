//! Comparison operators for version predicates

use std::cmp::Ordering;
use std::fmt;

use crate::version::{SemanticVersion, Version};

/// Comparison operators for version predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,
    /// Equal (=)
    Equal,
    /// Same major and minor, at least the reference (~)
    SameToNextMinor,
    /// Same major, at least the reference (^)
    SameToNextMajor,
}

struct OperatorInfo {
    serialized: &'static str,
    min_inclusive: bool,
    max_inclusive: bool,
    test: fn(&SemanticVersion, &SemanticVersion) -> bool,
    min_version: fn(&SemanticVersion) -> Option<SemanticVersion>,
    max_version: fn(&SemanticVersion) -> Option<SemanticVersion>,
}

// Indexed by discriminant. Ordered so that prefix matching finds the longest token.
static OPERATORS: [OperatorInfo; 7] = [
    OperatorInfo {
        serialized: ">=",
        min_inclusive: true,
        max_inclusive: false,
        test: |a, b| a.compare_to(b) != Ordering::Less,
        min_version: reference,
        max_version: unbounded,
    },
    OperatorInfo {
        serialized: "<=",
        min_inclusive: false,
        max_inclusive: true,
        test: |a, b| a.compare_to(b) != Ordering::Greater,
        min_version: unbounded,
        max_version: reference,
    },
    OperatorInfo {
        serialized: ">",
        min_inclusive: false,
        max_inclusive: false,
        test: |a, b| a.compare_to(b) == Ordering::Greater,
        min_version: reference,
        max_version: unbounded,
    },
    OperatorInfo {
        serialized: "<",
        min_inclusive: false,
        max_inclusive: false,
        test: |a, b| a.compare_to(b) == Ordering::Less,
        min_version: unbounded,
        max_version: reference,
    },
    OperatorInfo {
        serialized: "=",
        min_inclusive: true,
        max_inclusive: true,
        test: |a, b| a.compare_to(b) == Ordering::Equal,
        min_version: reference,
        max_version: reference,
    },
    OperatorInfo {
        serialized: "~",
        min_inclusive: true,
        max_inclusive: false,
        test: |a, b| {
            a.compare_to(b) != Ordering::Less
                && a.component(0) == b.component(0)
                && a.component(1) == b.component(1)
        },
        min_version: reference,
        max_version: next_minor,
    },
    OperatorInfo {
        serialized: "^",
        min_inclusive: true,
        max_inclusive: false,
        test: |a, b| a.compare_to(b) != Ordering::Less && a.component(0) == b.component(0),
        min_version: reference,
        max_version: next_major,
    },
];

fn reference(version: &SemanticVersion) -> Option<SemanticVersion> {
    Some(version.clone())
}

fn unbounded(_: &SemanticVersion) -> Option<SemanticVersion> {
    None
}

// The empty prerelease makes these the lowest versions with the bumped core. Past
// u32::MAX there is no such version and the range stays open above.

fn next_minor(version: &SemanticVersion) -> Option<SemanticVersion> {
    let major = version.component(0).value()?;
    let minor = version.component(1).value()?;

    match minor.checked_add(1) {
        Some(minor) => SemanticVersion::new(vec![major, minor], Some(String::new()), None).ok(),
        None => next_major(version),
    }
}

fn next_major(version: &SemanticVersion) -> Option<SemanticVersion> {
    let major = version.component(0).value()?.checked_add(1)?;
    SemanticVersion::new(vec![major], Some(String::new()), None).ok()
}

impl Operator {
    /// All operators, longest token first
    pub const ALL: [Operator; 7] = [
        Operator::GreaterThanOrEqual,
        Operator::LessThanOrEqual,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Equal,
        Operator::SameToNextMinor,
        Operator::SameToNextMajor,
    ];

    fn info(self) -> &'static OperatorInfo {
        &OPERATORS[self as usize]
    }

    /// Split the longest operator token off the start of a range term.
    ///
    /// Terms without an operator use [`Operator::Equal`].
    pub fn split_prefix(term: &str) -> (Operator, &str) {
        Self::ALL
            .iter()
            .find_map(|op| term.strip_prefix(op.as_str()).map(|rest| (*op, rest)))
            .unwrap_or((Operator::Equal, term))
    }

    /// Parse operator from string
    pub fn from_token(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == s)
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        self.info().serialized
    }

    /// Whether the lower bound of the covered interval is inclusive
    pub fn is_min_inclusive(&self) -> bool {
        self.info().min_inclusive
    }

    /// Whether the upper bound of the covered interval is inclusive
    pub fn is_max_inclusive(&self) -> bool {
        self.info().max_inclusive
    }

    /// Test `version` against the reference version `reference`.
    ///
    /// Unless both are semantic versions only equality of the friendly strings can
    /// be checked, and only for operators with an inclusive bound.
    pub fn test(&self, version: &Version, reference: &Version) -> bool {
        match (version, reference) {
            (Version::Semantic(a), Version::Semantic(b)) => self.test_semantic(a, b),
            _ if self.is_min_inclusive() || self.is_max_inclusive() => {
                version.friendly_string() == reference.friendly_string()
            }
            _ => false,
        }
    }

    pub fn test_semantic(&self, version: &SemanticVersion, reference: &SemanticVersion) -> bool {
        (self.info().test)(version, reference)
    }

    /// Lower bound of the interval covered by this operator, `None` if unbounded
    pub fn min_version(&self, reference: &SemanticVersion) -> Option<SemanticVersion> {
        (self.info().min_version)(reference)
    }

    /// Upper bound of the interval covered by this operator, `None` if unbounded
    pub fn max_version(&self, reference: &SemanticVersion) -> Option<SemanticVersion> {
        (self.info().max_version)(reference)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
