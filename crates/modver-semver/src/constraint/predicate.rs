//! Range expressions such as `>=1.2.0 <2.0.0` or `1.2.x`

use std::fmt;
use std::str::FromStr;

use super::bound::Bound;
use super::interval::VersionInterval;
use super::operator::Operator;
use crate::version::{SemanticVersion, Version};
use crate::version_parser::{VersionParser, VersionParserError};

/// One `<operator><version>` term of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateTerm {
    operator: Operator,
    version: Version,
}

impl PredicateTerm {
    pub fn new(operator: Operator, version: impl Into<Version>) -> Self {
        PredicateTerm {
            operator,
            version: version.into(),
        }
    }

    fn parse(parser: &VersionParser, token: &str) -> Result<Self, VersionParserError> {
        let (operator, literal) = Operator::split_prefix(token);
        let version = parser.parse_range_literal(literal)?;

        let term = match version {
            Version::Semantic(semantic) if semantic.has_wildcard() => {
                Self::rewrite_wildcard(token, operator, &semantic)?
            }
            Version::Opaque(opaque) if operator != Operator::Equal => {
                return Err(VersionParserError::OpaqueOperator {
                    predicate: token.to_string(),
                    version: opaque.to_string(),
                });
            }
            version => PredicateTerm::new(operator, version),
        };

        log::trace!("Parsed predicate term \"{}\" as {}{}", token, term.operator, term.version);
        Ok(term)
    }

    /// `1.x` becomes `^1-`, `1.2.x` becomes `~1.2-`
    fn rewrite_wildcard(
        token: &str,
        operator: Operator,
        version: &SemanticVersion,
    ) -> Result<Self, VersionParserError> {
        if operator != Operator::Equal {
            return Err(VersionParserError::WildcardOperator {
                predicate: token.to_string(),
            });
        }

        let operator = match version.component_count() {
            2 => Operator::SameToNextMajor,
            3 => Operator::SameToNextMinor,
            _ => {
                return Err(VersionParserError::WildcardTooDeep {
                    predicate: token.to_string(),
                })
            }
        };

        let prefix = version.components().iter().filter_map(|c| c.value()).collect();
        let reference = SemanticVersion::new(prefix, Some(String::new()), version.build().map(str::to_string))?;

        log::debug!("Rewrote wildcard range \"{}\" to \"{}{}\"", token, operator, reference);

        Ok(PredicateTerm::new(operator, reference))
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn reference_version(&self) -> &Version {
        &self.version
    }

    /// Check whether `version` satisfies this term
    pub fn test(&self, version: &Version) -> bool {
        self.operator.test(version, &self.version)
    }

    /// The interval of versions this term accepts.
    ///
    /// An opaque reference covers only itself.
    pub fn interval(&self) -> VersionInterval {
        match &self.version {
            Version::Semantic(reference) => VersionInterval::from_bounds(
                self.operator
                    .min_version(reference)
                    .map(|v| Bound::new(v, self.operator.is_min_inclusive())),
                self.operator
                    .max_version(reference)
                    .map(|v| Bound::new(v, self.operator.is_max_inclusive())),
            ),
            Version::Opaque(_) => VersionInterval::point(self.version.clone()),
        }
    }
}

impl fmt::Display for PredicateTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// A conjunction of [`PredicateTerm`]s. Without any term every version matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VersionPredicate {
    terms: Vec<PredicateTerm>,
}

impl VersionPredicate {
    /// The predicate that matches every version
    pub fn any() -> Self {
        VersionPredicate { terms: Vec::new() }
    }

    /// Parse a range expression.
    ///
    /// Whitespace separates terms, empty terms and `*` are skipped. Each term is an
    /// optional operator followed by a version literal, which may end in a wildcard
    /// component if no operator is given.
    pub fn parse(expression: &str) -> Result<Self, VersionParserError> {
        let parser = VersionParser::new();

        let terms = expression
            .split_whitespace()
            .filter(|token| *token != "*")
            .map(|token| PredicateTerm::parse(&parser, token))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VersionPredicate { terms })
    }

    pub fn terms(&self) -> &[PredicateTerm] {
        &self.terms
    }

    /// True for the predicate without any term
    pub fn is_any(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check whether `version` satisfies every term
    pub fn test(&self, version: &Version) -> bool {
        self.terms.iter().all(|term| term.test(version))
    }

    /// The interval accepted by all terms, `None` if they have no version in common.
    pub fn interval(&self) -> Option<VersionInterval> {
        let mut terms = self.terms.iter();

        let Some(first) = terms.next() else {
            return Some(VersionInterval::INFINITE);
        };

        terms.try_fold(first.interval(), |acc, term| acc.and(&term.interval()))
    }
}

impl fmt::Display for VersionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("*");
        }

        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl FromStr for VersionPredicate {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionPredicate::parse(s)
    }
}

#[cfg(feature = "serde")]
serialize_to_string!(VersionPredicate);
#[cfg(feature = "serde")]
deserialize_from_str!(VersionPredicate, "version range expression");
