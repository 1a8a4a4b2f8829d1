//! Structured versions: a superset of the semver.org notation

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::version_parser::VersionParserError;

lazy_static! {
    // An empty prerelease is accepted and sorts below every other prerelease.
    static ref DOT_SEPARATED_ID: Regex = Regex::new(r"^(?:|[-0-9A-Za-z]+(?:\.[-0-9A-Za-z]+)*)$").unwrap();
    static ref UNSIGNED_INTEGER: Regex = Regex::new(r"^(?:0|[1-9][0-9]*)$").unwrap();
}

/// A single component of a version core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// A concrete numeric component
    Fixed(u32),
    /// `x`, `X` or `*` in a range literal
    Wildcard,
}

impl Component {
    /// The numeric value, or `None` for a wildcard
    pub fn value(self) -> Option<u32> {
        match self {
            Component::Fixed(n) => Some(n),
            Component::Wildcard => None,
        }
    }

    pub fn is_wildcard(self) -> bool {
        matches!(self, Component::Wildcard)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Fixed(n) => write!(f, "{}", n),
            Component::Wildcard => f.write_str("x"),
        }
    }
}

/// A structured version.
///
/// This is a superset of the format described at [semver.org](https://semver.org) which
/// additionally allows
///  * an arbitrary number of version core components, but at least one
///  * `x`, `X` or `*` as the last core component when parsed as a range literal
///  * arbitrary build metadata
///
/// Equality is structural (build metadata included, missing trailing components equal
/// zero). Ordering ignores build metadata and treats wildcard components as equal to
/// anything, so [`SemanticVersion::compare_to`] may report `Equal` for versions that
/// are not `==`. `partial_cmp` returns `None` for such pairs.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    components: Vec<Component>,
    prerelease: Option<String>,
    build: Option<String>,
    friendly: String,
}

impl SemanticVersion {
    /// Create a version from concrete components.
    pub fn new(
        components: Vec<u32>,
        prerelease: Option<String>,
        build: Option<String>,
    ) -> Result<Self, VersionParserError> {
        if components.is_empty() {
            return Err(VersionParserError::NoComponents);
        }

        Ok(Self::assemble(
            components.into_iter().map(Component::Fixed).collect(),
            prerelease,
            build,
        ))
    }

    /// Parse a version, optionally accepting a trailing wildcard component.
    pub fn parse(version: &str, allow_wildcard: bool) -> Result<Self, VersionParserError> {
        if version.is_empty() {
            return Err(VersionParserError::Empty);
        }

        let (rest, build) = match version.split_once('+') {
            Some((rest, build)) => (rest, Some(build.to_string())),
            None => (version, None),
        };

        let (core, prerelease) = match rest.split_once('-') {
            Some((core, prerelease)) => (core, Some(prerelease.to_string())),
            None => (rest, None),
        };

        if let Some(prerelease) = &prerelease {
            if !DOT_SEPARATED_ID.is_match(prerelease) {
                return Err(VersionParserError::InvalidPrerelease(prerelease.clone()));
            }
        }

        if core.ends_with('.') {
            return Err(VersionParserError::TrailingSeparator(version.to_string()));
        } else if core.starts_with('.') || core.is_empty() {
            return Err(VersionParserError::MissingComponent(version.to_string()));
        }

        let mut components = Vec::new();
        let mut first_wildcard: Option<usize> = None;

        for (i, token) in core.split('.').enumerate() {
            if allow_wildcard {
                if matches!(token, "x" | "X" | "*") {
                    if prerelease.is_some() {
                        return Err(VersionParserError::WildcardWithPrerelease(version.to_string()));
                    }

                    components.push(Component::Wildcard);
                    first_wildcard.get_or_insert(i);
                    continue;
                } else if first_wildcard.is_some() {
                    return Err(VersionParserError::InterjacentWildcard(version.to_string()));
                }
            }

            if token.trim().is_empty() {
                return Err(VersionParserError::MissingComponent(version.to_string()));
            }

            if !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionParserError::InvalidComponent(token.to_string()));
            }

            let value = token
                .parse::<u32>()
                .map_err(|_| VersionParserError::ComponentOverflow(token.to_string()))?;
            components.push(Component::Fixed(value));
        }

        // 1.x.x -> 1.x
        if let Some(first) = first_wildcard {
            components.truncate(first + 1);
        }

        if components == [Component::Wildcard] {
            return Err(VersionParserError::BareWildcard(version.to_string()));
        }

        Ok(Self::assemble(components, prerelease, build))
    }

    fn assemble(components: Vec<Component>, prerelease: Option<String>, build: Option<String>) -> Self {
        let mut friendly = components
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");

        if let Some(prerelease) = &prerelease {
            friendly.push('-');
            friendly.push_str(prerelease);
        }

        if let Some(build) = &build {
            friendly.push('+');
            friendly.push_str(build);
        }

        SemanticVersion {
            components,
            prerelease,
            build,
            friendly,
        }
    }

    /// Number of components as written, `1.3.x` has 3
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Component at `pos`.
    ///
    /// Past the written components this repeats the wildcard if the version ends
    /// with one, otherwise it is `0`.
    pub fn component(&self, pos: usize) -> Component {
        match self.components.get(pos) {
            Some(component) => *component,
            None => match self.components.last() {
                Some(Component::Wildcard) => Component::Wildcard,
                _ => Component::Fixed(0),
            },
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    pub fn has_wildcard(&self) -> bool {
        self.components.iter().any(|c| c.is_wildcard())
    }

    /// Canonical rendering, e.g. `1.2.x` or `1.0.0-beta.2+build.7`
    pub fn friendly_string(&self) -> &str {
        &self.friendly
    }

    /// Total ordering of the version notation.
    ///
    /// Components are compared numerically, wildcards match any component. A release
    /// ranks above every prerelease of the same core unless the other side carries a
    /// wildcard. Prerelease identifiers compare numeric (by length, then digits) below
    /// alphanumeric (lexically); a shorter identifier list ranks lower.
    pub fn compare_to(&self, other: &SemanticVersion) -> Ordering {
        let count = self.component_count().max(other.component_count());

        for i in 0..count {
            match (self.component(i), other.component(i)) {
                (Component::Fixed(a), Component::Fixed(b)) => match a.cmp(&b) {
                    Ordering::Equal => continue,
                    ordering => return ordering,
                },
                _ => continue,
            }
        }

        match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (Some(_), None) if other.has_wildcard() => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) if self.has_wildcard() => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => compare_prerelease(a, b),
        }
    }

    fn equals_components(&self, other: &SemanticVersion) -> bool {
        let count = self.component_count().max(other.component_count());
        (0..count).all(|i| self.component(i) == other.component(i))
    }
}

fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut a_ids = a.split('.').filter(|id| !id.is_empty());
    let mut b_ids = b.split('.').filter(|id| !id.is_empty());

    loop {
        let (a_id, b_id) = match (a_ids.next(), b_ids.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a_id), Some(b_id)) => (a_id, b_id),
        };

        let ordering = match (UNSIGNED_INTEGER.is_match(a_id), UNSIGNED_INTEGER.is_match(b_id)) {
            (true, true) => a_id.len().cmp(&b_id.len()).then_with(|| a_id.cmp(b_id)),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a_id.cmp(b_id),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.equals_components(other) && self.prerelease == other.prerelease && self.build == other.build
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // trailing zeros are insignificant for equality
        let significant = self
            .components
            .iter()
            .rposition(|c| *c != Component::Fixed(0))
            .map_or(0, |last| last + 1);
        self.components[..significant].hash(state);
        self.prerelease.hash(state);
        self.build.hash(state);
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.compare_to(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.friendly)
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticVersion::parse(s, false)
    }
}

#[cfg(feature = "serde")]
serialize_to_string!(SemanticVersion);
#[cfg(feature = "serde")]
deserialize_from_str!(SemanticVersion, "semantic version");
