//! Version predicates and version interval algebra for mod dependency resolution
//!
//! This crate parses mod versions (semantic versions with any number of components,
//! falling back to opaque strings), range expressions such as `>=1.2 <2`, `~1.4.0` or
//! `1.2.x`, and turns them into canonical sets of version intervals that a resolver
//! can intersect, union and complement.

#[cfg(feature = "serde")]
macro_rules! serialize_to_string {
    ($ty: ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(&std::string::ToString::to_string(self))
            }
        }
    };
}

#[cfg(feature = "serde")]
macro_rules! deserialize_from_str {
    ($ty: ty, $name: literal) => {
        impl<'de> ::serde::de::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::de::Deserializer<'de>,
            {
                struct Visitor;
                impl<'de> ::serde::de::Visitor<'de> for Visitor {
                    type Value = $ty;

                    fn expecting(&self, formatter: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                        formatter.write_str($name)
                    }

                    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                    where
                        E: ::serde::de::Error,
                    {
                        std::str::FromStr::from_str(v).map_err(E::custom)
                    }
                }
                deserializer.deserialize_str(Visitor)
            }
        }
    };
}

pub mod constraint;
mod dependency;
pub mod version;
mod version_parser;

pub use constraint::{Bound, Operator, PredicateTerm, VersionInterval, VersionPredicate, VersionRequirement};
pub use dependency::{Dependency, DependencyKind, UnknownDependencyKind};
pub use version::{Component, OpaqueVersion, SemanticVersion, Version};
pub use version_parser::{VersionParser, VersionParserError};
