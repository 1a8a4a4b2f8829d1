//! Version ranges: operators, intervals and the predicates built from them

mod bound;
mod interval;
mod operator;
mod predicate;
mod requirement;

pub use bound::Bound;
pub use interval::VersionInterval;
pub use operator::Operator;
pub use predicate::{PredicateTerm, VersionPredicate};
pub use requirement::VersionRequirement;
