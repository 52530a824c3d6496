#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod check;
pub mod constraint;
pub mod disjoint_set;

pub use check::{CheckConfig, Verdict, Violation, build_classes, check, evaluate};
pub use constraint::{
    Constraint, ConstraintParseError, ParseErrorKind, Relation, parse_constraints,
};
pub use disjoint_set::{DisjointSet, ElementId, UnknownElementError};

/// Returns the current version of the eqcheck-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
