//! Satisfiability check for a set of equality and inequality constraints.
//!
//! Every equality is applied to a fresh [`DisjointSet`] before any inequality
//! is queried. Inequality operands are looked up, never created: naming an
//! element that no equality mentioned is an [`UnknownElementError`], not a
//! verdict.
use serde::Serialize;
use tracing::info;

use crate::constraint::Constraint;
use crate::disjoint_set::{DisjointSet, UnknownElementError};

/// Options for [`check`] and [`evaluate`].
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    /// Stop at the first violated inequality instead of collecting all.
    pub fail_fast: bool,
}

/// An inequality contradicted by the equalities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Left operand of the inequality.
    pub left: String,
    /// Right operand of the inequality.
    pub right: String,
    /// Source line of the inequality, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Name of the representative both operands resolve to.
    pub representative: String,
}

/// Outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// `true` when no inequality is contradicted.
    pub valid: bool,
    /// Number of distinct names seen in the equalities.
    pub elements: usize,
    /// Number of equivalence classes those names form.
    pub classes: usize,
    /// Contradicted inequalities, in input order.
    pub violations: Vec<Violation>,
}

impl Verdict {
    /// Returns `"valid"` or `"invalid"`.
    pub fn as_str(&self) -> &'static str {
        if self.valid { "valid" } else { "invalid" }
    }
}

/// Applies every equality to a new [`DisjointSet`] and returns it.
#[tracing::instrument(skip_all, fields(equalities = equalities.len()))]
pub fn build_classes(equalities: &[Constraint]) -> DisjointSet {
    let mut set = DisjointSet::with_capacity(equalities.len());
    for eq in equalities {
        let a = set.find_or_create(&eq.left);
        let b = set.find_or_create(&eq.right);
        set.union(a, b);
    }
    info!(
        elements = set.len(),
        classes = set.class_count(),
        "built equivalence classes"
    );
    set
}

/// Tests every inequality against the classes in `set`.
///
/// # Errors
///
/// Returns [`UnknownElementError`] as soon as an inequality names an element
/// that does not exist in `set`. No partial verdict is produced.
#[tracing::instrument(skip_all, fields(inequalities = inequalities.len()))]
pub fn evaluate(
    set: &DisjointSet,
    inequalities: &[Constraint],
    config: &CheckConfig,
) -> Result<Verdict, UnknownElementError> {
    let mut violations = Vec::new();

    for neq in inequalities {
        let a = set.require(&neq.left)?;
        let b = set.require(&neq.right)?;
        let root = set.find_representative(a);
        if root != set.find_representative(b) {
            continue;
        }

        info!(
            left = %neq.left,
            right = %neq.right,
            line = neq.line,
            representative = set.name(root),
            "inequality contradicts equalities"
        );
        violations.push(Violation {
            left: neq.left.clone(),
            right: neq.right.clone(),
            line: neq.line,
            representative: set.name(root).to_owned(),
        });
        if config.fail_fast {
            break;
        }
    }

    info!(violations = violations.len(), "evaluated inequalities");

    Ok(Verdict {
        valid: violations.is_empty(),
        elements: set.len(),
        classes: set.class_count(),
        violations,
    })
}

/// Decides whether `equalities` and `inequalities` can hold together.
///
/// # Errors
///
/// Returns [`UnknownElementError`] if an inequality names an element that no
/// equality mentions.
pub fn check(
    equalities: &[Constraint],
    inequalities: &[Constraint],
    config: &CheckConfig,
) -> Result<Verdict, UnknownElementError> {
    let set = build_classes(equalities);
    evaluate(&set, inequalities, config)
}
