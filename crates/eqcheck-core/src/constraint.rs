//! Constraint pairs and the line format they are read from.
//!
//! An equality file holds one `LEFT=RIGHT` per line and an inequality file
//! one `LEFT!=RIGHT` per line. Operands are trimmed; blank lines and lines
//! starting with `#` are skipped. Line numbers are 1-based.
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Relation
// ---------------------------------------------------------------------------

/// The relation a constraint asserts between its two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `LEFT=RIGHT`
    Equal,
    /// `LEFT!=RIGHT`
    NotEqual,
}

impl Relation {
    /// Returns the operator separating the operands.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
        }
    }
}

// ---------------------------------------------------------------------------
// Constraint
// ---------------------------------------------------------------------------

/// A pair of names asserted equal or unequal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    /// Left operand.
    pub left: String,
    /// Right operand.
    pub right: String,
    /// Source line, when the pair was parsed from text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Constraint {
    /// Creates a constraint with no source line.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            line: None,
        }
    }
}

impl From<(&str, &str)> for Constraint {
    fn from((left, right): (&str, &str)) -> Self {
        Self::new(left, right)
    }
}

// ---------------------------------------------------------------------------
// ConstraintParseError
// ---------------------------------------------------------------------------

/// Why a line could not be read as a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line does not contain the expected operator.
    MissingOperator,
    /// One side of the operator is empty after trimming.
    EmptyOperand,
    /// The operator (or `=`) appears more than once.
    ExtraOperator,
    /// The line uses the other relation's operator.
    WrongOperator,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingOperator => "missing operator",
            Self::EmptyOperand => "empty operand",
            Self::ExtraOperator => "more than two operands",
            Self::WrongOperator => "wrong operator for this file",
        })
    }
}

/// A malformed line in a constraint file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintParseError {
    /// 1-based line number.
    pub line: usize,
    /// What is wrong with the line.
    pub kind: ParseErrorKind,
    /// The expected operator.
    pub relation: Relation,
}

impl fmt::Display for ConstraintParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} (expected `LEFT{}RIGHT`)",
            self.line,
            self.kind,
            self.relation.symbol()
        )
    }
}

impl std::error::Error for ConstraintParseError {}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses every constraint line of `input`.
///
/// # Errors
///
/// Returns [`ConstraintParseError`] for the first malformed line.
pub fn parse_constraints(
    input: &str,
    relation: Relation,
) -> Result<Vec<Constraint>, ConstraintParseError> {
    let mut constraints = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let line = idx + 1;
        let (left, right) = split_operands(text, relation).map_err(|kind| ConstraintParseError {
            line,
            kind,
            relation,
        })?;
        constraints.push(Constraint {
            left: left.to_owned(),
            right: right.to_owned(),
            line: Some(line),
        });
    }
    Ok(constraints)
}

fn split_operands(text: &str, relation: Relation) -> Result<(&str, &str), ParseErrorKind> {
    let (left, right) = match relation {
        Relation::Equal => {
            if text.contains("!=") {
                return Err(ParseErrorKind::WrongOperator);
            }
            text.split_once('=').ok_or(ParseErrorKind::MissingOperator)?
        }
        Relation::NotEqual => match text.split_once("!=") {
            Some(pair) => pair,
            None if text.contains('=') => return Err(ParseErrorKind::WrongOperator),
            None => return Err(ParseErrorKind::MissingOperator),
        },
    };

    if left.contains('=') || right.contains('=') {
        return Err(ParseErrorKind::ExtraOperator);
    }

    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return Err(ParseErrorKind::EmptyOperand);
    }
    Ok((left, right))
}
