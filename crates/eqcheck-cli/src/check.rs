//! Implementation of `eqcheck <EQUALITIES> <INEQUALITIES>`.
//!
//! Parses both constraint files, runs the checker, and writes the verdict to
//! stdout. In human mode each violation is explained on stderr.
//!
//! Exit codes:
//! - 0 = a verdict was produced (`valid` or `invalid`)
//! - 1 = validity could not be determined (unknown element)
//! - 2 = an input file could not be read or parsed
use std::io::Write;

use eqcheck_core::{CheckConfig, Constraint, Relation, Verdict, check, parse_constraints};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Options for [`run`] taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Output format for the verdict.
    pub format: OutputFormat,
    /// Stop at the first contradicted inequality.
    pub fail_fast: bool,
    /// Suppress violation details on stderr.
    pub quiet: bool,
}

/// A constraint file's contents with the label used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct Input<'a> {
    /// `"-"` for stdin, or the filesystem path.
    pub label: &'a str,
    /// The file's text.
    pub content: &'a str,
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the check.
///
/// # Errors
///
/// - [`CliError::MalformedConstraint`]: a line in either input is not a pair.
/// - [`CliError::Undetermined`]: an inequality names an unknown element.
/// - [`CliError::Write`]: stdout or stderr could not be written.
pub fn run(
    equalities: Input<'_>,
    inequalities: Input<'_>,
    options: &CheckOptions,
) -> Result<(), CliError> {
    let eqs = parse(equalities, Relation::Equal)?;
    let neqs = parse(inequalities, Relation::NotEqual)?;

    let config = CheckConfig {
        fail_fast: options.fail_fast,
    };
    let verdict = check(&eqs, &neqs, &config)
        .map_err(|e| CliError::Undetermined { name: e.name })?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    write_verdict(&mut stdout.lock(), &mut stderr.lock(), &verdict, options)
}

fn parse(input: Input<'_>, relation: Relation) -> Result<Vec<Constraint>, CliError> {
    parse_constraints(input.content, relation).map_err(|e| CliError::MalformedConstraint {
        source: input.label.to_owned(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes `verdict` to `out` and, in human mode, violation details to `err`.
///
/// # Errors
///
/// Returns [`CliError::Write`] if either writer fails.
pub fn write_verdict<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    verdict: &Verdict,
    options: &CheckOptions,
) -> Result<(), CliError> {
    match options.format {
        OutputFormat::Human => {
            writeln!(out, "{}", verdict.as_str()).map_err(|e| sink_error("stdout", &e))?;
            if options.quiet {
                return Ok(());
            }
            for v in &verdict.violations {
                let line = v.line.map(|n| format!(" (line {n})")).unwrap_or_default();
                writeln!(
                    err,
                    "violation: {} != {}{line}, both are in the class of {}",
                    v.left, v.right, v.representative
                )
                .map_err(|e| sink_error("stderr", &e))?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string(verdict).map_err(|e| CliError::Write {
                sink: "stdout",
                detail: e.to_string(),
            })?;
            writeln!(out, "{json}").map_err(|e| sink_error("stdout", &e))?;
        }
    }
    Ok(())
}

fn sink_error(sink: &'static str, e: &std::io::Error) -> CliError {
    CliError::Write {
        sink,
        detail: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    const EQUALITIES: &str = "A=B\nB=D\nC=D\nF=G\nE=H\nH=C\n";

    fn human() -> CheckOptions {
        CheckOptions {
            format: OutputFormat::Human,
            fail_fast: false,
            quiet: false,
        }
    }

    fn verdict_for(eqs: &str, neqs: &str) -> Verdict {
        let eqs = parse_constraints(eqs, Relation::Equal).expect("equalities");
        let neqs = parse_constraints(neqs, Relation::NotEqual).expect("inequalities");
        check(&eqs, &neqs, &CheckConfig::default()).expect("all names known")
    }

    fn render(verdict: &Verdict, options: &CheckOptions) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_verdict(&mut out, &mut err, verdict, options).expect("write to Vec");
        (
            String::from_utf8(out).expect("utf8 stdout"),
            String::from_utf8(err).expect("utf8 stderr"),
        )
    }

    #[test]
    fn human_invalid_prints_word_and_violation() {
        let verdict = verdict_for(EQUALITIES, "A!=C\n");
        let (out, err) = render(&verdict, &human());
        assert_eq!(out, "invalid\n");
        assert!(err.contains("violation: A != C (line 1)"), "stderr: {err}");
    }

    #[test]
    fn human_valid_prints_only_word() {
        let verdict = verdict_for("A=B\nC=D\n", "A!=C\n");
        let (out, err) = render(&verdict, &human());
        assert_eq!(out, "valid\n");
        assert!(err.is_empty(), "stderr: {err}");
    }

    #[test]
    fn quiet_suppresses_violation_details() {
        let verdict = verdict_for(EQUALITIES, "A!=C\n");
        let options = CheckOptions {
            quiet: true,
            ..human()
        };
        let (out, err) = render(&verdict, &options);
        assert_eq!(out, "invalid\n");
        assert!(err.is_empty(), "stderr: {err}");
    }

    #[test]
    fn json_output_is_single_object() {
        let verdict = verdict_for(EQUALITIES, "A!=C\nF!=A\n");
        let options = CheckOptions {
            format: OutputFormat::Json,
            ..human()
        };
        let (out, err) = render(&verdict, &options);
        assert!(err.is_empty());
        let value: serde_json::Value = serde_json::from_str(out.trim()).expect("json");
        assert_eq!(value["valid"], false);
        assert_eq!(value["classes"], 2);
        assert_eq!(
            value["violations"]
                .as_array()
                .expect("violations array")
                .len(),
            1
        );
    }

    #[test]
    fn malformed_equality_is_reported_with_label() {
        let err = run(
            Input {
                label: "eq.txt",
                content: "A=B\nnope\n",
            },
            Input {
                label: "neq.txt",
                content: "",
            },
            &human(),
        )
        .expect_err("line 2 is malformed");
        match err {
            CliError::MalformedConstraint { source, detail } => {
                assert_eq!(source, "eq.txt");
                assert!(detail.contains("line 2"), "detail: {detail}");
            }
            other => panic!("expected MalformedConstraint, got {other:?}"),
        }
    }

    #[test]
    fn unknown_element_is_undetermined() {
        let err = run(
            Input {
                label: "eq.txt",
                content: "A=B\n",
            },
            Input {
                label: "neq.txt",
                content: "A!=C\n",
            },
            &human(),
        )
        .expect_err("C is unknown");
        match err {
            CliError::Undetermined { name } => assert_eq!(name, "C"),
            other => panic!("expected Undetermined, got {other:?}"),
        }
    }
}
