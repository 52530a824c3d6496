//! Errors of the `eqcheck` binary and their exit codes.
//!
//! A produced verdict exits 0 whether it is `valid` or `invalid`. Anything
//! that stops a verdict from being produced is a [`CliError`]:
//!
//! - **2** when an input could not be read or parsed, or output could not be
//!   written. No verdict was attempted.
//! - **1** when both inputs were fine but an inequality names an element no
//!   equality mentions, so validity is undetermined.
use std::fmt;

/// Why a constraint input could not be turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadFailure {
    NotFound,
    PermissionDenied,
    /// Larger than `--max-file-size`. `actual` is unknown for stdin.
    TooLarge { limit: u64, actual: Option<u64> },
    /// Offset of the first byte that is not valid UTF-8.
    InvalidUtf8 { byte_offset: usize },
    Other(String),
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("file not found"),
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::TooLarge {
                limit,
                actual: Some(actual),
            } => write!(f, "file too large ({actual} bytes, limit {limit})"),
            Self::TooLarge {
                limit,
                actual: None,
            } => write!(f, "file too large (more than {limit} bytes)"),
            Self::InvalidUtf8 { byte_offset } => {
                write!(f, "not UTF-8 (first bad byte at offset {byte_offset})")
            }
            Self::Other(detail) => f.write_str(detail),
        }
    }
}

/// All error conditions that the `eqcheck` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    /// An input file or stdin could not be read.
    Read {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        failure: ReadFailure,
    },

    /// Both constraint inputs were given as `-`.
    StdinUsedTwice,

    /// A line of a constraint input is not a well-formed pair.
    MalformedConstraint {
        source: String,
        /// The parser's description, including the line number.
        detail: String,
    },

    /// The verdict could not be written to `sink`.
    Write { sink: &'static str, detail: String },

    /// An inequality names an element that never appeared in an equality.
    Undetermined { name: String },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Read { .. }
            | Self::StdinUsedTwice
            | Self::MalformedConstraint { .. }
            | Self::Write { .. } => 2,
            Self::Undetermined { .. } => 1,
        }
    }

    /// Returns the line printed to stderr before exiting.
    pub fn message(&self) -> String {
        match self {
            Self::Read { source, failure } => format!("error: cannot read {source}: {failure}"),
            Self::StdinUsedTwice => {
                "error: stdin (`-`) can be used for only one of the two inputs".to_owned()
            }
            Self::MalformedConstraint { source, detail } => {
                format!("error: malformed constraint in {source}: {detail}")
            }
            Self::Write { sink, detail } => format!("error: cannot write to {sink}: {detail}"),
            Self::Undetermined { name } => format!(
                "error: could not determine validity: element `{name}` is not mentioned by any equality"
            ),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}
