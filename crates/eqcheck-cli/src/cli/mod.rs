//! Clap CLI definition: root struct and shared argument types.
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in error messages: `"-"` for stdin, otherwise the path.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for the verdict.
///
/// `Human` prints `valid` or `invalid` on stdout and explains violations on
/// stderr. `Json` prints a single JSON object on stdout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Plain verdict word (default).
    Human,
    /// Structured JSON object.
    Json,
}

/// Root CLI struct for the `eqcheck` binary.
#[derive(Parser)]
#[command(
    name = "eqcheck",
    version,
    about = "Check equality and inequality constraints for consistency",
    long_about = "Reads a file of LEFT=RIGHT equalities and a file of LEFT!=RIGHT\n\
                  inequalities, and prints `valid` if no inequality contradicts\n\
                  the equalities, `invalid` otherwise."
)]
pub struct Cli {
    /// Equality constraints, one `LEFT=RIGHT` per line, or `-` for stdin.
    #[arg(value_name = "EQUALITIES")]
    pub equalities: PathOrStdin,

    /// Inequality constraints, one `LEFT!=RIGHT` per line, or `-` for stdin.
    #[arg(value_name = "INEQUALITIES")]
    pub inequalities: PathOrStdin,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human")]
    pub format: OutputFormat,

    /// Stop at the first contradicted inequality.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity on stderr; repeat for more detail
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `EQCHECK_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(long, env = "EQCHECK_MAX_FILE_SIZE", default_value = "268435456")]
    pub max_file_size: u64,
}
