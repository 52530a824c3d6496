mod check;
mod cli;
mod error;
mod io;
mod logging;

use clap::Parser;

use crate::check::{CheckOptions, Input};
use crate::cli::{Cli, PathOrStdin};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::install_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if matches!(
        (&cli.equalities, &cli.inequalities),
        (PathOrStdin::Stdin, PathOrStdin::Stdin)
    ) {
        return Err(CliError::StdinUsedTwice);
    }

    let eq_label = cli.equalities.label();
    let neq_label = cli.inequalities.label();
    let eq_content = io::read_input(&cli.equalities, cli.max_file_size)?;
    let neq_content = io::read_input(&cli.inequalities, cli.max_file_size)?;

    let options = CheckOptions {
        format: cli.format,
        fail_fast: cli.fail_fast,
        quiet: cli.quiet,
    };
    check::run(
        Input {
            label: &eq_label,
            content: &eq_content,
        },
        Input {
            label: &neq_label,
            content: &neq_content,
        },
        &options,
    )
}
