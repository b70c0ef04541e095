//! Versification reference CLI.

use clap::Parser;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_books, run_convert, run_describe};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    v11n_cli::logging::init(cli.verbosity.tracing_level_filter());

    let result = match &cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Describe(args) => run_describe(args),
        Command::Books(args) => run_books(args),
    };

    let exit_code = match result {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
