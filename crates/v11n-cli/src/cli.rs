//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "v11n",
    version,
    about = "Versification reference tool - convert references between numbering schemes",
    long_about = "Convert scripture references between versification schemes.\n\n\
                  Conversions compose through the canonical pivot scheme; supply a\n\
                  directory of <scheme>.properties mapping-rule files for schemes\n\
                  that do not number verses the way the pivot does."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a reference from one scheme to another.
    Convert(ConvertArgs),

    /// Show chapter and verse statistics for a scheme.
    Describe(SchemeArgs),

    /// List the books of a scheme in order.
    Books(SchemeArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// The reference to convert: Book.Chapter.Verse, or a range.
    #[arg(value_name = "REF")]
    pub reference: String,

    /// Scheme the reference is expressed in.
    #[arg(long = "from", value_name = "SCHEME")]
    pub from: String,

    /// Scheme to convert into.
    #[arg(long = "to", value_name = "SCHEME")]
    pub to: String,

    /// Directory containing <scheme>.properties mapping-rule files.
    #[arg(long = "mappings", value_name = "DIR")]
    pub mappings: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemeArgs {
    /// Scheme to inspect.
    #[arg(long = "scheme", value_name = "SCHEME", default_value = v11n_systems::PIVOT_NAME)]
    pub scheme: String,
}
