//! Command line parsing and [`Action::Collect`][ac] construction.
//!
//! [ac]: crate::cli::Action::Collect

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};

/// Description of an existing `UEFIExtract` dump and where to place its ACPI tables.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CollectConfiguration {
    /// The dump directory produced by `UEFIExtract`.
    pub dump_dir: PathBuf,
    /// The directory into which the ACPI tables are copied.
    pub output_dir: PathBuf,
}

/// Parses the arguments of the `collect` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "collect subcommand guarantees that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> CollectConfiguration {
    let dump_dir = matches
        .get_one::<PathBuf>("dump-dir")
        .cloned()
        .expect("dump-dir is required");

    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .expect("output-dir has a default value");

    CollectConfiguration {
        dump_dir,
        output_dir,
    }
}

/// Returns the command parser for an [`Action::Collect`][ac].
///
/// [ac]: crate::cli::Action::Collect
pub fn subcommand_parser() -> Command {
    let dump_dir = Arg::new("dump-dir")
        .value_name("DUMP_DIR")
        .help("Directory previously produced by UEFIExtract")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true);

    let output_dir = Arg::new("output-dir")
        .value_name("OUTPUT_DIR")
        .help("Directory that receives the ACPI tables")
        .value_parser(clap::value_parser!(PathBuf))
        .default_value("output");

    Command::new("collect")
        .about("Save the ACPI tables of an already unpacked firmware image")
        .arg(dump_dir)
        .arg(output_dir)
}
