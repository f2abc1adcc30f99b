//! Command line parsing and [`Action::Header`][ah] construction.
//!
//! [ah]: crate::cli::Action::Header

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};

/// Description of which ACPI table to inspect.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct HeaderConfiguration {
    /// The file containing the ACPI table.
    pub path: PathBuf,
}

/// Parses the arguments of the `header` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "header subcommand guarantees that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> HeaderConfiguration {
    let path = matches
        .get_one::<PathBuf>("file")
        .cloned()
        .expect("file is required");

    HeaderConfiguration { path }
}

/// Returns the command parser for an [`Action::Header`][ah].
///
/// [ah]: crate::cli::Action::Header
pub fn subcommand_parser() -> Command {
    let file = Arg::new("file")
        .value_name("FILE")
        .help("ACPI table blob, such as a body.bin or .aml file")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true);

    Command::new("header")
        .about("Print the header of an ACPI table and the name it would be saved under")
        .arg(file)
}
