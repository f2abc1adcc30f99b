//! Command line parsing and [`Action`] construction.

pub mod collect;
pub mod extract;
pub mod header;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

use crate::{
    cli::{collect::CollectConfiguration, extract::ExtractConfiguration, header::HeaderConfiguration},
    logging,
};

/// Parses `acpi-extract`'s arguments to construct an [`Action`] and the
/// [`GlobalConfiguration`] it runs with.
pub fn get_action() -> (Action, GlobalConfiguration) {
    parse_matches(&command_parser().get_matches())
}

/// Constructs an [`Action`] and [`GlobalConfiguration`] from already parsed `matches`.
#[expect(
    clippy::missing_panics_doc,
    reason = "command parser guarantees that a subcommand is present"
)]
pub fn parse_matches(matches: &ArgMatches) -> (Action, GlobalConfiguration) {
    let global = GlobalConfiguration {
        level_filter: logging::level_filter(
            matches.get_count("verbose"),
            matches.get_flag("quiet"),
        ),
    };

    let (subcommand_name, subcommand_matches) =
        matches.subcommand().expect("subcommand is required");
    let action = match subcommand_name {
        "extract" => Action::Extract(extract::parse_arguments(subcommand_matches)),
        "collect" => Action::Collect(collect::parse_arguments(subcommand_matches)),
        "header" => Action::Header(header::parse_arguments(subcommand_matches)),
        _ => unreachable!("unexpected subcommand: {subcommand_name:?}"),
    };

    (action, global)
}

/// Returns the command parser for all [`Action`]s.
pub fn command_parser() -> Command {
    let verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Increase logging verbosity (repeat for more)")
        .action(ArgAction::Count)
        .global(true);

    let quiet = Arg::new("quiet")
        .short('q')
        .long("quiet")
        .help("Only report errors")
        .action(ArgAction::SetTrue)
        .conflicts_with("verbose")
        .global(true);

    Command::new("acpi-extract")
        .about("Extracts ACPI tables from firmware images using UEFIExtract")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose)
        .arg(quiet)
        .subcommand(extract::subcommand_parser())
        .subcommand(collect::subcommand_parser())
        .subcommand(header::subcommand_parser())
}

/// Settings shared by every [`Action`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GlobalConfiguration {
    /// The most verbose log level that should be emitted.
    pub level_filter: LevelFilter,
}

/// The action to carry out.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    /// Unpack a firmware image and collect its ACPI tables.
    Extract(ExtractConfiguration),
    /// Collect ACPI tables from an already unpacked firmware image.
    Collect(CollectConfiguration),
    /// Print the header of a single ACPI table.
    Header(HeaderConfiguration),
}
