//! Command line parsing and [`Action::Extract`][ae] construction.
//!
//! [ae]: crate::cli::Action::Extract

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Description of which firmware image to unpack and where to place its ACPI tables.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ExtractConfiguration {
    /// The firmware image to unpack.
    pub image: PathBuf,
    /// The directory into which the ACPI tables are copied.
    pub output_dir: PathBuf,
    /// Explicit location of the `UEFIExtract` executable.
    pub uefi_extract: Option<PathBuf>,
    /// Whether the dump directory should be deleted after the tables are collected.
    pub remove_dump: bool,
}

/// Parses the arguments of the `extract` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "extract subcommand guarantees that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> ExtractConfiguration {
    let image = matches
        .get_one::<PathBuf>("image")
        .cloned()
        .expect("image is required");

    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .expect("output-dir has a default value");

    ExtractConfiguration {
        image,
        output_dir,
        uefi_extract: matches.get_one::<PathBuf>("uefi-extract").cloned(),
        remove_dump: matches.get_flag("remove-dump"),
    }
}

/// Returns the command parser for an [`Action::Extract`][ae].
///
/// [ae]: crate::cli::Action::Extract
pub fn subcommand_parser() -> Command {
    let image = Arg::new("image")
        .value_name("IMAGE")
        .help("Firmware image to unpack")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true);

    let output_dir = Arg::new("output-dir")
        .value_name("OUTPUT_DIR")
        .help("Directory that receives the ACPI tables")
        .value_parser(clap::value_parser!(PathBuf))
        .default_value("output");

    let uefi_extract = Arg::new("uefi-extract")
        .long("uefi-extract")
        .value_name("PATH")
        .help("Location of the UEFIExtract executable")
        .value_parser(clap::value_parser!(PathBuf));

    let remove_dump = Arg::new("remove-dump")
        .long("remove-dump")
        .help("Delete the UEFIExtract dump directory afterwards")
        .action(ArgAction::SetTrue);

    Command::new("extract")
        .about("Unpack a firmware image and save its ACPI tables as .aml files")
        .arg(image)
        .arg(output_dir)
        .arg(uefi_extract)
        .arg(remove_dump)
}
