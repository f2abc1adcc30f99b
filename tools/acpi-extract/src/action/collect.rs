//! Helpers for locating ACPI tables in a `UEFIExtract` dump and saving them under header
//! derived names.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use acpi_table::AcpiTableHeader;
use anyhow::{Context, Result, bail};
use log::{debug, info, trace, warn};

use crate::{
    ACPI_TABLE_STORAGE_GUID, action::read_prefix, cli::collect::CollectConfiguration, naming,
};

/// Marker contained in the names of the section directories `UEFIExtract` creates.
pub const RAW_SECTION_MARKER: &str = "Raw section";

/// Name of the file holding a section's contents.
pub const BODY_FILE_NAME: &str = "body.bin";

/// Extension given to saved ACPI tables.
pub const TABLE_EXTENSION: &str = "aml";

/// Saves the ACPI tables found in an existing dump directory, returning the number of tables
/// written.
///
/// # Errors
///
/// Returns errors when the dump directory does not exist or [`scan_and_collect()`] fails.
pub fn collect(config: CollectConfiguration) -> Result<usize> {
    if !config.dump_dir.is_dir() {
        bail!(
            "dump directory '{}' not found",
            config.dump_dir.display()
        );
    }

    scan_and_collect(&config.dump_dir, &config.output_dir)
}

/// Searches `dump_dir` for ACPI table directories and saves their tables into `output_dir`.
///
/// # Errors
///
/// Returns errors when the dump directory cannot be walked or [`collect_tables()`] fails.
pub fn scan_and_collect(dump_dir: &Path, output_dir: &Path) -> Result<usize> {
    info!("Searching for ACPI tables...");
    let acpi_dirs = find_acpi_directories(dump_dir)
        .with_context(|| format!("error searching '{}'", dump_dir.display()))?;

    if acpi_dirs.is_empty() {
        info!("No ACPI tables with the target GUID found");
        return Ok(0);
    }

    let count = collect_tables(&acpi_dirs, output_dir)?;
    info!(
        "Extraction complete: {count} ACPI tables saved to '{}'",
        output_dir.display()
    );

    Ok(count)
}

/// Returns every directory below `root` whose name contains [`ACPI_TABLE_STORAGE_GUID`],
/// ignoring case.
///
/// The tree is walked top-down in name order: the matches among a directory's children are
/// reported before any of those children are descended into. Symbolic links are not followed.
/// Subdirectories that cannot be read are skipped.
///
/// # Errors
///
/// Returns an error if `root` cannot be read.
pub fn find_acpi_directories(root: &Path) -> io::Result<Vec<PathBuf>> {
    let guid = ACPI_TABLE_STORAGE_GUID.to_ascii_lowercase();

    let mut found = Vec::new();
    walk(root, &guid, &mut found)?;
    Ok(found)
}

/// Appends the directories below `dir` whose lowercased name contains `guid` to `found`.
fn walk(dir: &Path, guid: &str, found: &mut Vec<PathBuf>) -> io::Result<()> {
    let children = child_directories(dir)?;

    found.extend(
        children
            .iter()
            .filter(|child| file_name(child).to_ascii_lowercase().contains(guid))
            .cloned(),
    );

    for child in &children {
        walk_child(child, guid, found);
    }

    Ok(())
}

/// Walks the subdirectory `child`, skipping it with a warning if it cannot be read.
fn walk_child(child: &Path, guid: &str, found: &mut Vec<PathBuf>) {
    if let Err(error) = walk(child, guid, found) {
        warn!("Skipping unreadable directory {}: {error}", child.display());
    }
}

/// Returns the `Raw section` directories directly inside `dir`, ordered by their numeric
/// prefix.
///
/// Directories without a numeric prefix are placed last, ordered by name.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn section_directories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut sections = child_directories(dir)?
        .into_iter()
        .filter(|child| file_name(child).contains(RAW_SECTION_MARKER))
        .map(|child| (section_index(&child), child))
        .collect::<Vec<_>>();

    sections.sort_by(|(a_index, a), (b_index, b)| {
        (a_index.is_none(), a_index, a).cmp(&(b_index.is_none(), b_index, b))
    });

    Ok(sections.into_iter().map(|(_, path)| path).collect())
}

/// Returns the index `UEFIExtract` placed at the start of a section directory's name.
fn section_index(path: &Path) -> Option<u64> {
    file_name(path).split_whitespace().next()?.parse().ok()
}

/// Returns the first path in `output_dir` named `stem.aml`, `stem2.aml`, `stem3.aml`, ... that
/// does not exist yet.
pub fn unique_output_path(output_dir: &Path, stem: &str) -> PathBuf {
    let mut candidate = output_dir.join(format!("{stem}.{TABLE_EXTENSION}"));

    let mut counter = 2u64;
    while fs::symlink_metadata(&candidate).is_ok() {
        candidate = output_dir.join(format!("{stem}{counter}.{TABLE_EXTENSION}"));
        counter += 1;
    }

    candidate
}

/// Copies the `body.bin` of every section below `acpi_dirs` into `output_dir`, returning the
/// number of tables written.
///
/// Sections without a `body.bin`, and bodies too small to be named, are skipped.
///
/// # Errors
///
/// Returns errors when the output directory cannot be created, or a section cannot be read or
/// copied.
pub fn collect_tables(acpi_dirs: &[PathBuf], output_dir: &Path) -> Result<usize> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("error creating '{}'", output_dir.display()))?;

    let mut count = 0;
    for acpi_dir in acpi_dirs {
        debug!("Scanning {}", acpi_dir.display());

        let sections = section_directories(acpi_dir)
            .with_context(|| format!("error reading '{}'", acpi_dir.display()))?;
        for section in sections {
            let body = section.join(BODY_FILE_NAME);
            if !body.is_file() {
                trace!("No {BODY_FILE_NAME} in {}", section.display());
                continue;
            }

            let prefix = read_prefix(&body, AcpiTableHeader::SIZE)
                .with_context(|| format!("error reading '{}'", body.display()))?;
            let Some(stem) = naming::table_stem(&prefix) else {
                warn!("Skipping {}: too small to be an ACPI table", body.display());
                continue;
            };

            let destination = unique_output_path(output_dir, &stem);
            copy_table(&body, &destination).with_context(|| {
                format!(
                    "error copying '{}' to '{}'",
                    body.display(),
                    destination.display()
                )
            })?;

            info!("Extracted: {}", destination.display());
            count += 1;
        }
    }

    Ok(count)
}

/// Copies `source` to `destination`, carrying over its permissions and, where possible, its
/// modification time.
fn copy_table(source: &Path, destination: &Path) -> io::Result<()> {
    fs::copy(source, destination)?;

    if let Err(error) = preserve_modified(source, destination) {
        debug!(
            "Could not preserve modification time of {}: {error}",
            destination.display()
        );
    }

    Ok(())
}

/// Sets the modification time of `destination` to that of `source`.
fn preserve_modified(source: &Path, destination: &Path) -> io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    File::options()
        .write(true)
        .open(destination)?
        .set_modified(modified)
}

/// Returns the final component of `path` as text.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Returns the list of directories directly inside `dir`, sorted by path.
fn child_directories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut directories = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            directories.push(entry.path());
        }
    }

    directories.sort();
    Ok(directories)
}
