//! Helper for printing the header of a single ACPI table.

use std::{fmt, path::Path};

use acpi_table::AcpiTableHeader;
use anyhow::{Context, Result};

use crate::{
    action::{collect::TABLE_EXTENSION, read_prefix},
    cli::header::HeaderConfiguration,
    naming,
};

/// Prints the header of the table described by `config` and the name it would be saved under.
///
/// # Errors
///
/// Returns an error if the table cannot be read.
pub fn header(config: HeaderConfiguration) -> Result<()> {
    let bytes = read_prefix(&config.path, AcpiTableHeader::SIZE)
        .with_context(|| format!("error reading '{}'", config.path.display()))?;

    print!("{}", HeaderReport::new(&config.path, &bytes));
    Ok(())
}

/// Human readable report of a table's header and the name it would be saved under.
pub struct HeaderReport<'a> {
    /// The file the table was read from.
    path: &'a Path,
    /// The first bytes of the table.
    bytes: &'a [u8],
}

impl<'a> HeaderReport<'a> {
    /// Creates a [`HeaderReport`] for the table at `path` whose first bytes are `bytes`.
    pub fn new(path: &'a Path, bytes: &'a [u8]) -> Self {
        Self { path, bytes }
    }
}

impl fmt::Display for HeaderReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.path.display())?;

        match AcpiTableHeader::new(self.bytes) {
            Ok(header) => {
                writeln!(f, "  Signature:        {}", header.signature())?;
                writeln!(f, "  Length:           {}", header.length())?;
                writeln!(f, "  Revision:         {}", header.revision())?;
                writeln!(f, "  Checksum:         {:#04x}", header.checksum())?;
                writeln!(
                    f,
                    "  OEM ID:           {:?}",
                    naming::decode_field(&header.oem_id())
                )?;
                writeln!(
                    f,
                    "  OEM Table ID:     {:?}",
                    naming::decode_field(&header.oem_table_id())
                )?;
                writeln!(f, "  OEM Revision:     {:#010x}", header.oem_revision())?;
                writeln!(
                    f,
                    "  Creator ID:       {:?}",
                    naming::decode_field(&header.creator_id())
                )?;
                writeln!(f, "  Creator Revision: {:#010x}", header.creator_revision())?;
            }
            Err(error) => writeln!(f, "  {error}")?,
        }

        match naming::table_stem(self.bytes) {
            Some(stem) => writeln!(f, "  Saved as:         {stem}.{TABLE_EXTENSION}"),
            None => writeln!(f, "  Saved as:         (skipped, fewer than 4 bytes)"),
        }
    }
}
