//! Tool for unpacking firmware images with `UEFIExtract` and collecting the ACPI tables they
//! contain under names derived from the tables' headers.

use anyhow::Result;
use cli::Action;

pub mod action;
pub mod cli;
pub mod logging;
pub mod naming;

#[cfg(test)]
mod test_util;

/// The GUID of the firmware file in which platform firmware stores its ACPI tables.
pub const ACPI_TABLE_STORAGE_GUID: &str = "7E374E25-8E01-4FEE-87F2-390C23C606CD";

fn main() -> Result<()> {
    let (requested, global) = cli::get_action();
    logging::init(global.level_filter);

    match requested {
        Action::Extract(config) => {
            let summary = action::extract::extract(config)?;
            if let Some(dump_dir) = summary.dump_dir {
                log::debug!(
                    "UEFIExtract output for {} tables left in {}",
                    summary.table_count,
                    dump_dir.display()
                );
            }
        }
        Action::Collect(config) => {
            action::collect::collect(config)?;
        }
        Action::Header(config) => action::header::header(config)?,
    }

    Ok(())
}
