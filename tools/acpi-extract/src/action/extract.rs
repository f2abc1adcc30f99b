//! Helpers for unpacking a firmware image with `UEFIExtract` and collecting its ACPI tables.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};

use crate::{
    ACPI_TABLE_STORAGE_GUID,
    action::{collect::scan_and_collect, run_cmd},
    cli::extract::ExtractConfiguration,
};

/// File names under which `UEFIExtract` is searched for.
pub const UEFI_EXTRACT_NAMES: &[&str] = &["UEFIExtract", "UEFIExtract.exe"];

/// Name of the directory, next to the running executable, that may hold `UEFIExtract`.
pub const BUNDLED_TOOLS_DIR: &str = "bin";

/// Result of a successful [`extract()`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ExtractSummary {
    /// The dump directory `UEFIExtract` produced, unless it was removed afterwards.
    pub dump_dir: Option<PathBuf>,
    /// The number of ACPI tables written to the output directory.
    pub table_count: usize,
}

/// Unpacks the firmware image described by `config` and saves its ACPI tables.
///
/// # Errors
///
/// Returns errors when the image does not exist, or when [`locate_uefi_extract()`],
/// [`unpack_image()`], or [`scan_and_collect()`] fail.
pub fn extract(config: ExtractConfiguration) -> Result<ExtractSummary> {
    if !config.image.is_file() {
        bail!("BIOS file '{}' not found", config.image.display());
    }

    let tool = locate_uefi_extract(config.uefi_extract.as_deref())?;
    info!("Found UEFIExtract: {}", tool.display());

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("error creating '{}'", config.output_dir.display()))?;

    info!("Extracting BIOS: {}", config.image.display());
    let dump_dir = unpack_image(&tool, &config.image)?;

    let table_count = scan_and_collect(&dump_dir, &config.output_dir)?;

    let dump_dir = if config.remove_dump {
        fs::remove_dir_all(&dump_dir)
            .with_context(|| format!("error removing '{}'", dump_dir.display()))?;
        debug!("Removed {}", dump_dir.display());
        None
    } else {
        Some(dump_dir)
    };

    Ok(ExtractSummary {
        dump_dir,
        table_count,
    })
}

/// Returns the location of the `UEFIExtract` executable.
///
/// An `explicit` location is used as is. Otherwise the [`BUNDLED_TOOLS_DIR`] next to the running
/// executable is searched, followed by the directories listed in `PATH`.
///
/// # Errors
///
/// Returns an error if no executable `UEFIExtract` could be found.
pub fn locate_uefi_extract(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if is_executable(path) {
            return Ok(path.to_path_buf());
        }

        bail!("UEFIExtract not found at '{}'", path.display());
    }

    let bundled = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUNDLED_TOOLS_DIR)));
    let search_path = env::var_os("PATH");

    let directories = bundled
        .into_iter()
        .chain(search_path.iter().flat_map(env::split_paths));

    find_in_directories(directories)
        .ok_or_else(|| anyhow!("UEFIExtract not found in bin directory or PATH"))
}

/// Returns the first executable named after one of [`UEFI_EXTRACT_NAMES`] in `directories`.
fn find_in_directories(directories: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    directories.into_iter().find_map(|directory| {
        UEFI_EXTRACT_NAMES
            .iter()
            .map(|name| directory.join(name))
            .find(|candidate| is_executable(candidate))
    })
}

/// Returns `true` if `path` names an executable file.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .is_ok_and(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
}

/// Returns `true` if `path` names an executable file.
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Returns the directory `UEFIExtract` writes the contents of `image` to.
pub fn dump_directory(image: &Path) -> PathBuf {
    let mut dump_dir = image.as_os_str().to_owned();
    dump_dir.push(".dump");
    PathBuf::from(dump_dir)
}

/// Runs `tool` to unpack the ACPI table storage file of `image`, returning the dump directory.
///
/// A dump directory left behind by an earlier run is removed first.
///
/// # Errors
///
/// Returns errors when the stale dump directory cannot be removed, `UEFIExtract` fails, or
/// `UEFIExtract` did not create the dump directory.
pub fn unpack_image(tool: &Path, image: &Path) -> Result<PathBuf> {
    let dump_dir = dump_directory(image);

    if let Ok(metadata) = fs::symlink_metadata(&dump_dir) {
        debug!("Removing stale {}", dump_dir.display());
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&dump_dir)
        } else {
            fs::remove_file(&dump_dir)
        };
        removed.with_context(|| format!("error removing '{}'", dump_dir.display()))?;
    }

    let mut cmd = Command::new(tool);
    cmd.arg(image).arg(ACPI_TABLE_STORAGE_GUID);
    run_cmd(cmd).context("error executing UEFIExtract")?;

    if !dump_dir.is_dir() {
        bail!(
            "UEFIExtract did not create dump directory: {}",
            dump_dir.display()
        );
    }

    Ok(dump_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{TempDir, write_file};

    #[test]
    fn dump_directory_appends_suffix() {
        assert_eq!(
            dump_directory(Path::new("images/X570.rom")),
            PathBuf::from("images/X570.rom.dump")
        );
        assert_eq!(dump_directory(Path::new("bios")), PathBuf::from("bios.dump"));
    }

    #[test]
    fn explicit_tool_must_exist() {
        let dir = TempDir::new("locate-missing");

        let missing = dir.path().join("UEFIExtract");

        let error = locate_uefi_extract(Some(&missing)).unwrap_err();
        assert!(error.to_string().contains("UEFIExtract not found"));
    }

    #[cfg(unix)]
    mod unix {
        use std::os::unix::fs::PermissionsExt;

        use super::*;
        use crate::{action::RunCommandError, test_util::table};

        /// Shell used as a stand-in for `UEFIExtract`.
        ///
        /// Invoked as `sh <image> <guid>`, the shell runs the image itself as a script with `$0`
        /// set to the image path and `$1` to the GUID.
        const SHELL: &str = "/bin/sh";

        /// Writes an image script that lays out a dump containing one DSDT.
        fn write_image(dir: &Path) -> PathBuf {
            let image = dir.join("board.rom");
            let dsdt = dir.join("dsdt.bin");
            write_file(&dsdt, &table(b"DSDT", b"ALASKA", b"A M I   "));

            let script = format!(
                "set -e\n\
                 section=\"$0.dump/4 $1/0 Raw section\"\n\
                 mkdir -p \"$section\"\n\
                 cp '{}' \"$section/body.bin\"\n",
                dsdt.display()
            );
            write_file(&image, script.as_bytes());
            image
        }

        #[test]
        fn finds_executables_only() {
            let dir = TempDir::new("locate");
            let plain = dir.path().join("plain");
            let tools = dir.path().join("tools");

            write_file(&plain.join("UEFIExtract"), b"");
            write_file(&tools.join("UEFIExtract.exe"), b"");
            fs::set_permissions(
                tools.join("UEFIExtract.exe"),
                fs::Permissions::from_mode(0o755),
            )
            .unwrap();

            assert_eq!(
                find_in_directories([plain.clone(), tools.clone()]),
                Some(tools.join("UEFIExtract.exe"))
            );
            assert_eq!(find_in_directories([plain]), None);
            assert_eq!(
                locate_uefi_extract(Some(tools.join("UEFIExtract.exe").as_path())).unwrap(),
                tools.join("UEFIExtract.exe")
            );
        }

        #[test]
        fn unpack_replaces_stale_dump() {
            let dir = TempDir::new("unpack");
            let image = write_image(dir.path());
            let stale = dump_directory(&image).join("stale");
            write_file(&stale, b"old");

            let dump_dir = unpack_image(Path::new(SHELL), &image).unwrap();

            assert_eq!(dump_dir, dump_directory(&image));
            assert!(!stale.exists());
            assert!(
                dump_dir
                    .join(format!("4 {ACPI_TABLE_STORAGE_GUID}"))
                    .join("0 Raw section")
                    .join("body.bin")
                    .is_file()
            );
        }

        #[test]
        fn unpack_reports_tool_failure() {
            let dir = TempDir::new("unpack-fail");
            let image = dir.path().join("broken.rom");
            write_file(&image, b"echo 'not a firmware image' >&2\nexit 2\n");

            let error = unpack_image(Path::new(SHELL), &image).unwrap_err();

            match error.downcast_ref::<RunCommandError>() {
                Some(RunCommandError::CommandFailed { code, stderr }) => {
                    assert_eq!(*code, Some(2));
                    assert_eq!(stderr, "not a firmware image");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn unpack_requires_dump_directory() {
            let dir = TempDir::new("unpack-nodump");
            let image = dir.path().join("empty.rom");
            write_file(&image, b"exit 0\n");

            let error = unpack_image(Path::new(SHELL), &image).unwrap_err();

            assert!(error.to_string().contains("did not create dump directory"));
        }

        #[test]
        fn extract_end_to_end() {
            let dir = TempDir::new("extract");
            let image = write_image(dir.path());
            let output_dir = dir.path().join("tables");

            let summary = extract(ExtractConfiguration {
                image: image.clone(),
                output_dir: output_dir.clone(),
                uefi_extract: Some(PathBuf::from(SHELL)),
                remove_dump: false,
            })
            .unwrap();

            assert_eq!(summary.table_count, 1);
            assert_eq!(summary.dump_dir, Some(dump_directory(&image)));
            assert!(output_dir.join("DSDT-ALASKA-A_M_I.aml").is_file());
        }

        #[test]
        fn extract_can_remove_dump() {
            let dir = TempDir::new("extract-clean");
            let image = write_image(dir.path());

            let summary = extract(ExtractConfiguration {
                image: image.clone(),
                output_dir: dir.path().join("tables"),
                uefi_extract: Some(PathBuf::from(SHELL)),
                remove_dump: true,
            })
            .unwrap();

            assert_eq!(summary.dump_dir, None);
            assert!(!dump_directory(&image).exists());
        }

        #[test]
        fn extract_requires_image() {
            let dir = TempDir::new("extract-missing");

            let error = extract(ExtractConfiguration {
                image: dir.path().join("missing.rom"),
                output_dir: dir.path().join("tables"),
                uefi_extract: Some(PathBuf::from(SHELL)),
                remove_dump: false,
            })
            .unwrap_err();

            assert!(error.to_string().contains("not found"));
        }
    }
}
