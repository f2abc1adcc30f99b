//! Implementations of the [`Action`][action]s.
//!
//! [action]: crate::cli::Action

pub mod collect;
pub mod extract;
pub mod header;

use std::{
    error, fmt,
    fs::File,
    io::{self, Read},
    path::Path,
    process::{Output, Stdio},
};

/// Runs a [`Command`][c] with its output captured, handling non-zero exit codes and other
/// failures.
///
/// # Errors
///
/// - [`RunCommandError::ProcessError`]: Returned if an error occurred while launching the command.
/// - [`RunCommandError::CommandFailed`]: Returned if the command exited with a non-zero exit value.
///
/// [c]: std::process::Command
pub fn run_cmd(mut cmd: std::process::Command) -> Result<Output, RunCommandError> {
    log::debug!("Running command: {cmd:?}");

    let output = cmd.stdin(Stdio::null()).output()?;
    log::trace!("stdout: {}", String::from_utf8_lossy(&output.stdout).trim_end());

    if !output.status.success() {
        return Err(RunCommandError::CommandFailed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    Ok(output)
}

/// Various errors that can occur while running a command.
#[derive(Debug)]
pub enum RunCommandError {
    /// An error occurred while launching the command.
    ProcessError(io::Error),
    /// The command exited with a non-zero exit code.
    CommandFailed {
        /// The exit of code of the command.
        code: Option<i32>,
        /// What the command wrote to its standard error stream.
        stderr: String,
    },
}

impl From<io::Error> for RunCommandError {
    fn from(value: io::Error) -> Self {
        Self::ProcessError(value)
    }
}

impl fmt::Display for RunCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessError(error) => write!(f, "error launching command: {error}"),
            Self::CommandFailed { code, stderr } => {
                match code {
                    Some(code) => write!(f, "command failed with exit status {code}")?,
                    None => write!(f, "command terminated by signal")?,
                }

                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }

                Ok(())
            }
        }
    }
}

impl error::Error for RunCommandError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ProcessError(error) => Some(error),
            Self::CommandFailed { .. } => None,
        }
    }
}

/// Reads at most `limit` bytes from the start of the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_prefix(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(limit);
    File::open(path)?
        .take(limit as u64)
        .read_to_end(&mut bytes)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{TempDir, write_file};

    #[test]
    fn command_failure_display() {
        let failed = RunCommandError::CommandFailed {
            code: Some(2),
            stderr: "bad image".to_owned(),
        };
        assert_eq!(failed.to_string(), "command failed with exit status 2: bad image");

        let killed = RunCommandError::CommandFailed {
            code: None,
            stderr: String::new(),
        };
        assert_eq!(killed.to_string(), "command terminated by signal");
    }

    #[test]
    fn missing_program_is_a_process_error() {
        let cmd = std::process::Command::new("acpi-extract-test-no-such-program");

        assert!(matches!(
            run_cmd(cmd),
            Err(RunCommandError::ProcessError(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn captures_output_and_exit_status() {
        let mut ok = std::process::Command::new("/bin/sh");
        ok.args(["-c", "echo hello"]);
        let output = run_cmd(ok).unwrap();
        assert_eq!(output.stdout, b"hello\n");

        let mut fail = std::process::Command::new("/bin/sh");
        fail.args(["-c", "echo broken >&2; exit 3"]);
        match run_cmd(fail) {
            Err(RunCommandError::CommandFailed { code, stderr }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn read_prefix_stops_at_limit() {
        let dir = TempDir::new("prefix");
        let path = dir.path().join("body.bin");
        write_file(&path, b"0123456789");

        assert_eq!(read_prefix(&path, 4).unwrap(), b"0123");
        assert_eq!(read_prefix(&path, 64).unwrap(), b"0123456789");
    }
}
