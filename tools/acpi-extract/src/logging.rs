//! Logging backend for `acpi-extract`.
//!
//! Progress messages are written to standard output without decoration. Warnings and errors go
//! to standard error, prefixed with their [`Level`].

use std::io::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// The global [`Log`] implementation.
static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger, letting through messages allowed by `filter`.
///
/// Calling this function more than once only updates the filter.
pub fn init(filter: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}

/// Returns the [`LevelFilter`] selected by the number of `--verbose` flags and `--quiet`.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }

    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// The standard stream a [`Record`] is written to.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl Stream {
    /// Returns the [`Stream`] that messages of `level` are written to.
    fn for_level(level: Level) -> Self {
        match level {
            Level::Error | Level::Warn => Self::Stderr,
            Level::Info | Level::Debug | Level::Trace => Self::Stdout,
        }
    }
}

/// Returns `true` if messages of `level` are prefixed with their [`Level`].
fn is_decorated(level: Level) -> bool {
    level != Level::Info
}

/// Writes `record` as a single line to `out`, prefixed with its [`Level`] if `decorate` is set.
fn write_record(out: &mut impl Write, record: &Record, decorate: bool) -> io::Result<()> {
    if decorate {
        writeln!(out, "{}: {}", record.level(), record.args())
    } else {
        writeln!(out, "{}", record.args())
    }
}

/// [`Log`] implementation that writes to the standard streams.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let decorate = is_decorated(record.level());
        // Nothing sensible can be done if the console is gone.
        let _ = match Stream::for_level(record.level()) {
            Stream::Stdout => write_record(&mut io::stdout().lock(), record, decorate),
            Stream::Stderr => write_record(&mut io::stderr().lock(), record, decorate),
        };
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}
