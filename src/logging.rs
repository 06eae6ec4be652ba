//! Stderr logging for the command-line tool
//!
//! The library logs through the `log` facade. The binary installs an
//! `env_logger` backend that prints one line per record using the same
//! `Error:` / `Warning:` prefixes as the rest of the CLI output.

use std::io::{self, Write};

use log::{Level, LevelFilter, Record};

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "Error: ",
        Level::Warn => "Warning: ",
        Level::Info => "",
        Level::Debug => "debug: ",
        Level::Trace => "trace: ",
    }
}

/// Write one record as a single prefixed line
fn format_record(out: &mut dyn Write, record: &Record) -> io::Result<()> {
    writeln!(out, "{}{}", prefix(record.level()), record.args())
}

/// Level for a `-v` count, or warnings only when quiet
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. Later calls keep the first logger.
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| format_record(buf, record))
        .try_init();
}
