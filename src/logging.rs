/*
 * Logging Module
 *
 * Console logging through flexi_logger. The level comes from RUST_LOG and
 * defaults to `info`.
 */

use anyhow::Result;
use flexi_logger::{DeferredNow, Logger, LoggerHandle, Record, TS_DASHES_BLANK_COLONS_DOT_BLANK};

/// Start the global logger. Keep the returned handle alive for the lifetime
/// of the program.
pub fn setup() -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .format(line_format)
        .start()?;

    log::info!("Adjust the log level by setting RUST_LOG. By default RUST_LOG=info");

    Ok(handle)
}

/// `LEVEL [timestamp] [file:line] message`
pub fn line_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{:<5} [{}] [{}:{}] {}",
        record.level(),
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args(),
    )
}
