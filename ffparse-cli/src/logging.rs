// ============================================================================
// ffparse-cli/src/logging.rs
// ============================================================================
//
// LOGGING: Console Logger Setup
//
// The core library logs through the `log` facade only. This module installs
// `env_logger` as the backend with a compact colored format on stderr, so
// stdout stays reserved for the records being printed.
//
// USAGE:
// - default: info
// - --verbose: debug
// - RUST_LOG overrides both, e.g. RUST_LOG=tool_output=trace shows every raw
//   line read from the tool

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::io::Write;

/// Initialize the logger for ffparse
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    init_with_level(level);
}

/// Initialize the logger with a specific default log level
pub fn init_with_level(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .format(|buf, record| {
            let level_str = match record.level() {
                log::Level::Error => "ERROR",
                log::Level::Warn => "WARN ",
                log::Level::Info => "INFO ",
                log::Level::Debug => "DEBUG",
                log::Level::Trace => "TRACE",
            };

            let level_colored = match record.level() {
                log::Level::Error => level_str.bright_red().to_string(),
                log::Level::Warn => level_str.yellow().to_string(),
                log::Level::Info => level_str.green().to_string(),
                log::Level::Debug => level_str.blue().to_string(),
                log::Level::Trace => level_str.magenta().to_string(),
            };

            writeln!(
                buf,
                "{} {} {}",
                level_colored,
                record.target().dimmed(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_env("RUST_LOG")
        .try_init();

    match result {
        Ok(()) => log::debug!("Logger initialized with level: {}", level),
        Err(e) => eprintln!("Logger already initialized: {e}"),
    }
}
