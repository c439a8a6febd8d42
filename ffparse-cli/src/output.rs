// ffparse-cli/src/output.rs
//
// Terminal output helpers: colored headings and label/value lines for the
// text mode, pretty JSON for --json.

use ffparse_core::CoreResult;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

/// Print a heading with colored styling and clear separation
pub fn print_heading(text: &str) {
    let heading = format!(" {} ", text).bold().bright_white().to_string();
    let line = "=".repeat(50).bright_blue().to_string();

    println!("\n{}", line);
    println!("{}", heading);
    println!("{}\n", line);
}

/// Print a section heading (smaller than main heading) with colored styling
pub fn print_section(text: &str) {
    let section = format!(" {} ", text).bold().white().to_string();
    let line = "-".repeat(40).blue().to_string();

    println!("\n{}", line);
    println!("{}", section);
    println!("{}", line);
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", label.bright_cyan(), value);
}

/// Print an info line only when the value is present
pub fn print_optional<T: Display>(label: &str, value: Option<T>) {
    if let Some(value) = value {
        print_info(label, value);
    }
}

/// Print one row of a capability table: flags, name, description
pub fn print_row(flags: &str, name: &str, description: &str) {
    println!("{} {:<20} {}", flags.yellow(), name.bold(), description);
}

/// Print an error message in red
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".bright_red().bold(), message);
}

/// Write `value` to stdout as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CoreResult<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).map_err(io::Error::from)?;
    writeln!(handle)?;
    Ok(())
}
