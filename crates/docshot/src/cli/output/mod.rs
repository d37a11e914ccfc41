//! Output formatting utilities
//!
//! Everything here goes to stderr; stdout is reserved for command results.

use console::style;

/// Print a success message
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print a per-item failure
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").blue(), message);
}

/// Print a fatal configuration error
pub fn fatal(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Print a plain line
pub fn line(message: &str) {
    eprintln!("{}", message);
}
