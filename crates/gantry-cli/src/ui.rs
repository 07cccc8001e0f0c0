//! Terminal output utilities for the gantry CLI.
//!
//! Status messages go to stderr with colored glyphs, leaving stdout for
//! data. Colors degrade automatically when the terminal doesn't support
//! them or NO_COLOR is set.
//!
//! # Examples
//!
//! ```no_run
//! use gantry_cli::ui;
//!
//! ui::init_colors();
//! ui::success("Site generated");
//! ui::warning("No stylesheets configured");
//! ```

use std::time::Duration;

use owo_colors::OwoColorize;

/// The terminal bell character.
///
/// Rung when a watched compile fails, so the failure is audible from
/// another window.
pub const BELL: &str = "\u{0007}";

/// Ring the terminal bell.
pub fn bell() {
    eprint!("{BELL}");
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print a debug message to stderr (only if RUST_LOG is set).
pub fn debug(message: &str) {
    if std::env::var("RUST_LOG").is_ok() {
        eprintln!("{} {}", "◆".dimmed(), message.dimmed());
    }
}

/// Format a duration in human-readable form.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gantry_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let minutes = total_ms / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        format!("{}m {}s", minutes, seconds)
    }
}

/// Format a file size in human-readable form.
///
/// # Examples
///
/// ```
/// use gantry_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// owo-colors respects NO_COLOR and terminal capabilities on its own; this
/// function exists as an explicit initialization point for the binary.
pub fn init_colors() {
    let _ = should_use_color();
}
