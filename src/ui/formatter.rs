//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the styled strings and are testable; the
//! `display_*` wrappers print them. Everything except the new version goes to
//! stderr so stdout stays machine-readable.

use console::style;
use std::path::Path;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Print the new version on stdout, unstyled.
pub fn display_version(version: &str) {
    println!("{}", version);
}

/// Report a version bump.
///
/// # Arguments
/// * `old_version` - Previous latest release (None if this is the first release)
/// * `new_version` - The release just cut
/// * `path` - The changelog that was (or would be) rewritten
pub fn display_release(old_version: Option<&str>, new_version: &str, path: &Path) {
    match old_version {
        Some(old) => display_success(&format!(
            "{} → {} in {}",
            style(old).red(),
            style(new_version).green(),
            path.display()
        )),
        None => display_success(&format!(
            "First release {} in {}",
            style(new_version).green(),
            path.display()
        )),
    }
}
