//! Display helpers for CLI output.
//!
//! All user-facing formatting lives here so command handlers stay free
//! of styling concerns.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a non-fatal warning.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), message);
}

/// Print a labelled value on one aligned line.
pub fn display_field(label: &str, value: &str) {
    println!("  {:<12} {}", style(label).bold(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_field() {
        display_field("edition", "oss");
    }
}
