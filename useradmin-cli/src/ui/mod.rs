//! Terminal output helpers
//!
//! Status lines go to stderr; stdout only carries tables and JSON.

use colored::Colorize;
use useradmin::validation::FieldErrors;

pub mod notifier;
pub mod prompts;
pub mod table;

/// Success message with checkmark
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Info message
pub fn info(message: &str) {
    eprintln!("{} {}", "→".blue().bold(), message);
}

/// Warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Section header
pub fn section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// One line per invalid field, under the form
pub fn field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {} {}: {}", "✗".red(), field.label().bold(), message.red());
    }
}
