//! Cargo-style status lines on stderr, e.g. `    Verified io.hkhc:mylib:1.0`.
//!
//! Labels are right-aligned to 12 columns. Colour is dropped automatically
//! when stderr is not a terminal.

use std::io::Write;

use console::Style;

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        style.apply_to(label)
    );
}

/// Bold green label, for completed actions.
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Bold cyan label, for information that is not an action.
pub fn status_info(label: &str, message: &str) {
    print_status(Style::new().cyan().bold(), label, message);
}

/// Bold yellow label, for problems that do not stop the command by themselves.
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}
