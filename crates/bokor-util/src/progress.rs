use std::io::Write;

use console::Style;

/// Print a Cargo-style status line: `    Checking 3 manifest(s)`
///
/// The `label` is right-aligned to 12 characters and printed in bold green,
/// followed by the `message` in the default terminal colour.
pub fn status(label: &str, message: &str) {
    status_line(Style::new().green().bold(), label, message);
}

/// Like [`status`] but uses bold cyan for informational (non-action) messages.
pub fn status_info(label: &str, message: &str) {
    status_line(Style::new().cyan().bold(), label, message);
}

/// Print a warning-style status line (bold yellow label).
pub fn status_warn(label: &str, message: &str) {
    status_line(Style::new().yellow().bold(), label, message);
}

fn status_line(style: Style, label: &str, message: &str) {
    // Status lines go to stderr so stdout stays machine-consumable.
    let _ = writeln!(std::io::stderr(), "{:>12} {message}", style.apply_to(label));
}
