//! Terminal feedback: aligned status lines on stderr and a fetch spinner.

use std::io::Write;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Width the status label is right-aligned to.
const LABEL_WIDTH: usize = 12;

fn print_line(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>width$} {message}",
        style.apply_to(label),
        width = LABEL_WIDTH,
    );
}

/// Report a completed step: `      Packed hello v1.0.0 (3 files, sha256 1a2b3c4d5e6f)`.
pub fn status(label: &str, message: &str) {
    print_line(Style::new().green().bold(), label, message);
}

/// Report something the user may want to act on.
pub fn status_warn(label: &str, message: &str) {
    print_line(Style::new().yellow().bold(), label, message);
}

/// Print a heading followed by one indented line per issue.
pub fn issues(heading: &str, issues: &[String]) {
    let mut err = std::io::stderr();
    let _ = writeln!(err, "{}", Style::new().red().bold().apply_to(heading));
    for issue in issues {
        let _ = writeln!(err, "{:width$}{issue}", "", width = 4);
    }
}

/// Spinner for work of unknown length. Hidden when stderr is not a terminal.
///
/// Call [`ProgressBar::finish_and_clear`] when done.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner().with_message(message.to_string());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
