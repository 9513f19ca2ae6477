//! Colored terminal output utilities.

use console::{Style, Term};
use folio_site::{PageLint, ValidationError};

/// Terminal output formatter.
///
/// Messages go to stderr; rendered documents go to stdout.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print lints as warnings.
    pub(crate) fn lints(&self, lints: &[PageLint]) {
        for lint in lints {
            self.warning(&format!("warning: {lint}"));
        }
    }

    /// Print validation failures as errors.
    pub(crate) fn validation_errors(&self, errors: &[ValidationError]) {
        for error in errors {
            self.error(&format!("invalid: {error}"));
        }
    }

    /// Write a rendered document to stdout.
    pub(crate) fn document(&self, html: &str) -> std::io::Result<()> {
        self.stdout.write_str(html)?;
        self.stdout.flush()
    }
}
