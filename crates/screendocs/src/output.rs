//! Colored progress output on stderr.

use console::{Style, Term};

/// Progress reporter for sync and render commands.
///
/// Everything goes to stderr so `render` output on stdout stays clean.
pub(crate) struct Output {
    term: Term,
    done: Style,
    warn: Style,
    fail: Style,
    heading: Style,
    detail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
            heading: Style::new().cyan().bold(),
            detail: Style::new().dim(),
        }
    }

    /// Plain progress line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Start of a screen, e.g. `Syncing: Login`.
    pub(crate) fn screen(&self, msg: &str) {
        self.styled(&self.heading, msg);
    }

    /// Indented step under the current screen.
    pub(crate) fn step(&self, msg: &str) {
        let _ = self.term.write_line(&format!("  {msg}"));
    }

    /// Indented, dimmed detail under the current screen.
    pub(crate) fn detail(&self, msg: &str) {
        self.styled(&self.detail, &format!("  {msg}"));
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.done, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.fail, msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
