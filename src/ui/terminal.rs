//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, UpgateTheme, UserInterface};

/// Terminal UI.
///
/// Only [`emit`](UserInterface::emit) writes to stdout; status lines go to
/// stderr so reports can be piped.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: UpgateTheme,
    colors: bool,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let colors = should_use_colors();
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: UpgateTheme::for_color(colors),
            colors,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn use_color(&self) -> bool {
        self.colors
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", msg).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "  {}", self.theme.hint.apply_to(hint)).ok();
        }
    }

    fn emit(&mut self, content: &str) {
        write!(self.out, "{}", content).ok();
        self.out.flush().ok();
    }
}
