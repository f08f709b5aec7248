//! Line-oriented terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, BuildpackTheme, OutputMode, UserInterface};

/// Terminal UI writing buildpack-style lines to stdout.
///
/// The build platform streams stdout into the build log, so every line,
/// errors included, goes there.
pub struct TerminalUI {
    term: Term,
    theme: BuildpackTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI, styling output only when colors are usable.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            BuildpackTheme::new()
        } else {
            BuildpackTheme::plain()
        };
        Self::with_theme(mode, theme)
    }

    /// Create a terminal UI with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: BuildpackTheme) -> Self {
        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn topic(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_topic(msg)).ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.term, "{}", self.theme.format_detail(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }
}

/// Create the UI for a run.
pub fn create_ui(mode: OutputMode, colors: bool) -> Box<dyn UserInterface> {
    if colors {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(TerminalUI::with_theme(mode, BuildpackTheme::plain()))
    }
}
