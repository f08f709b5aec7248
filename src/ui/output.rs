//! Output verbosity mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show step topics and detail lines.
    #[default]
    Normal,
    /// Show step topics, warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Pick the mode selected by the `--quiet` flag.
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows detail lines under a topic.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
