//! Visual theme and styling.

use console::Style;

/// Prefix for step topics, following the buildpack output convention.
pub const TOPIC_PREFIX: &str = "----->";

/// Indentation for lines under a topic.
pub const DETAIL_INDENT: &str = "       ";

/// Prefix for warnings and errors.
pub const ALERT_PREFIX: &str = " !     ";

/// The installer's visual theme.
#[derive(Debug, Clone)]
pub struct BuildpackTheme {
    /// Style for step topics (bold).
    pub topic: Style,
    /// Style for detail lines (normal).
    pub detail: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
}

impl Default for BuildpackTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildpackTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            topic: Style::new().bold(),
            detail: Style::new(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            topic: Style::new(),
            detail: Style::new(),
            warning: Style::new(),
            error: Style::new(),
        }
    }

    /// Format a step topic.
    pub fn format_topic(&self, msg: &str) -> String {
        format!("{}", self.topic.apply_to(format!("{} {}", TOPIC_PREFIX, msg)))
    }

    /// Format a detail line.
    pub fn format_detail(&self, msg: &str) -> String {
        format!("{}", self.detail.apply_to(format!("{}{}", DETAIL_INDENT, msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("{}{}", ALERT_PREFIX, msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("{}{}", ALERT_PREFIX, msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
