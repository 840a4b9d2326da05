//! Visual theme and styling.

use console::Style;

use crate::checks::{CheckStatus, Verdict};

/// How a line should read at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Nothing blocks.
    Good,
    /// Attention needed but not blocking by default.
    Caution,
    /// Blocks the upgrade.
    Bad,
    /// Informational only.
    Muted,
}

impl Tone {
    fn icon(self) -> &'static str {
        match self {
            Tone::Good => "✓",
            Tone::Caution => "⚠",
            Tone::Bad => "✗",
            Tone::Muted => "○",
        }
    }
}

impl From<CheckStatus> for Tone {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Pass => Tone::Good,
            CheckStatus::Warning | CheckStatus::Cancelled => Tone::Caution,
            CheckStatus::Fail => Tone::Bad,
            CheckStatus::NotApplicable => Tone::Muted,
        }
    }
}

impl From<Verdict> for Tone {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => Tone::Good,
            Verdict::Warning | Verdict::Cancelled => Tone::Caution,
            Verdict::Fail => Tone::Bad,
        }
    }
}

/// Styles used by upgate's terminal output.
#[derive(Debug, Clone)]
pub struct UpgateTheme {
    /// Passing checks and verdicts (green).
    pub success: Style,
    /// Warnings and cancellations (orange).
    pub warning: Style,
    /// Failures (red bold).
    pub error: Style,
    /// Secondary text: descriptions, timestamps, skip markers.
    pub dim: Style,
    /// Check ids and banner titles (bold).
    pub highlight: Style,
    /// Banner icon (cyan bold).
    pub header: Style,
    /// Labels such as `hosts:` in report details.
    pub key: Style,
    /// Follow-up suggestions (cyan dim).
    pub hint: Style,
}

impl Default for UpgateTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgateTheme {
    /// The colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            key: Style::new().bold(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// A theme that emits no escape codes.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            dim: none.clone(),
            highlight: none.clone(),
            header: none.clone(),
            key: none.clone(),
            hint: none,
        }
    }

    /// Colored or plain depending on `use_color`.
    pub fn for_color(use_color: bool) -> Self {
        if use_color {
            Self::new()
        } else {
            Self::plain()
        }
    }

    fn style(&self, tone: Tone) -> &Style {
        match tone {
            Tone::Good => &self.success,
            Tone::Caution => &self.warning,
            Tone::Bad => &self.error,
            Tone::Muted => &self.dim,
        }
    }

    /// Prefix `msg` with the tone's icon and style the whole line.
    pub fn format_toned(&self, tone: Tone, msg: &str) -> String {
        self.style(tone)
            .apply_to(format!("{} {}", tone.icon(), msg))
            .to_string()
    }

    /// Format a warning line.
    pub fn format_warning(&self, msg: &str) -> String {
        self.format_toned(Tone::Caution, msg)
    }

    /// Format an error line.
    pub fn format_error(&self, msg: &str) -> String {
        self.format_toned(Tone::Bad, msg)
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("⇪"),
            self.highlight.apply_to(title)
        )
    }
}

/// Whether stdout should get colored output.
///
/// Honors `NO_COLOR` (https://no-color.org/).
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
