//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Status messages plus per-check progress.
    Verbose,
    /// Status messages and reports.
    #[default]
    Normal,
    /// Reports and errors only.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the global `--quiet`/`--verbose` flags.
    ///
    /// Quiet wins when both are given.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows detail lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
