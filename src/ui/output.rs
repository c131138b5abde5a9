//! Output verbosity.

/// How much the UI prints besides prompts, warnings and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Echo package manager and build engine output line by line.
    Verbose,
    #[default]
    Normal,
    /// Drop informational notices and headers.
    Quiet,
}

impl OutputMode {
    /// Mode selected by the `--verbose` and `--quiet` flags.
    ///
    /// clap rejects both flags together; `verbose` wins if a caller sets both.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Self::Verbose,
            (false, true) => Self::Quiet,
            (false, false) => Self::Normal,
        }
    }

    /// Whether child process output is echoed instead of summarized.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether informational notices and headers are printed.
    pub fn shows_notices(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
