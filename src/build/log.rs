//! Log sink handed to the build engine.

use console::{Style, Term};

const PREFIX: &str = "[fluide]";

/// Leveled log output for a build.
pub trait LogSink {
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn clear_screen(&mut self);
}

/// Writes `[fluide] <message>` lines to stderr, colouring the prefix by level.
///
/// On a terminal the screen is cleared before each line.
pub struct PrefixedLogSink {
    term: Term,
    clear: bool,
    colors: bool,
}

impl PrefixedLogSink {
    pub fn new() -> Self {
        let term = Term::stderr();
        let attached = term.is_term();
        Self {
            term,
            clear: attached && !crate::shell::is_ci(),
            colors: attached && std::env::var("NO_COLOR").is_err(),
        }
    }

    /// Never clears and never colours.
    pub fn plain() -> Self {
        Self {
            term: Term::stderr(),
            clear: false,
            colors: false,
        }
    }

    fn format(&self, style: Style, message: &str) -> String {
        format_line(self.colors, style, message)
    }

    fn write(&mut self, style: Style, message: &str) {
        self.clear_screen();
        let line = self.format(style, message);
        if let Err(e) = self.term.write_line(&line) {
            tracing::debug!("Failed to write build log line: {}", e);
        }
    }
}

impl Default for PrefixedLogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for PrefixedLogSink {
    fn info(&mut self, message: &str) {
        self.write(Style::new().cyan().bold(), message);
    }

    fn warn(&mut self, message: &str) {
        self.write(Style::new().yellow().bold(), message);
    }

    fn error(&mut self, message: &str) {
        self.write(Style::new().red().bold(), message);
    }

    fn clear_screen(&mut self) {
        if self.clear {
            let _ = self.term.clear_screen();
        }
    }
}

fn format_line(colors: bool, style: Style, message: &str) -> String {
    if colors {
        format!("{} {}", style.apply_to(PREFIX), message)
    } else {
        format!("{} {}", PREFIX, message)
    }
}

/// Level of a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingLogSink {
    pub lines: Vec<(LogLevel, String)>,
    pub clears: usize,
}

impl RecordingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged at `level`, in order.
    pub fn messages(&self, level: LogLevel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.as_str())
            .collect()
    }
}

impl LogSink for RecordingLogSink {
    fn info(&mut self, message: &str) {
        self.lines.push((LogLevel::Info, message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.lines.push((LogLevel::Warn, message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.lines.push((LogLevel::Error, message.to_string()));
    }

    fn clear_screen(&mut self) {
        self.clears += 1;
    }
}
