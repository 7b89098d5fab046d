//! Human-readable progress messages for whoever is watching the reload.
//!
//! The pipeline reports what it is doing (directory found, file changed,
//! parse failed, ...) through a [`MessageSink`]. A desktop app would pop a
//! toast, the CLI prints a coloured line, tests record them.
//!
//! Messages are advisory. Nothing in the pipeline depends on whether a sink
//! shows them.

use std::fmt;

use owo_colors::OwoColorize;
use parking_lot::Mutex;

/// How important a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Debug detail. Dropped in release builds.
    Verbose,
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives messages emitted by the reload pipeline.
pub trait MessageSink: Send + Sync {
    fn show(&self, severity: Severity, text: &str);

    /// Only emitted in debug builds.
    fn verbose(&self, text: &str) {
        if cfg!(debug_assertions) {
            self.show(Severity::Verbose, text);
        }
    }

    fn info(&self, text: &str) {
        self.show(Severity::Info, text);
    }

    fn success(&self, text: &str) {
        self.show(Severity::Success, text);
    }

    fn warning(&self, text: &str) {
        self.show(Severity::Warning, text);
    }

    fn error(&self, text: &str) {
        self.show(Severity::Error, text);
    }
}

/// Forwards messages to `tracing` under the `liveconf::messages` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn show(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Verbose => tracing::debug!("{text}"),
            Severity::Info => tracing::info!("{text}"),
            Severity::Success => tracing::info!(success = true, "{text}"),
            Severity::Warning => tracing::warn!("{text}"),
            Severity::Error => tracing::error!("{text}"),
        }
    }
}

/// One-line coloured notifications on stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn badge(&self, severity: Severity) -> String {
        let label = format!("{:>7}", severity.as_str());
        if !self.color {
            return label;
        }
        match severity {
            Severity::Verbose => label.dimmed().to_string(),
            Severity::Info => label.blue().to_string(),
            Severity::Success => label.green().to_string(),
            Severity::Warning => label.yellow().to_string(),
            Severity::Error => label.red().bold().to_string(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MessageSink for ConsoleSink {
    fn show(&self, severity: Severity, text: &str) {
        eprintln!(
            "{} {} {text}",
            chrono::Local::now().format("%H:%M:%S"),
            self.badge(severity)
        );
    }
}

/// A message kept by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<Message>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    /// Texts of messages at `severity`.
    pub fn texts(&self, severity: Severity) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|m| m.severity == severity)
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.messages
            .lock()
            .iter()
            .any(|m| m.severity == severity && m.text.contains(needle))
    }
}

impl MessageSink for RecordingSink {
    fn show(&self, severity: Severity, text: &str) {
        self.messages.lock().push(Message {
            severity,
            text: text.to_string(),
        });
    }
}
