//! Directory monitor: filtered, debounced change detection for one directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::debouncer::Debouncer;
use super::error::InitError;
use super::source::{ChangeSource, NotifySource};
use crate::messages::MessageSink;

/// Default time a file must stay quiet before it is reported.
pub const DEFAULT_COOLDOWN_MS: u64 = 100;

/// Watches a directory and reports files that changed and then settled.
///
/// Call [`poll`](Self::poll) and [`drain_settled`](Self::drain_settled) once
/// per tick from the same thread. Neither blocks.
pub struct DirectoryMonitor {
    /// Absolute path of the watched directory.
    directory: PathBuf,
    /// Allowed file extensions, lowercase, without the leading dot.
    extensions: Vec<String>,
    debouncer: Debouncer,
    source: Box<dyn ChangeSource>,
    sink: Arc<dyn MessageSink>,
}

impl DirectoryMonitor {
    /// Start watching `directory` with the OS watch API.
    ///
    /// The directory is created when missing. Files already present with an
    /// allowed extension are reported by the first `drain_settled`.
    pub fn init(
        directory: impl AsRef<Path>,
        extensions: &[impl AsRef<str>],
        cooldown_ms: u64,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self, InitError> {
        let directory = prepare_directory(directory.as_ref(), sink.as_ref())?;

        let source = NotifySource::watch(&directory).map_err(|source| {
            sink.error(&format!(
                "could not start watching directory `{}`",
                directory.display()
            ));
            InitError::WatchUnavailable {
                path: directory.clone(),
                source,
            }
        })?;

        Self::start(directory, extensions, cooldown_ms, Box::new(source), sink)
    }

    /// Like [`init`](Self::init), with events coming from `source` instead of the OS.
    pub fn with_source(
        directory: impl AsRef<Path>,
        extensions: &[impl AsRef<str>],
        cooldown_ms: u64,
        source: impl ChangeSource + 'static,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self, InitError> {
        let directory = prepare_directory(directory.as_ref(), sink.as_ref())?;
        Self::start(directory, extensions, cooldown_ms, Box::new(source), sink)
    }

    fn start(
        directory: PathBuf,
        extensions: &[impl AsRef<str>],
        cooldown_ms: u64,
        source: Box<dyn ChangeSource>,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self, InitError> {
        sink.success(&format!(
            "started watching directory `{}`",
            directory.display()
        ));

        let mut monitor = Self {
            directory,
            extensions: extensions
                .iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            debouncer: Debouncer::new(cooldown_ms),
            source,
            sink,
        };
        monitor.seed_existing()?;

        crate::log_event!(
            "monitor",
            "started",
            "{} ({} existing files)",
            monitor.directory.display(),
            monitor.debouncer.pending_count()
        );
        Ok(monitor)
    }

    /// Queue every file already in the directory so it is loaded on the first tick.
    fn seed_existing(&mut self) -> Result<(), InitError> {
        let entries =
            std::fs::read_dir(&self.directory).map_err(|e| InitError::DirectoryUnavailable {
                path: self.directory.clone(),
                reason: e.to_string(),
            })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && self.is_allowed(&path) {
                self.debouncer.seed(path);
            }
        }

        Ok(())
    }

    /// Move buffered change events into the pending set.
    ///
    /// Events for other extensions are dropped. Only recency is kept, not the
    /// kind of change. Returns how many events were retained.
    pub fn poll(&mut self) -> usize {
        let mut retained = 0;

        for change in self.source.drain() {
            if !self.is_allowed(&change.path) {
                crate::debug_event!("monitor", "ignored", "{}", change.path.display());
                continue;
            }

            self.sink.verbose(&format!(
                "File {}: `{}`",
                change.action,
                change.path.display()
            ));
            self.debouncer.record(change.path);
            retained += 1;
        }

        retained
    }

    /// Remove and return every pending path whose cooldown has elapsed.
    ///
    /// A path drained here shows up again only after a new change.
    pub fn drain_settled(&mut self) -> Vec<PathBuf> {
        self.debouncer.take_ready()
    }

    /// Whether `path` has one of the allowed extensions, ignoring case.
    pub fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn pending_count(&self) -> usize {
        self.debouncer.pending_count()
    }
}

impl Drop for DirectoryMonitor {
    fn drop(&mut self) {
        crate::debug_event!("monitor", "stopped", "{}", self.directory.display());
    }
}

/// Make sure `directory` exists and return its absolute path.
fn prepare_directory(directory: &Path, sink: &dyn MessageSink) -> Result<PathBuf, InitError> {
    if directory.is_dir() {
        sink.success(&format!("found directory `{}`", directory.display()));
    } else {
        if let Err(e) = std::fs::create_dir_all(directory) {
            let reason = if directory.exists() {
                "a file with the same name already exists".to_string()
            } else {
                e.to_string()
            };
            sink.error(&format!(
                "failed to create directory `{}`: {reason}",
                directory.display()
            ));
            return Err(InitError::DirectoryUnavailable {
                path: directory.to_path_buf(),
                reason: e.to_string(),
            });
        }
        sink.success(&format!("created directory `{}`", directory.display()));
    }

    directory
        .canonicalize()
        .map_err(|e| InitError::DirectoryUnavailable {
            path: directory.to_path_buf(),
            reason: e.to_string(),
        })
}
