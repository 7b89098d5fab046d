//! Per-tick reload loop tying the monitor, dispatcher and store together.
//!
//! # Data Flow
//! ```text
//! DirectoryMonitor::poll
//!     -> drain_settled (quiet paths)
//!     -> skip non-json, note removed json files
//!     -> ConfigDispatcher::load
//!     -> ConfigStore::put on success, store untouched on failure
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::WatchSettings;
use crate::configs::ConfigKind;
use crate::dispatch::{ConfigDispatcher, LoadError, ParserRegistry, friendly_path};
use crate::messages::MessageSink;
use crate::store::ConfigStore;
use crate::watcher::{DirectoryMonitor, InitError};

/// Only files with this extension are dispatched for parsing.
pub const DISPATCHED_EXTENSION: &str = "json";

/// What one tick did.
#[derive(Debug, Default)]
pub struct ReloadReport {
    /// Data types whose stored value was replaced.
    pub applied: Vec<&'static str>,
    /// Files that failed to load; their data type keeps its previous value.
    pub failed: Vec<(PathBuf, LoadError)>,
    /// Settled files with an extension that is watched but not parsed.
    pub skipped: Vec<PathBuf>,
    /// Settled files that no longer exist.
    pub removed: Vec<PathBuf>,
}

impl ReloadReport {
    /// Nothing settled during the tick.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
            && self.failed.is_empty()
            && self.skipped.is_empty()
            && self.removed.is_empty()
    }

    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Live config reload pipeline.
pub struct ConfigReloader {
    monitor: DirectoryMonitor,
    dispatcher: ConfigDispatcher,
    store: ConfigStore,
    sink: Arc<dyn MessageSink>,
}

impl ConfigReloader {
    pub fn new(
        monitor: DirectoryMonitor,
        dispatcher: ConfigDispatcher,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            monitor,
            dispatcher,
            store: ConfigStore::new(),
            sink,
        }
    }

    /// Watch the directory named in `settings` with the built-in config kinds.
    pub fn from_settings(
        settings: &WatchSettings,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self, InitError> {
        let monitor = DirectoryMonitor::init(
            &settings.directory,
            settings.extensions.as_slice(),
            settings.cooldown_ms,
            sink.clone(),
        )?;
        let dispatcher = ConfigDispatcher::new(ParserRegistry::builtin(), sink.clone());
        Ok(Self::new(monitor, dispatcher, sink))
    }

    /// Run one iteration: pick up settled files and apply the ones that parse.
    pub fn tick(&mut self) -> ReloadReport {
        let mut report = ReloadReport::default();

        self.monitor.poll();
        for path in self.monitor.drain_settled() {
            let friendly = friendly_path(&path);
            self.sink
                .info(&format!("config file `{friendly}` was updated"));

            if !is_dispatched(&path) {
                crate::debug_event!("reload", "skipped", "{friendly}");
                report.skipped.push(path);
                continue;
            }

            if !path.exists() {
                self.sink.warning(&format!(
                    "config file `{friendly}` was removed; keeping the last applied values"
                ));
                report.removed.push(path);
                continue;
            }

            match self.dispatcher.load(&path) {
                Ok(config) => {
                    let data_type = config.data_type();
                    self.store.put(config);
                    crate::log_event!("reload", "applied", "{data_type} from {friendly}");
                    report.applied.push(data_type);
                }
                Err(e) => {
                    tracing::warn!("[reload] {friendly} not applied: {e}");
                    report.failed.push((path, e));
                }
            }
        }

        report
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Current value of kind `K`, if one was ever applied.
    pub fn get_config<K: ConfigKind>(&self) -> Option<&K> {
        self.store.get_config::<K>()
    }

    pub fn monitor(&self) -> &DirectoryMonitor {
        &self.monitor
    }
}

fn is_dispatched(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DISPATCHED_EXTENSION))
}
