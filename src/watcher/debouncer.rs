//! Debouncing of file change events by path.
//!
//! Editors rarely write a file once: a save can be a temp-file create, a
//! rename and several writes. Collapsing those into one settle per quiet
//! period keeps the loader from reading half-written files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Pending changes keyed by path.
///
/// A path becomes ready once no change has been recorded for it during the
/// cooldown. Seeded paths carry no timestamp and are ready immediately.
#[derive(Debug)]
pub struct Debouncer {
    /// Pending changes: path -> last change timestamp.
    pending: HashMap<PathBuf, Option<Instant>>,
    cooldown: Duration,
}

impl Debouncer {
    /// Create a debouncer with a cooldown in milliseconds.
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            pending: HashMap::new(),
            cooldown: Duration::from_millis(cooldown_ms),
        }
    }

    /// Record a change. Resets the cooldown for this path.
    pub fn record(&mut self, path: PathBuf) {
        self.pending.insert(path, Some(Instant::now()));
    }

    /// Mark a path as ready without waiting. An already pending entry keeps its timestamp.
    pub fn seed(&mut self, path: PathBuf) {
        self.pending.entry(path).or_insert(None);
    }

    /// Take all paths whose cooldown has elapsed, sorted.
    pub fn take_ready(&mut self) -> Vec<PathBuf> {
        let now = Instant::now();
        let mut ready = Vec::new();

        self.pending.retain(|path, last_change| match last_change {
            Some(at) if now.duration_since(*at) < self.cooldown => true,
            _ => {
                ready.push(path.clone());
                false
            }
        });

        ready.sort();
        ready
    }

    pub fn is_pending(&self, path: &Path) -> bool {
        self.pending.contains_key(path)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
