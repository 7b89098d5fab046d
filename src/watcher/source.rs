//! Raw change events from the file system or any other feed.

use std::fmt;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileAction {
    Added,
    Modified,
    Removed,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Added => "Added",
            Self::Modified => "Modified",
            Self::Removed => "Removed",
        })
    }
}

/// A single raw change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub action: FileAction,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, action: FileAction) -> Self {
        Self {
            path: path.into(),
            action,
        }
    }
}

/// Something that buffers change events until asked for them.
pub trait ChangeSource {
    /// Take every buffered change. Never blocks.
    fn drain(&mut self) -> Vec<FileChange>;
}

/// Change events from the OS watch API, for one directory, non-recursive.
///
/// The OS delivers events on its own thread into a channel; [`drain`](ChangeSource::drain)
/// only empties what is already queued. Dropping the source stops the watch.
pub struct NotifySource {
    events: Receiver<notify::Result<Event>>,
    /// The underlying watcher (kept alive by storing it).
    _watcher: RecommendedWatcher,
}

impl NotifySource {
    pub fn watch(directory: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })?;
        watcher.watch(directory, RecursiveMode::NonRecursive)?;

        Ok(Self {
            events: rx,
            _watcher: watcher,
        })
    }
}

/// Map a notify event kind to the action it represents. Access events carry no change.
fn action_for(kind: &EventKind) -> Option<FileAction> {
    match kind {
        EventKind::Create(_) => Some(FileAction::Added),
        EventKind::Modify(_) | EventKind::Any | EventKind::Other => Some(FileAction::Modified),
        EventKind::Remove(_) => Some(FileAction::Removed),
        EventKind::Access(_) => None,
    }
}

impl ChangeSource for NotifySource {
    fn drain(&mut self) -> Vec<FileChange> {
        let mut changes = Vec::new();

        for res in self.events.try_iter() {
            match res {
                Ok(event) => {
                    let Some(action) = action_for(&event.kind) else {
                        continue;
                    };
                    changes.extend(event.paths.into_iter().map(|path| FileChange { path, action }));
                }
                Err(e) => {
                    tracing::warn!("[monitor] file watch error: {e}");
                }
            }
        }

        changes
    }
}

/// Change events pushed in-process through a channel.
///
/// For callers that already have an event stream of their own.
pub struct ChannelSource {
    events: Receiver<FileChange>,
}

impl ChannelSource {
    /// A source and the sender that feeds it.
    pub fn new() -> (Sender<FileChange>, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (tx, Self { events: rx })
    }
}

impl ChangeSource for ChannelSource {
    fn drain(&mut self) -> Vec<FileChange> {
        self.events.try_iter().collect()
    }
}
