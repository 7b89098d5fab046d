//! Directory watching with debounced change detection.
//!
//! # Architecture
//!
//! ```text
//! DirectoryMonitor
//!   - ChangeSource (NotifySource over notify::RecommendedWatcher, or ChannelSource)
//!   - extension allow-list
//!   - Debouncer (path -> last change)
//!         |
//!   poll()          raw events -> pending set
//!   drain_settled() quiet paths -> caller
//! ```

mod debouncer;
mod error;
mod monitor;
mod source;

pub use debouncer::Debouncer;
pub use error::InitError;
pub use monitor::{DEFAULT_COOLDOWN_MS, DirectoryMonitor};
pub use source::{ChangeSource, ChannelSource, FileAction, FileChange, NotifySource};
