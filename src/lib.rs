//! Live configuration reload.
//!
//! Watches a directory, waits for bursts of writes to settle, loads changed
//! JSON documents, checks them against the parser registered for their
//! `dataType`, and keeps the latest valid value of every config kind.
//!
//! ```text
//! DirectoryMonitor --settled paths--> ConfigDispatcher --Config--> ConfigStore
//!        ^                                                              |
//!   poll() per tick                                    get_config::<Kind>()
//! ```

pub mod logging;

pub mod config;
pub mod configs;
pub mod dispatch;
pub mod fields;
pub mod messages;
pub mod reload;
pub mod store;
pub mod types;
pub mod watcher;

pub use config::Settings;
pub use configs::{CircleObject, Config, ConfigKind, PrintTest, SolidColorBackground};
pub use dispatch::{ConfigDispatcher, LoadError, ParserRegistry, RegistryError};
pub use fields::{FieldError, ParseError};
pub use messages::{MessageSink, Severity};
pub use reload::{ConfigReloader, ReloadReport};
pub use store::ConfigStore;
pub use types::{ColorF, Vec2};
pub use watcher::{DirectoryMonitor, InitError};
