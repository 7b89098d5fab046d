//! Document loading and dispatch by data type.
//!
//! ```text
//! path
//!   -> read bytes, parse JSON          (InvalidDocument)
//!   -> top-level "dataType" string     (MissingTypeTag)
//!   -> ParserRegistry lookup           (UnknownTypeTag)
//!   -> registered parse function       (Parse)
//!   -> Config
//! ```
//!
//! Every step is reported through a [`MessageSink`](crate::messages::MessageSink);
//! the returned `Result` is the only contract callers rely on.

mod dispatcher;
mod error;
mod registry;

pub use dispatcher::{ConfigDispatcher, friendly_path};
pub use error::{LoadError, RegistryError};
pub use registry::{ParseFn, ParserRegistry};
