//! Lookup table from data type tag to parse function.

use std::collections::HashMap;

use serde_json::Value;

use super::RegistryError;
use crate::configs::{CircleObject, Config, ConfigKind, PrintTest, SolidColorBackground};
use crate::fields::ParseError;

/// Turns a document into a config variant.
pub type ParseFn = fn(&Value) -> Result<Config, ParseError>;

/// Parse functions keyed by data type.
///
/// Filled once at startup and only read afterwards. Registering the same tag
/// twice is an error instead of a silent overwrite.
#[derive(Debug, Default, Clone)]
pub struct ParserRegistry {
    parsers: HashMap<&'static str, ParseFn>,
}

impl ParserRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in config kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert_kind::<SolidColorBackground>();
        registry.insert_kind::<CircleObject>();
        registry.insert_kind::<PrintTest>();
        registry
    }

    /// Register `parser` under `data_type`.
    pub fn register(&mut self, data_type: &'static str, parser: ParseFn) -> Result<(), RegistryError> {
        if self.parsers.contains_key(data_type) {
            return Err(RegistryError::DuplicateTag(data_type));
        }
        self.parsers.insert(data_type, parser);
        crate::debug_event!("registry", "registered", "{data_type}");
        Ok(())
    }

    /// Register a kind under its own tag.
    pub fn register_kind<K: ConfigKind>(&mut self) -> Result<(), RegistryError> {
        self.register(K::DATA_TYPE, K::parse_config)
    }

    // Built-in tags are distinct constants, so this cannot collide on a fresh registry.
    fn insert_kind<K: ConfigKind>(&mut self) {
        self.parsers.insert(K::DATA_TYPE, K::parse_config);
    }

    pub fn get(&self, data_type: &str) -> Option<ParseFn> {
        self.parsers.get(data_type).copied()
    }

    pub fn contains(&self, data_type: &str) -> bool {
        self.parsers.contains_key(data_type)
    }

    /// Registered tags, sorted.
    pub fn data_types(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.parsers.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
