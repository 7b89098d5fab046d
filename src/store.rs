//! Latest successfully parsed config per data type.

use std::collections::HashMap;

use crate::configs::{Config, ConfigKind};

/// Holds at most one live variant per data type.
///
/// Only successful loads reach the store, so a broken edit never replaces a
/// working config. Callers get borrowed views, never ownership.
#[derive(Debug, Default, Clone)]
pub struct ConfigStore {
    entries: HashMap<&'static str, Config>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `config` under its own data type, returning the variant it replaced.
    pub fn put(&mut self, config: Config) -> Option<Config> {
        self.entries.insert(config.data_type(), config)
    }

    pub fn get(&self, data_type: &str) -> Option<&Config> {
        self.entries.get(data_type)
    }

    /// The current value of kind `K`, if one was ever parsed.
    pub fn get_config<K: ConfigKind>(&self) -> Option<&K> {
        self.get(K::DATA_TYPE).and_then(K::narrow)
    }

    pub fn contains(&self, data_type: &str) -> bool {
        self.entries.contains_key(data_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored variants, ordered by data type.
    pub fn configs(&self) -> Vec<&Config> {
        let mut configs: Vec<_> = self.entries.values().collect();
        configs.sort_by_key(|c| c.data_type());
        configs
    }
}
