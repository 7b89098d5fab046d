//! Application settings.
//!
//! Layered with figment:
//! - Default values
//! - TOML file (`liveconf.toml` in the working directory)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Variables are prefixed with `LIVECONF_` and use double underscores to
//! separate nested levels:
//! - `LIVECONF_WATCH__DIRECTORY=settings` sets `watch.directory`
//! - `LIVECONF_WATCH__COOLDOWN_MS=250` sets `watch.cooldown_ms`
//! - `LIVECONF_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::watcher::DEFAULT_COOLDOWN_MS;

/// Name of the settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "liveconf.toml";

const ENV_PREFIX: &str = "LIVECONF_";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Directory watching and reload behaviour
    #[serde(default)]
    pub watch: WatchSettings,

    /// Log levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WatchSettings {
    /// Directory holding the config documents
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File extensions to watch, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// How long a file must stay unchanged before it is loaded
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    /// Interval between reload ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for every module (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `"liveconf::watcher" = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_directory() -> PathBuf {
    PathBuf::from("config")
}
fn default_extensions() -> Vec<String> {
    vec!["json".to_string(), "txt".to_string(), "ini".to_string()]
}
fn default_cooldown_ms() -> u64 {
    DEFAULT_COOLDOWN_MS
}
fn default_tick_ms() -> u64 {
    16
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extensions: default_extensions(),
            cooldown_ms: default_cooldown_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load from defaults, `liveconf.toml` and the environment.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load with `path` as the settings file. A missing file just means defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscores stay in field names
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Save as pretty TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Write default settings to `path`, usually [`SETTINGS_FILE`].
    pub fn init_config_file(
        path: impl AsRef<Path>,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = path.as_ref().to_path_buf();

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
