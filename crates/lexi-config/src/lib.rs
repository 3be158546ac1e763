use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::content::ContentConfig;
use self::dictionary::DictionaryConfig;
use self::profile::ProfileConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod content;
pub mod dictionary;
pub mod profile;
pub mod translator;
pub mod ui;

fn default_event_capacity() -> usize {
    64
}

fn default_input_capacity() -> usize {
    16
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content: ContentConfig,
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub ui: UiConfig,
    pub profile: ProfileConfig,

    /// Capacity of the event loop channel (input commands and lookup results)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Capacity of the channel towards the terminal view
    #[serde(default = "default_input_capacity")]
    pub input_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            dictionary: DictionaryConfig::default(),
            translator: TranslatorConfig::default(),
            ui: UiConfig::default(),
            profile: ProfileConfig::default(),
            event_capacity: default_event_capacity(),
            input_capacity: default_input_capacity(),
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let event_capacity = env::var("EVENT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_event_capacity);

        let input_capacity = env::var("INPUT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_input_capacity);

        Config {
            content: ContentConfig::new(),
            dictionary: DictionaryConfig::new(),
            translator: TranslatorConfig::default(),
            ui: UiConfig::default(),
            profile: ProfileConfig::new(),

            event_capacity,
            input_capacity,
        }
    }

    /// Load from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
