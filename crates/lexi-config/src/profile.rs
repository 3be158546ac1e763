use std::env;

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    ".lexi/profiles".to_string()
}

fn default_key() -> String {
    "user_profile".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProfileConfig {
    /// Directory of the key-value profile store
    #[serde(default = "default_dir")]
    pub dir: String,
    /// Key the learner profile is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}

impl ProfileConfig {
    pub fn new() -> Self {
        let dir = env::var("LEXI_PROFILE_DIR").unwrap_or_else(|_| default_dir());

        Self {
            dir,
            ..Self::default()
        }
    }
}
