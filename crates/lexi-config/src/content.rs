use std::env;

use serde::{Deserialize, Serialize};

fn default_base() -> String {
    "content".to_string()
}

fn default_manifest() -> String {
    "manifest.json".to_string()
}

fn default_enrolled() -> Vec<String> {
    vec!["vocabulary-essentials".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root: an http(s) URL or a local directory
    #[serde(default = "default_base")]
    pub base: String,
    /// Manifest listing course ids, relative to `base`
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Courses the user is enrolled in
    #[serde(default = "default_enrolled")]
    pub enrolled_course_ids: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            manifest: default_manifest(),
            enrolled_course_ids: default_enrolled(),
        }
    }
}

impl ContentConfig {
    pub fn new() -> Self {
        let base = env::var("CONTENT_BASE").unwrap_or_else(|_| default_base());

        Self {
            base,
            ..Self::default()
        }
    }

    pub fn is_remote(&self) -> bool {
        self.base.starts_with("http://") || self.base.starts_with("https://")
    }
}
