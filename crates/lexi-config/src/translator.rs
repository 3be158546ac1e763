use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "id".to_string()
}

fn default_fallback_url() -> String {
    "https://translate.google.com/".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// External translate page used when no local mapping exists
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            fallback_url: default_fallback_url(),
        }
    }
}
