use serde::{Deserialize, Serialize};

fn default_popover_gap() -> f32 {
    12.0
}

fn default_viewport_margin() -> f32 {
    10.0
}

fn default_popover_width() -> f32 {
    320.0
}

fn default_min_lookup_len() -> usize {
    2
}

fn default_viewport_width() -> f32 {
    1024.0
}

fn default_viewport_height() -> f32 {
    768.0
}

fn default_char_width() -> f32 {
    8.0
}

fn default_line_height() -> f32 {
    24.0
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Distance between a word and its popover
    #[serde(default = "default_popover_gap")]
    pub popover_gap: f32,
    /// Minimum distance kept between a popover and the viewport edge
    #[serde(default = "default_viewport_margin")]
    pub viewport_margin: f32,
    #[serde(default = "default_popover_width")]
    pub popover_width: f32,
    /// Shorter cleaned words are not interactive
    #[serde(default = "default_min_lookup_len")]
    pub min_lookup_len: usize,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    /// Cell size of the terminal layout grid
    #[serde(default = "default_char_width")]
    pub char_width: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            popover_gap: default_popover_gap(),
            viewport_margin: default_viewport_margin(),
            popover_width: default_popover_width(),
            min_lookup_len: default_min_lookup_len(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            char_width: default_char_width(),
            line_height: default_line_height(),
        }
    }
}
