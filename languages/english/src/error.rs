use lexi_translator::TranslateError;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Dictionary returned HTTP {status} for {word}")]
    Status { word: String, status: u16 },

    #[error("Unexpected dictionary response: {0}")]
    Parse(String),

    #[error("Translation failed: {0}")]
    Translate(#[from] TranslateError),
}
