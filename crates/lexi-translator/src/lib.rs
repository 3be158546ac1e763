use lexi_types::WordTranslation;

pub type LanguageCode = String;

/// Single-word translation provider
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate one word from the provider's source language.
    ///
    /// Providers may answer with a link to an external service
    /// (`is_link`) when they have no direct translation.
    async fn translate(&self, word: &str) -> Result<WordTranslation, TranslateError>;

    /// Source and target language
    fn language_pair(&self) -> (LanguageCode, LanguageCode);

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_network: bool,
    /// Number of words translated locally
    pub local_entries: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Invalid fallback URL: {0}")]
    InvalidUrl(String),

    #[error("Nothing to translate")]
    EmptyInput,
}
