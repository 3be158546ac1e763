use std::sync::Arc;

use async_trait::async_trait;
use lexi_config::Config;
use lexi_core::DefinitionLookup;
use lexi_translator::Translator;
use lexi_types::{WordDefinition, WordTranslation};

use crate::dictionary::FreeDictionaryClient;
use crate::translator::IndonesianTranslator;

/// Definitions from the dictionary API, translations from a [`Translator`].
/// Either side can be disabled, in which case it never finds anything.
#[derive(Clone)]
pub struct EnglishLookup {
    dictionary: Option<FreeDictionaryClient>,
    translator: Option<Arc<dyn Translator>>,
}

impl EnglishLookup {
    pub fn new(
        dictionary: Option<FreeDictionaryClient>,
        translator: Option<Arc<dyn Translator>>,
    ) -> Self {
        Self {
            dictionary,
            translator,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let dictionary = if config.dictionary.enabled {
            Some(FreeDictionaryClient::new(config.dictionary.api_url.clone()))
        } else {
            tracing::warn!("Dictionary disabled, definitions will be unavailable");
            None
        };

        let translator: Option<Arc<dyn Translator>> = if config.translator.enabled {
            let translator = IndonesianTranslator::new(&config.translator);
            let (from, to) = translator.language_pair();
            let metadata = translator.metadata();
            tracing::info!(
                "Translator {} ({} -> {}): {} local entries, network fallback: {}",
                metadata.name,
                from,
                to,
                metadata.local_entries,
                metadata.requires_network
            );
            Some(Arc::new(translator))
        } else {
            tracing::warn!("Translator disabled, translations will be unavailable");
            None
        };

        Self::new(dictionary, translator)
    }
}

#[async_trait]
impl DefinitionLookup for EnglishLookup {
    async fn definition(&self, word: &str) -> Option<WordDefinition> {
        let dictionary = self.dictionary.as_ref()?;
        match dictionary.lookup(word).await {
            Ok(Some(definition)) => Some(definition),
            Ok(None) => {
                tracing::info!("No definition found for '{}'", word);
                None
            }
            Err(e) => {
                tracing::warn!("Dictionary API error for '{}': {}", word, e);
                None
            }
        }
    }

    async fn translation(&self, word: &str) -> Option<WordTranslation> {
        let translator = self.translator.as_ref()?;
        match translator.translate(word).await {
            Ok(translation) => Some(translation),
            Err(e) => {
                tracing::warn!("Translation failed for '{}': {}", word, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lexi_core::lookup::run_lookup;
    use lexi_types::{LookupKind, LookupResult};

    use super::*;

    #[tokio::test]
    async fn disabled_services_find_nothing() {
        let lookup = EnglishLookup::new(None, None);
        assert_eq!(lookup.definition("context").await, None);
        assert_eq!(
            run_lookup(&lookup, LookupKind::Translation, "context").await,
            LookupResult::Translation(None)
        );
    }

    #[tokio::test]
    async fn unreachable_dictionary_fails_soft() {
        let dictionary = FreeDictionaryClient::new("http://127.0.0.1:9/entries/en");
        let lookup = EnglishLookup::new(Some(dictionary), None);
        assert_eq!(
            run_lookup(&lookup, LookupKind::Definition, "context").await,
            LookupResult::Definition(None)
        );
    }

    #[tokio::test]
    async fn configured_translator_is_used() {
        let mut config = Config::default();
        config.dictionary.enabled = false;
        let lookup = EnglishLookup::from_config(&config);

        let translation = lookup.translation("gist").await.unwrap();
        assert_eq!(translation.text, "intisari");
        assert!(!translation.is_link);
    }
}
