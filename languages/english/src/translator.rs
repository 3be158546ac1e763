use std::collections::HashMap;

use async_trait::async_trait;
use lexi_config::translator::TranslatorConfig;
use lexi_translator::{LanguageCode, ProviderMetadata, TranslateError, Translator};
use lexi_types::WordTranslation;

/// Course terms translated locally; everything else goes to the fallback page
const ID_WORDS: &[(&str, &str)] = &[
    ("context", "konteks"),
    ("artifact", "artefak"),
    ("archaeologist", "arkeolog"),
    ("fragile", "rapuh"),
    ("gist", "intisari"),
    ("skimming", "membaca sepintas"),
    ("scanning", "memindai"),
    ("prefix", "awalan"),
    ("suffix", "akhiran"),
    ("verb", "kata kerja"),
    ("noun", "kata benda"),
    ("adjective", "kata sifat"),
    ("adverb", "kata keterangan"),
    ("vocabulary", "kosakata"),
    ("essentials", "dasar-dasar"),
    ("comprehension", "pemahaman"),
    ("strategies", "strategi"),
    ("stage", "panggung"),
    ("fright", "ketakutan"),
    ("creative", "kreatif"),
    ("workshop", "lokakarya"),
    ("academic", "akademik"),
    ("grammar", "tata bahasa"),
    ("guide", "panduan"),
    ("reading", "membaca"),
    ("listening", "mendengarkan"),
    ("speaking", "berbicara"),
    ("writing", "menulis"),
    ("power", "kekuatan"),
    ("unlocking", "membuka"),
    ("phrasal", "frasa"),
    ("idioms", "idiom"),
    ("conversation", "percakapan"),
    ("daily", "sehari-hari"),
    ("public", "publik"),
    ("skills", "keterampilan"),
    ("active", "aktif"),
    ("mastering", "menguasai"),
    ("advanced", "lanjutan"),
    ("mixed", "campuran"),
    ("conditionals", "pengandaian"),
    ("formal", "formal"),
    ("transition", "transisi"),
    ("words", "kata-kata"),
    ("cohesion", "kepaduan"),
    ("show", "tunjukkan"),
    ("tell", "katakan"),
    ("descriptive", "deskriptif"),
    ("overcoming", "mengatasi"),
];

/// English → Indonesian word translator
#[derive(Debug, Clone)]
pub struct IndonesianTranslator {
    words: HashMap<&'static str, &'static str>,
    from: LanguageCode,
    to: LanguageCode,
    fallback_url: String,
}

impl IndonesianTranslator {
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            words: ID_WORDS.iter().copied().collect(),
            from: config.from_lang.clone(),
            to: config.to_lang.clone(),
            fallback_url: config.fallback_url.clone(),
        }
    }

    /// Local translation, keyed by the word's ASCII letters
    pub fn local(&self, word: &str) -> Option<&'static str> {
        let key: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .collect();
        self.words.get(key.as_str()).copied()
    }

    /// Translate page for `word` on the external service
    pub fn fallback_link(&self, word: &str) -> Result<String, TranslateError> {
        let url = reqwest::Url::parse_with_params(
            &self.fallback_url,
            &[
                ("sl", self.from.as_str()),
                ("tl", self.to.as_str()),
                ("text", word),
                ("op", "translate"),
            ],
        )
        .map_err(|e| TranslateError::InvalidUrl(format!("{}: {}", self.fallback_url, e)))?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl Translator for IndonesianTranslator {
    async fn translate(&self, word: &str) -> Result<WordTranslation, TranslateError> {
        if word.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        if let Some(text) = self.local(word) {
            return Ok(WordTranslation {
                text: text.to_string(),
                is_link: false,
            });
        }

        Ok(WordTranslation {
            text: self.fallback_link(word)?,
            is_link: true,
        })
    }

    fn language_pair(&self) -> (LanguageCode, LanguageCode) {
        (self.from.clone(), self.to.clone())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "local-id".to_string(),
            requires_network: false,
            local_entries: self.words.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn translator() -> IndonesianTranslator {
        IndonesianTranslator::new(&TranslatorConfig::default())
    }

    #[tokio::test]
    async fn local_terms_translate_directly() {
        let result = translator().translate("Context,").await.unwrap();
        assert_eq!(
            result,
            WordTranslation {
                text: "konteks".into(),
                is_link: false
            }
        );
        assert_eq!(translator().local("skimming"), Some("membaca sepintas"));
    }

    #[tokio::test]
    async fn unknown_terms_link_to_translate_page() {
        let result = translator().translate("serendipity").await.unwrap();
        assert!(result.is_link);
        assert_eq!(
            result.text,
            "https://translate.google.com/?sl=en&tl=id&text=serendipity&op=translate"
        );
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        assert!(matches!(
            translator().translate("  ").await,
            Err(TranslateError::EmptyInput)
        ));
    }

    #[test]
    fn coverage_is_fixed() {
        assert_eq!(translator().metadata().local_entries, 49);
        assert_eq!(translator().language_pair(), ("en".to_string(), "id".to_string()));
    }
}
