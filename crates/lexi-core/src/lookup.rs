use lexi_types::{LookupKind, LookupResult, WordDefinition, WordTranslation};

/// Dictionary and translation services consulted when a word is opened.
///
/// Implementations fail soft: network errors and misses come back as `None`.
#[async_trait::async_trait]
pub trait DefinitionLookup: Send + Sync {
    /// English definition of `word`
    async fn definition(&self, word: &str) -> Option<WordDefinition>;

    /// Translation of `word` into the learner's language
    async fn translation(&self, word: &str) -> Option<WordTranslation>;
}

/// Run the lookup of `kind` for `term`, treating empty payloads as misses
pub async fn run_lookup(lookup: &dyn DefinitionLookup, kind: LookupKind, term: &str) -> LookupResult {
    match kind {
        LookupKind::Definition => LookupResult::Definition(
            lookup
                .definition(term)
                .await
                .filter(|definition| !definition.meanings.is_empty()),
        ),
        LookupKind::Translation => LookupResult::Translation(
            lookup
                .translation(term)
                .await
                .filter(|translation| !translation.text.trim().is_empty()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use lexi_types::{Meaning, Sense};

    use super::*;

    struct Fixed;

    #[async_trait::async_trait]
    impl DefinitionLookup for Fixed {
        async fn definition(&self, word: &str) -> Option<WordDefinition> {
            let meanings = if word == "empty" {
                vec![]
            } else {
                vec![Meaning {
                    part_of_speech: "noun".into(),
                    definitions: vec![Sense {
                        definition: "the circumstances of an event".into(),
                        example: None,
                    }],
                }]
            };
            Some(WordDefinition {
                word: word.to_string(),
                phonetic: None,
                meanings,
            })
        }

        async fn translation(&self, word: &str) -> Option<WordTranslation> {
            Some(WordTranslation {
                text: if word == "blank" { " ".into() } else { "konteks".into() },
                is_link: false,
            })
        }
    }

    #[tokio::test]
    async fn dispatches_on_kind() {
        let result = run_lookup(&Fixed, LookupKind::Definition, "context").await;
        assert_eq!(result.kind(), LookupKind::Definition);
        assert!(result.is_found());

        let result = run_lookup(&Fixed, LookupKind::Translation, "context").await;
        assert_eq!(
            result,
            LookupResult::Translation(Some(WordTranslation {
                text: "konteks".into(),
                is_link: false
            }))
        );
    }

    #[tokio::test]
    async fn empty_payloads_are_not_found() {
        assert!(!run_lookup(&Fixed, LookupKind::Definition, "empty").await.is_found());
        assert!(!run_lookup(&Fixed, LookupKind::Translation, "blank").await.is_found());
    }
}
