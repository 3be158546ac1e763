use serde::{Deserialize, Serialize};

/// Structured English definition, shaped like the dictionary API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDefinition {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Sense>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// Translation of a single word. With `is_link` set, `text` is a URL to an
/// external translate service rather than the translation itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTranslation {
    pub text: String,
    pub is_link: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Definition,
    Translation,
}

/// Outcome of a lookup; `None` payloads mean nothing was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Definition(Option<WordDefinition>),
    Translation(Option<WordTranslation>),
}

impl LookupResult {
    pub fn kind(&self) -> LookupKind {
        match self {
            LookupResult::Definition(_) => LookupKind::Definition,
            LookupResult::Translation(_) => LookupKind::Translation,
        }
    }

    pub fn is_found(&self) -> bool {
        match self {
            LookupResult::Definition(definition) => definition.is_some(),
            LookupResult::Translation(translation) => translation.is_some(),
        }
    }

    pub fn not_found(kind: LookupKind) -> Self {
        match kind {
            LookupKind::Definition => LookupResult::Definition(None),
            LookupKind::Translation => LookupResult::Translation(None),
        }
    }
}
