use std::collections::HashMap;
use std::path::Path;

use lexi_types::CefrLevel;

use crate::error::IndexLoadError;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Word → CEFR level table.
///
/// Immutable once built; lookups take `&self` and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct WordLevelIndex {
    levels: HashMap<String, CefrLevel>,
}

impl WordLevelIndex {
    /// Create empty index
    pub fn new() -> Self {
        Self {
            levels: HashMap::new(),
        }
    }

    /// Build from word/level pairs; words are normalized, later pairs win
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CefrLevel)>,
        S: AsRef<str>,
    {
        let mut levels = HashMap::new();
        for (word, level) in entries {
            let key = DefaultPreprocessor.level_key(word.as_ref());
            if !key.is_empty() {
                levels.insert(key, level);
            }
        }
        Self { levels }
    }

    /// Parse `word<TAB>level` lines, skipping malformed ones
    pub fn from_tsv(content: &str) -> Self {
        let mut skipped = 0usize;
        let entries: Vec<(String, CefrLevel)> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let parsed = line
                    .split_once('\t')
                    .and_then(|(word, level)| Some((word.to_string(), CefrLevel::parse(level)?)));
                if parsed.is_none() {
                    skipped += 1;
                }
                parsed
            })
            .collect();

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed word level lines", skipped);
        }

        Self::from_entries(entries)
    }

    /// Parse a `{"word": "B2", ...}` object, skipping unknown levels
    pub fn from_json(content: &str) -> Result<Self, IndexLoadError> {
        let raw: HashMap<String, String> = serde_json::from_str(content)?;
        let total = raw.len();
        let entries: Vec<(String, CefrLevel)> = raw
            .into_iter()
            .filter_map(|(word, level)| Some((word, CefrLevel::parse(&level)?)))
            .collect();

        if entries.len() < total {
            tracing::warn!(
                "Skipped {} word level entries with unknown levels",
                total - entries.len()
            );
        }

        Ok(Self::from_entries(entries))
    }

    /// Load from a `.json` object file or a TSV file
    pub fn load_from_file(path: &Path) -> Result<Self, IndexLoadError> {
        tracing::info!("Loading word levels from file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let index = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_tsv(&content),
        };
        tracing::info!("Loaded {} word levels", index.len());
        Ok(index)
    }

    /// Merge two indexes (entries of `other` override)
    pub fn merge(mut self, other: WordLevelIndex) -> Self {
        self.levels.extend(other.levels);
        self
    }

    /// Level stored for `word`, if any
    pub fn get(&self, word: &str) -> Option<CefrLevel> {
        self.levels.get(&DefaultPreprocessor.level_key(word)).copied()
    }

    /// Level of `word` for display purposes.
    ///
    /// Tokens without letters are neutral (A1); unknown words are treated as
    /// the hardest level (C2) so unfamiliar vocabulary is never under-flagged.
    pub fn level_of(&self, word: &str) -> CefrLevel {
        let key = DefaultPreprocessor.level_key(word);
        if key.is_empty() {
            return CefrLevel::A1;
        }
        self.levels.get(&key).copied().unwrap_or(CefrLevel::C2)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sample() -> WordLevelIndex {
        WordLevelIndex::from_entries([
            ("the", CefrLevel::A1),
            ("guess", CefrLevel::A2),
            ("context", CefrLevel::B2),
        ])
    }

    #[test]
    fn normalizes_before_lookup() {
        let index = sample();
        assert_eq!(index.level_of("Context,"), CefrLevel::B2);
        assert_eq!(index.level_of("**guess.**"), CefrLevel::A2);
        assert_eq!(index.level_of("THE"), CefrLevel::A1);
    }

    #[test]
    fn unknown_is_hardest_and_empty_is_neutral() {
        let index = sample();
        assert_eq!(index.level_of("serendipity"), CefrLevel::C2);
        assert_eq!(index.level_of("--"), CefrLevel::A1);
        assert_eq!(index.level_of("1999"), CefrLevel::A1);
        assert_eq!(index.level_of(""), CefrLevel::A1);
        assert_eq!(index.get("serendipity"), None);
    }

    #[test]
    fn every_level_is_in_range() {
        let index = sample();
        for word in ["the", "x", "", "???", "context", "Zebra", "ünïcode"] {
            assert!(index.level_of(word).index() <= 5);
        }
    }

    #[test]
    fn tsv_skips_malformed_lines() {
        let index = WordLevelIndex::from_tsv("apple\tA1\nbroken line\nquantum\tC1\npear\tZ3\n");
        assert_eq!(index.len(), 2);
        assert_eq!(index.level_of("quantum"), CefrLevel::C1);
    }

    #[test]
    fn json_file_merges_over_base() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"context": "B1", "nebula": "C1", "odd": "X"}}"#).unwrap();

        let extra = WordLevelIndex::load_from_file(file.path()).unwrap();
        assert_eq!(extra.len(), 2);

        let merged = sample().merge(extra);
        assert_eq!(merged.level_of("context"), CefrLevel::B1);
        assert_eq!(merged.level_of("nebula"), CefrLevel::C1);
        assert_eq!(merged.level_of("guess"), CefrLevel::A2);
    }
}
