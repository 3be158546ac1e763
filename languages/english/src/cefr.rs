use std::path::Path;

use lexi_config::dictionary::DictionaryConfig;
use lexi_core::WordLevelIndex;
use lexi_types::CefrLevel;

// A1 (breakthrough)
const A1_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "animal", "answer", "any", "are", "at",
    "back", "be", "because", "before", "big", "book", "but", "by", "can", "child", "city", "come",
    "could", "day", "do", "does", "down", "eat", "every", "family", "find", "first", "for",
    "friend", "from", "get", "give", "go", "good", "great", "has", "have", "he", "help", "helps",
    "her", "here", "him", "his", "home", "house", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "know", "learn", "lesson", "like", "little", "live", "look", "make", "man",
    "many", "me", "more", "most", "my", "name", "new", "no", "not", "now", "of", "old", "on",
    "one", "only", "or", "other", "our", "out", "people", "read", "say", "school", "see", "she",
    "so", "some", "student", "take", "teacher", "tell", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "thing", "think", "this", "time", "to", "two", "up", "us",
    "use", "very", "was", "water", "way", "we", "well", "were", "what", "when", "where", "which",
    "who", "why", "will", "with", "word", "words", "work", "write", "year", "yes", "you", "your",
];

// A2 (waystage)
const A2_WORDS: &[&str] = &[
    "able", "across", "advice", "already", "although", "appear", "area", "article", "believe",
    "both", "build", "careful", "case", "certain", "choose", "clear", "common", "compare",
    "conversation", "daily", "decide", "describe", "difference", "different", "during", "each",
    "easy", "either", "example", "explain", "fact", "few", "guess", "guide", "however",
    "idea", "important", "improve", "information", "instead", "list", "meaning", "mind",
    "mistake", "notice", "often", "opinion", "part", "phrase", "practice", "problem",
    "question", "reading", "reason", "remember", "result", "sentence", "should", "similar",
    "skill", "skills", "speaking", "story", "strong", "subject", "such", "sure", "test", "though",
    "through", "together", "topic", "understand", "usually", "while", "without", "writing",
];

// B1 (threshold)
const B1_WORDS: &[&str] = &[
    "active", "advanced", "approach", "aspect", "attitude", "average", "basis", "benefit",
    "challenge", "character", "clue", "clues", "communicate", "confidence", "confident",
    "conditional", "content", "creative", "culture", "definition", "detail", "develop",
    "effective", "effort", "emphasis", "environment", "essential", "expression", "focus",
    "formal", "fluent", "grammar", "identify", "include", "increase", "listening", "master",
    "meanwhile", "method", "natural", "noun", "paragraph", "phrasal", "power", "prefer",
    "prefix", "process", "public", "purpose", "range", "regular", "skim", "solve", "stage",
    "strategy", "structure", "suffix", "suggest", "verb", "vocabulary", "workshop",
];

// B2 (vantage)
const B2_WORDS: &[&str] = &[
    "academic", "adjective", "adverb", "ambiguous", "analyse", "anticipate", "artifact",
    "assumption", "coherent", "comprehension", "concise", "context", "convey", "crucial",
    "deduce", "descriptive", "distinguish", "elaborate", "emphasize", "essentials", "evaluate",
    "fragile", "fright", "idiom", "idioms", "implication", "infer", "interpret", "mastering",
    "nuance", "overcoming", "perspective", "precise", "scanning", "skimming", "strategies",
    "subtle", "transition", "unlocking",
];

// C1 (effective operational proficiency)
const C1_WORDS: &[&str] = &[
    "archaeologist", "articulate", "cohesion", "colloquial", "conditionals", "connotation",
    "discern", "discourse", "eloquent", "gist", "inference", "juxtapose", "nuanced",
    "paraphrase", "pragmatic", "register", "rhetorical", "succinct", "underpin",
];

// C2 (mastery)
const C2_WORDS: &[&str] = &[
    "circumlocution", "equivocal", "idiosyncratic", "obfuscate", "perspicuous", "quintessential",
    "recondite", "verisimilitude",
];

/// Word level table shipped with the application
pub fn builtin_index() -> WordLevelIndex {
    let tables = [
        (CefrLevel::A1, A1_WORDS),
        (CefrLevel::A2, A2_WORDS),
        (CefrLevel::B1, B1_WORDS),
        (CefrLevel::B2, B2_WORDS),
        (CefrLevel::C1, C1_WORDS),
        (CefrLevel::C2, C2_WORDS),
    ];

    WordLevelIndex::from_entries(
        tables
            .into_iter()
            .flat_map(|(level, words)| words.iter().map(move |word| (*word, level))),
    )
}

/// Built-in table with the configured extra tables merged over it.
/// Tables that fail to load are skipped.
pub fn load_index(config: &DictionaryConfig) -> WordLevelIndex {
    let mut index = builtin_index();
    for path in &config.level_tables {
        match WordLevelIndex::load_from_file(Path::new(path)) {
            Ok(extra) => index = index.merge(extra),
            Err(e) => tracing::warn!("Failed to load word level table {}: {}", path, e),
        }
    }
    tracing::info!("Word level index ready with {} entries", index.len());
    index
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_levels() {
        let index = builtin_index();
        assert_eq!(index.level_of("The"), CefrLevel::A1);
        assert_eq!(index.level_of("guess."), CefrLevel::A2);
        assert_eq!(index.level_of("**context**"), CefrLevel::B2);
        assert_eq!(index.level_of("gist"), CefrLevel::C1);
        assert_eq!(index.level_of("zyzzyva"), CefrLevel::C2);
    }

    #[test]
    fn no_word_is_listed_twice() {
        let total = A1_WORDS.len()
            + A2_WORDS.len()
            + B1_WORDS.len()
            + B2_WORDS.len()
            + C1_WORDS.len()
            + C2_WORDS.len();
        assert_eq!(builtin_index().len(), total);
    }

    #[test]
    fn configured_tables_override_builtin() {
        let mut table = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(table, "context\tC1").unwrap();
        writeln!(table, "zyzzyva\tB1").unwrap();

        let config = DictionaryConfig {
            level_tables: vec![
                table.path().display().to_string(),
                "/does/not/exist.tsv".to_string(),
            ],
            ..DictionaryConfig::default()
        };

        let index = load_index(&config);
        assert_eq!(index.level_of("context"), CefrLevel::C1);
        assert_eq!(index.level_of("zyzzyva"), CefrLevel::B1);
        assert_eq!(index.level_of("guess"), CefrLevel::A2);
    }
}
