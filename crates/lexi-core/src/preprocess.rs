use unicode_normalization::UnicodeNormalization;

/// Word normalization shared by level lookups and dictionary requests
pub trait Preprocessor {
    /// Key used for the word level table: NFKC, lowercase, letters a-z only
    fn level_key(&self, word: &str) -> String {
        word.nfkc()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_ascii_lowercase())
            .collect()
    }

    /// Term sent to the dictionary/translator: lowercase with leading and
    /// trailing punctuation trimmed, inner characters kept ("don't", "e-mail")
    fn lookup_term(&self, token: &str) -> String {
        token
            .to_lowercase()
            .trim_matches(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
            .to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_key_strips_everything_but_letters() {
        let p = DefaultPreprocessor;
        assert_eq!(p.level_key("Context,"), "context");
        assert_eq!(p.level_key("**guess.**"), "guess");
        assert_eq!(p.level_key("don't"), "dont");
        assert_eq!(p.level_key("ＷＯＲＤ"), "word");
        assert_eq!(p.level_key("ﬁne"), "fine");
        assert_eq!(p.level_key("42!"), "");
    }

    #[test]
    fn lookup_term_trims_edges_only() {
        let p = DefaultPreprocessor;
        assert_eq!(p.lookup_term("\"Context,\""), "context");
        assert_eq!(p.lookup_term("don't"), "don't");
        assert_eq!(p.lookup_term("(2024)"), "2024");
        assert_eq!(p.lookup_term("—"), "");
    }
}
