//! Query normalization.

use regex::Regex;

/// A normalized search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Raw query string, as typed.
    pub raw: String,

    /// Trimmed, lowercased text all scoring rules compare against.
    pub normalized: String,

    /// `\b<normalized>` with the query escaped; `None` for an empty query.
    word_start: Option<Regex>,
}

impl SearchQuery {
    /// Parse a raw query string.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let word_start = if normalized.is_empty() {
            None
        } else {
            // Only fails past the regex size limit; such a query just loses the
            // description signal.
            Regex::new(&format!(r"\b{}", regex::escape(&normalized)))
                .inspect_err(|e| tracing::debug!(error = %e, "Word-boundary pattern rejected"))
                .ok()
        };

        Self {
            raw: raw.to_string(),
            normalized,
            word_start,
        }
    }

    /// Check if the query is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whether the query occurs in `text` starting at a word boundary.
    ///
    /// `text` is expected to be lowercased already. Boundaries are Unicode
    /// aware: accented letters are word characters, so "é" does not start a
    /// word inside "café" while "café" does start one in "au café".
    pub fn matches_word_start(&self, text: &str) -> bool {
        self.word_start
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let query = SearchQuery::parse("  Gin Fizz \t");
        assert_eq!(query.raw, "  Gin Fizz \t");
        assert_eq!(query.normalized, "gin fizz");
        assert!(!query.is_empty());
    }

    #[test]
    fn test_empty_query() {
        assert!(SearchQuery::parse("").is_empty());
        assert!(SearchQuery::parse("   ").is_empty());
        assert!(!SearchQuery::parse("   ").matches_word_start("anything"));
    }

    #[test]
    fn test_word_start() {
        let query = SearchQuery::parse("gin");
        assert!(query.matches_word_start("gin and tonic"));
        assert!(query.matches_word_start("a dry, gin-forward drink"));
        assert!(!query.matches_word_start("a rich, original dish"));
        assert!(!query.matches_word_start("an engine"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let query = SearchQuery::parse("c++");
        assert!(query.matches_word_start("c++ recipes"));

        let query = SearchQuery::parse("(1/2)");
        assert!(!query.matches_word_start("take 12 eggs"));

        let query = SearchQuery::parse(".*");
        assert!(!query.matches_word_start("anything at all"));
    }

    #[test]
    fn test_word_start_is_unicode_aware() {
        assert!(!SearchQuery::parse("é").matches_word_start("café au lait"));
        assert!(SearchQuery::parse("Café").matches_word_start("un petit café"));
        assert!(SearchQuery::parse("crème").matches_word_start("crème brûlée"));
    }
}
