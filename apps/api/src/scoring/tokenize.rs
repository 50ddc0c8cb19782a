//! Tokenizer/normalizer for the match scorer. Produces the unique term set
//! of a text block: lower-cased, whitespace-collapsed, stop-word filtered.

use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

/// Bilingual (Turkish/English) stop-word list. Function words only; domain
/// terms like "deneyim" stay scoreable.
const STOP_WORDS: &[&str] = &[
    // English
    "a", "about", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at", "be",
    "been", "before", "but", "by", "can", "could", "did", "do", "does", "each", "for", "from",
    "had", "has", "have", "he", "her", "him", "his", "if", "in", "into", "is", "it", "its",
    "just", "more", "most", "no", "not", "of", "on", "once", "only", "or", "other", "our",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "these", "they", "this", "those", "to", "too", "under", "very",
    "was", "we", "were", "will", "with", "would", "you", "your",
    // Turkish
    "ama", "ancak", "arasında", "bana", "ben", "bir", "biz", "bu", "da", "daha", "de", "diye",
    "en", "fakat", "gibi", "göre", "hem", "her", "ile", "için", "ise", "kadar", "ki", "mi",
    "mu", "mü", "ne", "olan", "olarak", "olduğu", "olup", "onlar", "sen", "siz", "sonra",
    "şey", "şu", "var", "ve", "veya", "ya", "yok", "çok", "önce", "üzere", "çünkü",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Splits `text` into its unique set of normalized terms.
///
/// Lower-cases, maps the Unicode soft hyphen (U+00AD) to a space, collapses
/// whitespace, then drops tokens shorter than 2 characters and tokens on the
/// stop-word list. Empty input yields an empty set, never an error.
///
/// A `BTreeSet` keeps iteration lexicographic, so downstream output (matched
/// keyword lists) is reproducible across runs.
pub fn normalize_tokenize(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase().replace('\u{00AD}', " ");
    lowered
        .split_whitespace()
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !stop_words().contains(*token))
        .map(|token| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(normalize_tokenize("").is_empty());
        assert!(normalize_tokenize("   \t\n  ").is_empty());
    }

    #[test]
    fn test_stop_words_are_excluded() {
        let terms = normalize_tokenize("the quick and the dead");
        let expected: BTreeSet<String> = ["quick", "dead"].iter().map(|s| s.to_string()).collect();
        assert_eq!(terms, expected);
    }

    #[test]
    fn test_turkish_stop_words_are_excluded() {
        let terms = normalize_tokenize("React ve TypeScript ile backend geliştirme");
        assert!(terms.contains("react"));
        assert!(terms.contains("typescript"));
        assert!(terms.contains("backend"));
        assert!(!terms.contains("ve"));
        assert!(!terms.contains("ile"));
    }

    #[test]
    fn test_single_character_tokens_are_dropped() {
        let terms = normalize_tokenize("I have 3 years of C experience");
        assert!(!terms.contains("i"));
        assert!(!terms.contains("3"));
        assert!(!terms.contains("c"));
        assert!(terms.contains("years"));
        assert!(terms.contains("experience"));
    }

    #[test]
    fn test_lowercasing_and_whitespace_collapse() {
        let terms = normalize_tokenize("  React\t\tTypeScript \n Backend ");
        let expected: BTreeSet<String> = ["react", "typescript", "backend"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(terms, expected);
    }

    #[test]
    fn test_soft_hyphen_splits_tokens() {
        // U+00AD inside a word behaves like whitespace after normalization
        let terms = normalize_tokenize("Type\u{00AD}Script");
        assert!(terms.contains("type"));
        assert!(terms.contains("script"));
        assert!(!terms.contains("typescript"));
    }

    #[test]
    fn test_duplicates_collapse_to_unique_terms() {
        let terms = normalize_tokenize("rust rust RUST Rust");
        assert_eq!(terms.len(), 1);
        assert!(terms.contains("rust"));
    }

    #[test]
    fn test_iteration_order_is_lexicographic() {
        let terms = normalize_tokenize("zebra apple mango");
        let ordered: Vec<&String> = terms.iter().collect();
        assert_eq!(ordered, ["apple", "mango", "zebra"]);
    }
}
