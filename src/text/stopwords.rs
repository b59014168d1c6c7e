//! English stop word table used by the normalizer.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Default English stop words.
///
/// Matches the usual NLTK-style list, restricted to purely alphabetic
/// entries since the normalizer discards apostrophes before filtering.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
    "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = ENGLISH_STOP_WORDS.iter().copied().collect();
}

/// Returns true if `word` is an English stop word.
///
/// Lookup is exact; callers are expected to lowercase first.
pub fn is_stopword(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_stopwords() {
        assert!(is_stopword("the"));
        assert!(is_stopword("and"));
        assert!(is_stopword("myself"));
        assert!(is_stopword("wouldn"));
    }

    #[test]
    fn test_content_words_pass() {
        assert!(!is_stopword("anxiety"));
        assert!(!is_stopword("hopeless"));
        assert!(!is_stopword("dont"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(!is_stopword("The"));
    }
}
