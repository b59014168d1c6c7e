//! Dictionary-less lemmatizer.
//!
//! Reduces English words to a base form using a small irregular-noun table
//! plus morphy-style suffix rules. Part-of-speech agnostic: the same rules
//! apply to every token. Rules are applied repeatedly until the word stops
//! changing, so `lemmatize(lemmatize(w)) == lemmatize(w)` holds for any input.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lives", "life"),
        ("selves", "self"),
    ]
    .iter()
    .copied()
    .collect();
}

/// Reduces a word to its lemma.
///
/// The input is expected to be a lowercase alphabetic token; anything else is
/// returned with only the rules that happen to apply.
pub fn lemmatize(word: &str) -> String {
    let mut current = word.to_string();
    loop {
        let next = reduce(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One rewrite step. Returns the input unchanged when no rule applies.
fn reduce(word: &str) -> String {
    if let Some(&lemma) = IRREGULAR.get(word) {
        return lemma.to_string();
    }

    let n = word.len();
    if n <= 3 {
        return word.to_string();
    }

    if n > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..n - 3]);
    }
    if n > 4 && word.ends_with("ves") {
        return format!("{}f", &word[..n - 3]);
    }
    for suffix in ["ches", "shes", "xes", "zes", "ses"] {
        if word.ends_with(suffix) {
            return word[..n - 2].to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is")
    {
        return word[..n - 1].to_string();
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemmatize("thoughts"), "thought");
        assert_eq!(lemmatize("hands"), "hand");
        assert_eq!(lemmatize("things"), "thing");
    }

    #[test]
    fn test_ies_plurals() {
        assert_eq!(lemmatize("worries"), "worry");
        assert_eq!(lemmatize("flies"), "fly");
    }

    #[test]
    fn test_es_plurals() {
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("wishes"), "wish");
        assert_eq!(lemmatize("churches"), "church");
    }

    #[test]
    fn test_irregulars() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("lives"), "life");
    }

    #[test]
    fn test_protected_endings() {
        assert_eq!(lemmatize("darkness"), "darkness");
        assert_eq!(lemmatize("focus"), "focus");
        assert_eq!(lemmatize("crisis"), "crisis");
    }

    #[test]
    fn test_short_words_unchanged() {
        assert_eq!(lemmatize("gas"), "gas");
        assert_eq!(lemmatize("is"), "is");
    }

    #[test]
    fn test_idempotent() {
        for word in ["worries", "boxes", "children", "serieses", "glasses", "mind"] {
            let once = lemmatize(word);
            assert_eq!(lemmatize(&once), once, "lemma of {:?} not stable", word);
        }
    }
}
