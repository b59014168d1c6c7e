//! Text normalization for the classification pipeline.
//!
//! `normalize` is the single entry point: a pure, total, deterministic
//! function from raw user text to a cleaned token string. The cleaned form is
//! lowercase, alphabetic-only, stop-word free, and lemmatized, with tokens
//! joined by single spaces. The same cleaning is applied to training data by
//! the offline pipeline that fits the TF-IDF artifact, so any change here
//! invalidates the shipped artifacts.

mod lemma;
mod stopwords;

pub use lemma::lemmatize;
pub use stopwords::is_stopword;

/// Normalizes raw text into a cleaned token string.
///
/// Steps, in order:
/// 1. Drop every character that is not an ASCII letter or whitespace.
/// 2. Lowercase the remainder.
/// 3. Split on whitespace.
/// 4. Drop English stop words.
/// 5. Lemmatize each surviving token, dropping any token whose lemma is
///    itself a stop word so the result is stable under re-normalization.
/// 6. Rejoin with single spaces.
///
/// Empty input yields an empty string; there is no error case.
///
/// # Example
/// ```
/// use mindguard::text::normalize;
///
/// assert_eq!(normalize("I can't stop my racing thoughts!"), "cant stop racing thought");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphabetic() {
            cleaned.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() {
            cleaned.push(' ');
        }
    }

    cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(lemmatize)
        .filter(|lemma| !is_stopword(lemma))
        .collect::<Vec<_>>()
        .join(" ")
}
