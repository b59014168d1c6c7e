//! TF-IDF feature vectorizer adapter.
//!
//! Wraps a vectorizer that was fitted once, offline, by the model-training
//! pipeline and exported as a JSON artifact (vocabulary map plus per-feature
//! IDF weights). At runtime the adapter is a stateless, read-only transform:
//! cleaned text in, fixed-dimension feature vector out.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pre-fitted TF-IDF vectorizer over a fixed vocabulary.
///
/// The vocabulary and IDF weights are established at fit time and never
/// change for the lifetime of the loaded artifact. Out-of-vocabulary tokens
/// contribute nothing, matching standard sparse-vectorizer semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Word to feature-index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Creates a vectorizer from an already-fitted vocabulary and IDF table.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Self {
        Self { vocabulary, idf }
    }

    /// Number of features (the fixed dimensionality of produced vectors).
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Verifies internal consistency of a deserialized artifact.
    ///
    /// Every vocabulary entry must map inside the IDF table.
    pub fn check(&self) -> Result<(), String> {
        for (word, &index) in &self.vocabulary {
            if index >= self.idf.len() {
                return Err(format!(
                    "vocabulary entry '{}' maps to index {} but only {} IDF weights are present",
                    word,
                    index,
                    self.idf.len()
                ));
            }
        }
        Ok(())
    }

    /// Transforms a cleaned token string into an L2-normalized TF-IDF vector.
    ///
    /// Total function: any input, including the empty string, yields a valid
    /// (possibly all-zero) vector of dimension [`Self::n_features`].
    pub fn transform(&self, cleaned: &str) -> Array1<f32> {
        let mut vector = Array1::<f32>::zeros(self.n_features());

        let mut token_count = 0usize;
        for token in cleaned.split_whitespace() {
            token_count += 1;
            if let Some(&index) = self.vocabulary.get(token) {
                vector[index] += 1.0;
            }
        }
        if token_count == 0 {
            return vector;
        }

        let total = token_count as f32;
        for (index, value) in vector.iter_mut().enumerate() {
            *value = (*value / total) * self.idf[index];
        }

        let norm: f32 = vector.iter().map(|&v| v * v).sum::<f32>().sqrt();
        if norm > 1e-10 {
            vector.mapv_inplace(|v| v / norm);
        }
        vector
    }

    /// Returns the vocabulary in feature-index order.
    ///
    /// Index positions with no vocabulary entry (possible only in a
    /// hand-built artifact) come back as empty strings.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.n_features()];
        for (word, &index) in &self.vocabulary {
            if index < names.len() {
                names[index] = word.clone();
            }
        }
        names
    }
}
