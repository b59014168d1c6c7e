//! Feature-importance extraction for the model-inspection view.

use crate::classifier::{ClassifierError, Inference};

/// Returns the top-k `(word, weight)` pairs for a model over a vocabulary.
///
/// Ordering guarantees:
/// * sorted descending by weight
/// * ties broken by ascending vocabulary index (first-seen order)
/// * length never exceeds `k` or the vocabulary size
///
/// # Errors
/// `UnsupportedModel` when the model exposes neither a coefficient matrix
/// nor an importance array. An empty result is never returned silently in
/// that case.
pub fn top_features(
    model: &dyn Inference,
    vocabulary: &[String],
    k: usize,
) -> Result<Vec<(String, f32)>, ClassifierError> {
    let weights = model.feature_weights().ok_or_else(|| {
        ClassifierError::UnsupportedModel(
            "model exposes neither a coefficient matrix nor an importance array".into(),
        )
    })?;

    let count = weights.len().min(vocabulary.len());
    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by(|&a, &b| {
        weights[b]
            .partial_cmp(&weights[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    order.truncate(k);

    Ok(order
        .into_iter()
        .map(|index| (vocabulary[index].clone(), weights[index]))
        .collect())
}
