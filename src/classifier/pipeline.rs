//! The text-to-prediction pipeline.
//!
//! Wires the normalizer, the TF-IDF adapter and the loaded models into a
//! single thread-safe entry point. All fields are read-only after
//! construction, so one `Pipeline` can be shared across threads with `Arc`
//! and hit from any number of parallel callers without synchronization.

use ndarray::Array1;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::ClassifierError;
use super::model::Inference;
use crate::importance;
use crate::models::{Label, ModelKind};
use crate::text::normalize;
use crate::vectorizer::TfidfVectorizer;

/// A ready-to-serve classification pipeline over loaded artifacts.
pub struct Pipeline {
    vectorizer: Arc<TfidfVectorizer>,
    models: HashMap<ModelKind, Arc<dyn Inference>>,
    feature_names: Vec<String>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .field("n_features", &self.feature_names.len())
            .finish_non_exhaustive()
    }
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Pipeline>();
    }
};

/// Information about the current state of a pipeline.
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    /// Feature-space dimensionality of the loaded vectorizer.
    pub n_features: usize,
    /// Display names of the loaded models.
    pub model_names: Vec<String>,
    /// The closed label set, in class-index order.
    pub labels: Vec<String>,
}

impl Pipeline {
    /// Assembles a pipeline from a loaded vectorizer and model set.
    ///
    /// The map is expected to hold one entry per [`ModelKind`]; the artifact
    /// store takes care of that, including deriving the consensus ensemble.
    pub fn new(vectorizer: TfidfVectorizer, models: HashMap<ModelKind, Arc<dyn Inference>>) -> Self {
        let feature_names = vectorizer.feature_names();
        Self {
            vectorizer: Arc::new(vectorizer),
            models,
            feature_names,
        }
    }

    /// Returns information about the pipeline's current state.
    pub fn info(&self) -> PipelineInfo {
        PipelineInfo {
            n_features: self.vectorizer.n_features(),
            model_names: self
                .models
                .keys()
                .map(|kind| kind.display_name().to_string())
                .collect(),
            labels: Label::ALL.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// The loaded vectorizer.
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Vocabulary in feature-index order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Resolves a caller-supplied model name to a loaded model.
    pub fn select(&self, model_name: &str) -> Result<&Arc<dyn Inference>, ClassifierError> {
        let kind = ModelKind::from_name(model_name)?;
        self.models
            .get(&kind)
            .ok_or_else(|| ClassifierError::UnknownModel(model_name.to_string()))
    }

    /// Runs the selected model on an already-vectorized input.
    pub fn classify_vector(
        &self,
        model_name: &str,
        features: &Array1<f32>,
    ) -> Result<Label, ClassifierError> {
        let model = self.select(model_name)?;
        let class = model.predict(features)?;
        Label::from_index(class).ok_or_else(|| {
            ClassifierError::Classification(format!(
                "model returned out-of-range class index {}",
                class
            ))
        })
    }

    /// Classifies raw text end to end: normalize, vectorize, predict.
    ///
    /// # Errors
    /// * `EmptyInput` when the text is empty or whitespace-only
    /// * `UnknownModel` when the model name is outside the fixed set
    /// * `Classification` when the underlying model call fails
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use mindguard::ArtifactStore;
    ///
    /// let pipeline = ArtifactStore::new_default()?.load_pipeline()?;
    /// let label = pipeline.classify("svm", "My heart races for no reason")?;
    /// println!("Predicted state: {}", label);
    /// # Ok(())
    /// # }
    /// ```
    pub fn classify(&self, model_name: &str, text: &str) -> Result<Label, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }
        let cleaned = normalize(text);
        log::debug!("Cleaned input: {:?}", cleaned);
        let features = self.vectorizer.transform(&cleaned);
        self.classify_vector(model_name, &features)
    }

    /// Top-k most important vocabulary words for the named model.
    ///
    /// See [`importance::top_features`] for ordering guarantees. Models that
    /// expose no weights (the consensus ensemble) yield `UnsupportedModel`.
    pub fn top_features(
        &self,
        model_name: &str,
        k: usize,
    ) -> Result<Vec<(String, f32)>, ClassifierError> {
        let model = self.select(model_name)?;
        importance::top_features(model.as_ref(), &self.feature_names, k)
    }
}
