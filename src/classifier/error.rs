use thiserror::Error;

/// Errors from the classification pipeline.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The requested model name is outside the fixed set.
    #[error("Unknown model: {0}")]
    UnknownModel(String),
    /// The label string does not name one of the four categories.
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
    /// Input text was empty or whitespace-only.
    #[error("Input text is empty")]
    EmptyInput,
    /// A model failed while running its decision rule, usually a corrupt
    /// artifact or a dimension mismatch.
    #[error("Classification failed: {0}")]
    Classification(String),
    /// The operation needs a capability the selected model does not have.
    #[error("Unsupported operation for this model: {0}")]
    UnsupportedModel(String),
}
