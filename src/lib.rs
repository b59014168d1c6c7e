//! Mental-health text analysis toolkit.
//!
//! Two independent pipelines:
//!
//! * **Classification** — normalizes free text, vectorizes it with a
//!   pre-fitted TF-IDF model and predicts one of four mental states
//!   (Anxiety, Depression, Normal, Suicidal) with a choice of pre-trained
//!   classifiers, including a majority-vote consensus.
//! * **Risk assessment** — sends text to a hosted generative model with a
//!   fixed assessment prompt and parses the reply into a structured
//!   [`risk::RiskAssessment`] with recommendations and crisis resources.
//!
//! # Example
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mindguard::{ArtifactStore, Label};
//!
//! let pipeline = ArtifactStore::new_default()?.load_pipeline()?;
//! let label = pipeline.classify("consensus", "I can't calm my racing thoughts")?;
//! assert!(Label::ALL.contains(&label));
//!
//! for (word, weight) in pipeline.top_features("svm", 10)? {
//!     println!("{}: {:.4}", word, weight);
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod classifier;
pub mod importance;
pub mod models;
pub mod risk;
pub mod scenario;
pub mod server;
pub mod text;
pub mod vectorizer;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use classifier::{ClassifierError, Pipeline, PipelineInfo};
pub use models::{Label, ModelKind};
pub use risk::{AnalysisError, AnalysisRecord, RiskAnalyzer, RiskAssessment, RiskLevel};
pub use vectorizer::TfidfVectorizer;

pub fn init_logger() {
    env_logger::init();
}
