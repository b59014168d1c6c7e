mod error;
mod model;
mod pipeline;

pub use error::ClassifierError;
pub use model::{
    ForestArtifact, ForestModel, Inference, LinearArtifact, LinearModel, Tree, VotingEnsemble,
};
pub use pipeline::{Pipeline, PipelineInfo};
