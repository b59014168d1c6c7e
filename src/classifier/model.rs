//! Inference adapters around opaque pre-trained model artifacts.
//!
//! Training happens entirely outside this crate; the offline pipeline exports
//! each fitted model as a JSON artifact (coefficients for the linear models,
//! node arrays for the forest). The adapters here only run the decision rule
//! and expose per-feature weights for the importance view.

use ndarray::{Array1, Array2, Axis};
use serde::Deserialize;

use super::error::ClassifierError;

/// A loaded classifier: produces a class index for a feature vector and may
/// expose per-feature importance weights.
pub trait Inference: Send + Sync {
    /// Returns the class index with the highest score under this model's
    /// decision rule.
    fn predict(&self, features: &Array1<f32>) -> Result<usize, ClassifierError>;

    /// One importance scalar per feature, when the model can provide them.
    ///
    /// Linear models report the mean absolute coefficient across classes;
    /// the forest reports its stored impurity-based importances. Models
    /// without either return `None`.
    fn feature_weights(&self) -> Option<Array1<f32>> {
        None
    }

    /// Input dimensionality this model was trained on.
    fn n_features(&self) -> usize;
}

/// Index of the first maximum. Ties go to the lowest index, which keeps the
/// decision rule deterministic.
pub(crate) fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (index, &value) in scores.iter().enumerate() {
        if value > scores[best] {
            best = index;
        }
    }
    best
}

/// Serialized form of a fitted linear model.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearArtifact {
    /// Per-class coefficient rows, `[n_classes][n_features]`.
    pub coef: Vec<Vec<f32>>,
    /// Per-class intercepts, length `n_classes`.
    pub intercept: Vec<f32>,
}

/// A linear classifier (SVM or logistic regression) over TF-IDF features.
#[derive(Debug, Clone)]
pub struct LinearModel {
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

impl LinearModel {
    /// Validates and adopts a deserialized artifact.
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, ClassifierError> {
        let rows = artifact.coef.len();
        if rows == 0 {
            return Err(ClassifierError::Classification(
                "linear artifact has no coefficient rows".into(),
            ));
        }
        let cols = artifact.coef[0].len();
        if artifact.coef.iter().any(|row| row.len() != cols) {
            return Err(ClassifierError::Classification(
                "linear artifact has a ragged coefficient matrix".into(),
            ));
        }
        if artifact.intercept.len() != rows {
            return Err(ClassifierError::Classification(format!(
                "linear artifact has {} coefficient rows but {} intercepts",
                rows,
                artifact.intercept.len()
            )));
        }

        let flat: Vec<f32> = artifact.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((rows, cols), flat).map_err(|e| {
            ClassifierError::Classification(format!("invalid coefficient matrix shape: {}", e))
        })?;
        Ok(Self {
            coef,
            intercept: Array1::from(artifact.intercept),
        })
    }

    pub fn n_classes(&self) -> usize {
        self.coef.nrows()
    }
}

impl Inference for LinearModel {
    fn predict(&self, features: &Array1<f32>) -> Result<usize, ClassifierError> {
        if features.len() != self.coef.ncols() {
            return Err(ClassifierError::Classification(format!(
                "feature vector has {} dimensions, model expects {}",
                features.len(),
                self.coef.ncols()
            )));
        }
        let scores = self.coef.dot(features) + &self.intercept;
        Ok(argmax(scores.as_slice().unwrap_or(&[])))
    }

    fn feature_weights(&self) -> Option<Array1<f32>> {
        let n_classes = self.coef.nrows() as f32;
        Some(self.coef.mapv(f32::abs).sum_axis(Axis(0)) / n_classes)
    }

    fn n_features(&self) -> usize {
        self.coef.ncols()
    }
}

/// Serialized decision tree in struct-of-arrays form, one entry per node.
/// Internal nodes carry a split; leaves have `feature == -1` and a class
/// distribution in `value`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub feature: Vec<i32>,
    pub threshold: Vec<f32>,
    pub left: Vec<i32>,
    pub right: Vec<i32>,
    pub value: Vec<Vec<f32>>,
}

/// Serialized form of a fitted random forest.
#[derive(Debug, Clone, Deserialize)]
pub struct ForestArtifact {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<Tree>,
    /// Impurity-based importances computed at training time.
    pub feature_importances: Vec<f32>,
}

/// A random-forest classifier: averages leaf class distributions over trees.
#[derive(Debug, Clone)]
pub struct ForestModel {
    artifact: ForestArtifact,
}

impl ForestModel {
    /// Validates and adopts a deserialized artifact.
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, ClassifierError> {
        if artifact.trees.is_empty() {
            return Err(ClassifierError::Classification(
                "forest artifact contains no trees".into(),
            ));
        }
        if artifact.feature_importances.len() != artifact.n_features {
            return Err(ClassifierError::Classification(format!(
                "forest artifact has {} importances for {} features",
                artifact.feature_importances.len(),
                artifact.n_features
            )));
        }
        for (index, tree) in artifact.trees.iter().enumerate() {
            let nodes = tree.feature.len();
            if nodes == 0
                || tree.threshold.len() != nodes
                || tree.left.len() != nodes
                || tree.right.len() != nodes
                || tree.value.len() != nodes
            {
                return Err(ClassifierError::Classification(format!(
                    "forest artifact tree {} has inconsistent node arrays",
                    index
                )));
            }
        }
        Ok(Self { artifact })
    }

    fn corrupt(detail: &str) -> ClassifierError {
        ClassifierError::Classification(format!("corrupt forest artifact: {}", detail))
    }

    /// Walks one tree down to a leaf and returns its class distribution.
    fn tree_distribution<'a>(
        tree: &'a Tree,
        features: &Array1<f32>,
    ) -> Result<&'a [f32], ClassifierError> {
        let mut node = 0usize;
        let mut steps = 0usize;
        loop {
            let feature = *tree
                .feature
                .get(node)
                .ok_or_else(|| Self::corrupt("node index out of range"))?;
            if feature < 0 {
                return tree
                    .value
                    .get(node)
                    .map(|v| v.as_slice())
                    .ok_or_else(|| Self::corrupt("leaf without class distribution"));
            }

            let feature = feature as usize;
            let observed = features.get(feature).copied().ok_or_else(|| {
                ClassifierError::Classification(format!(
                    "tree references feature {} but input has {} dimensions",
                    feature,
                    features.len()
                ))
            })?;
            let threshold = *tree
                .threshold
                .get(node)
                .ok_or_else(|| Self::corrupt("missing threshold"))?;
            let next = if observed <= threshold {
                tree.left[node]
            } else {
                tree.right[node]
            };
            if next < 0 {
                return Err(Self::corrupt("split points to a missing child"));
            }
            node = next as usize;

            steps += 1;
            if steps > tree.feature.len() {
                return Err(Self::corrupt("cycle detected while walking a tree"));
            }
        }
    }
}

impl Inference for ForestModel {
    fn predict(&self, features: &Array1<f32>) -> Result<usize, ClassifierError> {
        let mut totals = vec![0.0f32; self.artifact.n_classes];
        for tree in &self.artifact.trees {
            let distribution = Self::tree_distribution(tree, features)?;
            if distribution.len() != totals.len() {
                return Err(Self::corrupt("leaf distribution has wrong class count"));
            }
            for (total, &share) in totals.iter_mut().zip(distribution) {
                *total += share;
            }
        }
        Ok(argmax(&totals))
    }

    fn feature_weights(&self) -> Option<Array1<f32>> {
        Some(Array1::from(self.artifact.feature_importances.clone()))
    }

    fn n_features(&self) -> usize {
        self.artifact.n_features
    }
}

/// Majority vote over a set of already-loaded base models.
///
/// Ties break toward the lowest class index. The ensemble exposes no feature
/// weights of its own.
pub struct VotingEnsemble {
    members: Vec<std::sync::Arc<dyn Inference>>,
    n_classes: usize,
}

impl VotingEnsemble {
    pub fn new(
        members: Vec<std::sync::Arc<dyn Inference>>,
        n_classes: usize,
    ) -> Result<Self, ClassifierError> {
        if members.is_empty() {
            return Err(ClassifierError::Classification(
                "voting ensemble needs at least one member".into(),
            ));
        }
        Ok(Self { members, n_classes })
    }
}

impl Inference for VotingEnsemble {
    fn predict(&self, features: &Array1<f32>) -> Result<usize, ClassifierError> {
        let mut votes = vec![0.0f32; self.n_classes];
        for member in &self.members {
            let class = member.predict(features)?;
            let slot = votes.get_mut(class).ok_or_else(|| {
                ClassifierError::Classification(format!(
                    "ensemble member voted for out-of-range class {}",
                    class
                ))
            })?;
            *slot += 1.0;
        }
        Ok(argmax(&votes))
    }

    fn n_features(&self) -> usize {
        self.members[0].n_features()
    }
}
