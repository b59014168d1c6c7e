//! Loading of pre-trained model artifacts from disk.
//!
//! The training pipeline runs offline and exports each fitted component as a
//! JSON file: the TF-IDF vectorizer plus one file per base classifier. This
//! module resolves the artifact directory, optionally verifies file hashes
//! against a manifest, and assembles a ready-to-serve [`Pipeline`].

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::classifier::{
    ClassifierError, ForestArtifact, ForestModel, Inference, LinearArtifact, LinearModel,
    Pipeline, VotingEnsemble,
};
use crate::models::{Label, ModelKind};
use crate::vectorizer::TfidfVectorizer;

/// Artifact file holding the fitted vectorizer.
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// Optional per-directory manifest with expected SHA-256 hashes.
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed artifact {name}: {detail}")]
    Malformed { name: String, detail: String },
    #[error("Hash mismatch for {name}: expected {expected}, got {actual}")]
    HashMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Expected hashes for the files in one artifact directory.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    sha256: HashMap<String, String>,
}

/// Resolves and reads model artifacts from a directory on disk.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    models_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store over the default models directory.
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("MINDGUARD_MODELS") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("mindguard").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("mindguard").join("models");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("mindguard").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> io::Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir)?;
        Ok(Self { models_dir })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Whether every artifact the pipeline needs is present on disk.
    pub fn is_complete(&self) -> bool {
        let mut files = vec![VECTORIZER_FILE];
        files.extend(ModelKind::ALL.iter().filter_map(|kind| kind.artifact_file()));
        files.iter().all(|name| self.models_dir.join(name).exists())
    }

    /// Reads and verifies one artifact file.
    ///
    /// When a manifest is present and names the file, the bytes must match
    /// the recorded SHA-256 hash. Without a manifest entry the read is
    /// unverified.
    fn read_verified(&self, name: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.models_dir.join(name);
        if !path.exists() {
            return Err(ArtifactError::NotFound(path));
        }
        let bytes = fs::read(&path)?;

        if let Some(expected) = self.manifest_hash(name)? {
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            let actual = format!("{:x}", hasher.finalize());
            if actual != expected {
                log::error!("{} hash mismatch: expected {}, got {}", name, expected, actual);
                return Err(ArtifactError::HashMismatch {
                    name: name.to_string(),
                    expected,
                    actual,
                });
            }
            log::debug!("Verified {} against manifest hash", name);
        }
        Ok(bytes)
    }

    fn manifest_hash(&self, name: &str) -> Result<Option<String>, ArtifactError> {
        let path = self.models_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let manifest: Manifest =
            serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Malformed {
                name: MANIFEST_FILE.to_string(),
                detail: e.to_string(),
            })?;
        Ok(manifest.sha256.get(name).cloned())
    }

    /// Loads and deserializes one JSON artifact.
    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, ArtifactError> {
        let bytes = self.read_verified(name)?;
        serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Malformed {
            name: name.to_string(),
            detail: e.to_string(),
        })
    }

    /// Loads every artifact and assembles the full pipeline.
    ///
    /// The three base models are loaded from their own files; the consensus
    /// model is derived from them as a majority-vote ensemble. Every model's
    /// feature dimensionality must match the vectorizer's.
    pub fn load_pipeline(&self) -> Result<Pipeline, ArtifactError> {
        log::info!("Loading model artifacts from {:?}", self.models_dir);

        let vectorizer: TfidfVectorizer = self.load_json(VECTORIZER_FILE)?;
        vectorizer.check().map_err(|detail| ArtifactError::Malformed {
            name: VECTORIZER_FILE.to_string(),
            detail,
        })?;
        let n_features = vectorizer.n_features();
        log::info!("Vectorizer loaded: {} features", n_features);

        let mut models: HashMap<ModelKind, Arc<dyn Inference>> = HashMap::new();
        let mut base_models: Vec<Arc<dyn Inference>> = Vec::new();

        for kind in [ModelKind::Svm, ModelKind::LogisticRegression] {
            let name = kind.artifact_file().unwrap_or_default();
            let artifact: LinearArtifact = self.load_json(name)?;
            let model = LinearModel::from_artifact(artifact)
                .map_err(|e| Self::malformed(name, e))?;
            let model = Self::check_dimensions(name, model, n_features)?;
            base_models.push(Arc::clone(&model));
            models.insert(kind, model);
        }

        let forest_name = ModelKind::RandomForest
            .artifact_file()
            .unwrap_or_default();
        let artifact: ForestArtifact = self.load_json(forest_name)?;
        let forest = ForestModel::from_artifact(artifact)
            .map_err(|e| Self::malformed(forest_name, e))?;
        let forest = Self::check_dimensions(forest_name, forest, n_features)?;
        base_models.push(Arc::clone(&forest));
        models.insert(ModelKind::RandomForest, forest);

        let ensemble = VotingEnsemble::new(base_models, Label::ALL.len())
            .map_err(|e| Self::malformed("consensus", e))?;
        models.insert(ModelKind::Consensus, Arc::new(ensemble));

        log::info!("Pipeline ready: {} models loaded", models.len());
        Ok(Pipeline::new(vectorizer, models))
    }

    fn check_dimensions<M: Inference + 'static>(
        name: &str,
        model: M,
        n_features: usize,
    ) -> Result<Arc<dyn Inference>, ArtifactError> {
        if model.n_features() != n_features {
            return Err(ArtifactError::Malformed {
                name: name.to_string(),
                detail: format!(
                    "model expects {} features but the vectorizer produces {}",
                    model.n_features(),
                    n_features
                ),
            });
        }
        Ok(Arc::new(model))
    }

    fn malformed(name: &str, err: ClassifierError) -> ArtifactError {
        ArtifactError::Malformed {
            name: name.to_string(),
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_fixture_artifacts(dir: &Path) {
        let vectorizer = json!({
            "vocabulary": {"racing": 0, "heavy": 1, "routine": 2, "pain": 3},
            "idf": [1.0, 1.0, 1.0, 1.0]
        });
        fs::write(
            dir.join(VECTORIZER_FILE),
            serde_json::to_vec(&vectorizer).unwrap(),
        )
        .unwrap();

        let linear = json!({
            "coef": [
                [2.0, 0.0, 0.0, 0.0],
                [0.0, 2.0, 0.0, 0.0],
                [0.0, 0.0, 2.0, 0.0],
                [0.0, 0.0, 0.0, 2.0]
            ],
            "intercept": [0.0, 0.0, 0.0, 0.0]
        });
        for name in ["svm.json", "logistic_regression.json"] {
            fs::write(dir.join(name), serde_json::to_vec(&linear).unwrap()).unwrap();
        }

        let forest = json!({
            "n_features": 4,
            "n_classes": 4,
            "trees": [{
                "feature": [0, -1, -1],
                "threshold": [0.5, 0.0, 0.0],
                "left": [1, -1, -1],
                "right": [2, -1, -1],
                "value": [[], [0.0, 0.0, 1.0, 0.0], [1.0, 0.0, 0.0, 0.0]]
            }],
            "feature_importances": [0.7, 0.1, 0.1, 0.1]
        });
        fs::write(
            dir.join("random_forest.json"),
            serde_json::to_vec(&forest).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_default_models_dir_honors_env() {
        env::set_var("MINDGUARD_MODELS", "/tmp/mindguard-test-models");
        let path = ArtifactStore::get_default_models_dir();
        assert_eq!(path, PathBuf::from("/tmp/mindguard-test-models"));
        env::remove_var("MINDGUARD_MODELS");

        let path = ArtifactStore::get_default_models_dir();
        assert!(path.to_str().unwrap().contains("mindguard"));
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();
        assert!(!store.is_complete());
        let err = store.load_pipeline().unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_load_pipeline_from_fixture() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path());
        let store = ArtifactStore::new(dir.path()).unwrap();
        assert!(store.is_complete());

        let pipeline = store.load_pipeline().unwrap();
        let info = pipeline.info();
        assert_eq!(info.n_features, 4);
        assert_eq!(info.model_names.len(), 4);

        let label = pipeline.classify("consensus", "racing thoughts").unwrap();
        assert_eq!(label, Label::Anxiety);
    }

    #[test]
    fn test_malformed_artifact_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path());
        fs::write(dir.path().join("svm.json"), b"{ not json").unwrap();

        let store = ArtifactStore::new(dir.path()).unwrap();
        let err = store.load_pipeline().unwrap_err();
        match err {
            ArtifactError::Malformed { name, .. } => assert_eq!(name, "svm.json"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path());
        let narrow = json!({
            "coef": [[1.0, 0.0], [0.0, 1.0]],
            "intercept": [0.0, 0.0]
        });
        fs::write(
            dir.path().join("svm.json"),
            serde_json::to_vec(&narrow).unwrap(),
        )
        .unwrap();

        let store = ArtifactStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.load_pipeline().unwrap_err(),
            ArtifactError::Malformed { .. }
        ));
    }

    #[test]
    fn test_manifest_hash_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path());
        let manifest = json!({
            "sha256": {
                "tfidf_vectorizer.json":
                    "0000000000000000000000000000000000000000000000000000000000000000"
            }
        });
        fs::write(
            dir.path().join(MANIFEST_FILE),
            serde_json::to_vec(&manifest).unwrap(),
        )
        .unwrap();

        let store = ArtifactStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.load_pipeline().unwrap_err(),
            ArtifactError::HashMismatch { .. }
        ));
    }

    #[test]
    fn test_manifest_hash_match_passes() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path());

        let bytes = fs::read(dir.path().join(VECTORIZER_FILE)).unwrap();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());
        let manifest = json!({"sha256": {"tfidf_vectorizer.json": hash}});
        fs::write(
            dir.path().join(MANIFEST_FILE),
            serde_json::to_vec(&manifest).unwrap(),
        )
        .unwrap();

        let store = ArtifactStore::new(dir.path()).unwrap();
        assert!(store.load_pipeline().is_ok());
    }
}
