//! End-to-end tests over artifacts written to a temporary directory.

use std::fs;
use std::path::Path;

use serde_json::json;

use mindguard::{ArtifactStore, ClassifierError, Label, ModelKind, Pipeline};

/// Writes a small but complete artifact set: four vocabulary words, one per
/// class, with agreeing linear models and a depth-one forest.
fn write_artifacts(dir: &Path) {
    let vectorizer = json!({
        "vocabulary": {"racing": 0, "heavy": 1, "routine": 2, "pain": 3},
        "idf": [1.2, 1.1, 1.0, 1.3]
    });
    fs::write(
        dir.join("tfidf_vectorizer.json"),
        serde_json::to_vec_pretty(&vectorizer).unwrap(),
    )
    .unwrap();

    let linear = json!({
        "coef": [
            [3.0, 0.0, 0.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 3.0, 0.0],
            [0.0, 0.0, 0.0, 3.0]
        ],
        "intercept": [0.0, 0.0, 0.0, 0.0]
    });
    for name in ["svm.json", "logistic_regression.json"] {
        fs::write(dir.join(name), serde_json::to_vec_pretty(&linear).unwrap()).unwrap();
    }

    // One stump per tree: split on the "pain" feature toward Suicidal,
    // otherwise Normal.
    let forest = json!({
        "n_features": 4,
        "n_classes": 4,
        "trees": [{
            "feature": [3, -1, -1],
            "threshold": [0.1, 0.0, 0.0],
            "left": [1, -1, -1],
            "right": [2, -1, -1],
            "value": [[], [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]]
        }],
        "feature_importances": [0.1, 0.1, 0.1, 0.7]
    });
    fs::write(
        dir.join("random_forest.json"),
        serde_json::to_vec_pretty(&forest).unwrap(),
    )
    .unwrap();
}

fn load_pipeline(dir: &Path) -> Pipeline {
    write_artifacts(dir);
    ArtifactStore::new(dir).unwrap().load_pipeline().unwrap()
}

#[test]
fn crisis_text_gets_a_label_from_every_model() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    let text = "I can't take this pain anymore. the world would truly be a \
                better place if I wasn't in it. I've made up my mind.";
    for kind in ModelKind::ALL {
        let label = pipeline.classify(kind.as_str(), text).unwrap();
        assert!(
            Label::ALL.contains(&label),
            "{} produced an out-of-set label",
            kind
        );
    }
}

#[test]
fn agreeing_models_predict_the_lit_up_class() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    assert_eq!(
        pipeline.classify("svm", "my heart keeps racing").unwrap(),
        Label::Anxiety
    );
    assert_eq!(
        pipeline
            .classify("consensus", "this pain will not stop")
            .unwrap(),
        Label::Suicidal
    );
    assert_eq!(
        pipeline
            .classify("random_forest", "back to my usual routine")
            .unwrap(),
        Label::Normal
    );
}

#[test]
fn unknown_model_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    let err = pipeline.classify("transformer", "some text").unwrap_err();
    assert!(matches!(err, ClassifierError::UnknownModel(_)));
}

#[test]
fn empty_and_whitespace_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    for text in ["", "   ", "\n\t"] {
        let err = pipeline.classify("svm", text).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyInput));
    }
}

#[test]
fn oov_only_text_still_yields_a_label() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    // Nothing in the vocabulary: zero vector, decided by intercepts/ties.
    let label = pipeline
        .classify("consensus", "zzz qqq completely unknown words")
        .unwrap();
    assert!(Label::ALL.contains(&label));
}

#[test]
fn top_features_are_sorted_and_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    let features = pipeline.top_features("random_forest", 2).unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].0, "pain");
    assert!(features[0].1 >= features[1].1);

    let all = pipeline.top_features("svm", 100).unwrap();
    assert_eq!(all.len(), 4);
}

#[test]
fn consensus_exposes_no_feature_importances() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    let err = pipeline.top_features("consensus", 5).unwrap_err();
    assert!(matches!(err, ClassifierError::UnsupportedModel(_)));
}

#[test]
fn model_names_resolve_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = load_pipeline(dir.path());

    for name in ["SVM", "Logistic Regression", "random forest", "Consensus (Ensemble)"] {
        assert!(pipeline.classify(name, "racing thoughts again").is_ok());
    }
}
