//! Model catalog: the closed set of mental-state labels and the closed set
//! of available pre-trained classifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::classifier::ClassifierError;

/// One of the four mental-state categories the classifiers were trained on.
///
/// The variant order matches the class-index order baked into the shipped
/// model artifacts and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Anxiety,
    Depression,
    Normal,
    Suicidal,
}

impl Label {
    /// All labels, in class-index order.
    pub const ALL: [Label; 4] = [
        Label::Anxiety,
        Label::Depression,
        Label::Normal,
        Label::Suicidal,
    ];

    /// Maps a model's class index back to a label.
    pub fn from_index(index: usize) -> Option<Label> {
        Self::ALL.get(index).copied()
    }

    /// The class index this label occupies in model outputs.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Anxiety => "Anxiety",
            Label::Depression => "Depression",
            Label::Normal => "Normal",
            Label::Suicidal => "Suicidal",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anxiety" => Ok(Label::Anxiety),
            "depression" => Ok(Label::Depression),
            "normal" => Ok(Label::Normal),
            "suicidal" => Ok(Label::Suicidal),
            other => Err(ClassifierError::UnknownLabel(other.to_string())),
        }
    }
}

/// The fixed set of loadable classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Majority vote over the three base models.
    Consensus,
    /// Linear support vector machine.
    Svm,
    LogisticRegression,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Consensus,
        ModelKind::Svm,
        ModelKind::LogisticRegression,
        ModelKind::RandomForest,
    ];

    /// Canonical machine name, used in CLI flags and artifact lookups.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Consensus => "consensus",
            ModelKind::Svm => "svm",
            ModelKind::LogisticRegression => "logistic_regression",
            ModelKind::RandomForest => "random_forest",
        }
    }

    /// Human-facing name shown in model pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Consensus => "Consensus (Ensemble)",
            ModelKind::Svm => "SVM",
            ModelKind::LogisticRegression => "Logistic Regression",
            ModelKind::RandomForest => "Random Forest",
        }
    }

    /// Artifact file backing this model, if it has one of its own.
    ///
    /// The consensus model is derived from the three base models at load
    /// time and has no artifact.
    pub fn artifact_file(self) -> Option<&'static str> {
        match self {
            ModelKind::Consensus => None,
            ModelKind::Svm => Some("svm.json"),
            ModelKind::LogisticRegression => Some("logistic_regression.json"),
            ModelKind::RandomForest => Some("random_forest.json"),
        }
    }

    /// Resolves a model name supplied by a caller.
    ///
    /// Accepts either the canonical machine name or the display name,
    /// case-insensitively; anything else is a caller error.
    pub fn from_name(name: &str) -> Result<ModelKind, ClassifierError> {
        let wanted = name.trim().to_ascii_lowercase();
        for kind in ModelKind::ALL {
            if wanted == kind.as_str() || wanted == kind.display_name().to_ascii_lowercase() {
                return Ok(kind);
            }
        }
        // Common spelling with spaces instead of underscores.
        for kind in ModelKind::ALL {
            if wanted.replace(' ', "_") == kind.as_str() {
                return Ok(kind);
            }
        }
        Err(ClassifierError::UnknownModel(name.to_string()))
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
