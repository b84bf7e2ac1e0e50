use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One (feature, raw attribution) pair. Empty name = padding placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    pub value: f64,
}

impl FeatureContribution {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            name: String::new(),
            value: 0.0,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

/// Top-K pushers toward / away from the predicted class, always K long
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopFeatures {
    pub positive: Vec<FeatureContribution>,
    pub negative: Vec<FeatureContribution>,
}

impl TopFeatures {
    /// "No attribution available"
    pub fn empty(k: usize) -> Self {
        Self {
            positive: vec![FeatureContribution::placeholder(); k],
            negative: vec![FeatureContribution::placeholder(); k],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positive.iter().chain(self.negative.iter()).all(FeatureContribution::is_placeholder)
    }
}

/// Largest absolute attribution over all classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryFactor {
    pub name: String,
    pub class_index: usize,
    pub value: f64,
}

/// Per-sample degradation. Never aborts a batch.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    #[error("predicted class index {requested} out of range ({available} classes), fell back to class 0")]
    ClassIndexOutOfRange { requested: usize, available: usize },

    #[error("attribution has {slice} features but {names} feature names, truncated to {used}")]
    FeatureCountMismatch { slice: usize, names: usize, used: usize },

    #[error("sample {sample} not present in attribution tensor ({available} samples)")]
    SampleOutOfRange { sample: usize, available: usize },

    #[error("attribution tensor has no classes")]
    EmptyClassDimension,

    #[error("{count} non-finite attribution values ignored")]
    NonFiniteValues { count: usize },

    #[error("predicted class '{label}' is not in the class list, resolved to '{resolved}'")]
    UnknownPredictedClass { label: String, resolved: String },

    #[error("model probability {value} outside [0, 1], clamped")]
    ProbabilityOutOfRange { value: f64 },
}

impl DecodeWarning {
    /// Whether the warning means no attribution could be read at all
    pub fn drops_attribution(&self) -> bool {
        matches!(
            self,
            DecodeWarning::SampleOutOfRange { .. } | DecodeWarning::EmptyClassDimension
        )
    }
}
