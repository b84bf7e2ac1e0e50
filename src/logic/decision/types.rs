//! Decision Types
//!
//! Classifier input, final decision and its audit fields.
//! NO logic here beyond small constructors and lookups.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};
use crate::logic::explain::{DecodeWarning, FeatureContribution, PrimaryFactor};
use crate::logic::rules::{Category, RuleId};
use crate::logic::urgency::{Status, UrgencyLevel};

// ============================================================================
// CLASS LIST
// ============================================================================

/// The classifier's fixed class-name list, resolved to categories.
/// Position = class index in probability vectors and attribution tensors.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassList {
    labels: Vec<String>,
    categories: Vec<Category>,
}

impl ClassList {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> EngineResult<Self> {
        if labels.is_empty() {
            return Err(EngineError::EmptyClassList);
        }
        let categories = labels
            .iter()
            .map(|l| {
                Category::from_label(l.as_ref())
                    .ok_or_else(|| EngineError::UnknownCategory(l.as_ref().to_string()))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            categories,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<Category> {
        self.categories.get(index).copied()
    }

    /// Exact label first, then any label resolving to the same category
    pub fn index_of(&self, label: &str) -> Option<usize> {
        if let Some(i) = self.labels.iter().position(|l| l == label) {
            return Some(i);
        }
        let category = Category::from_label(label)?;
        self.categories.iter().position(|c| *c == category)
    }
}

// ============================================================================
// CLASSIFIER OUTPUT
// ============================================================================

/// Pre-computed prediction for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub predicted_class: String,
    pub probabilities: Vec<f64>,
}

impl ClassifierOutput {
    pub fn new(predicted_class: &str, probabilities: Vec<f64>) -> Self {
        Self {
            predicted_class: predicted_class.to_string(),
            probabilities,
        }
    }

    /// Top-1 probability (NaN ignored, 0 when empty)
    pub fn top_probability(&self) -> f64 {
        self.probabilities
            .iter()
            .copied()
            .filter(|p| !p.is_nan())
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))))
            .unwrap_or(0.0)
    }

    /// Index of the highest probability among the first `limit` classes
    pub fn argmax(&self, limit: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.probabilities.iter().enumerate().take(limit) {
            if p.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, b)| p > b) {
                best = Some((i, p));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// One entry of the model's own class ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRank {
    pub category: Category,
    pub probability: f64,
}

// ============================================================================
// DECISION SOURCE
// ============================================================================

/// Who produced the final category: "RULE:<id>" or "MODEL"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionSource {
    Rule(RuleId),
    Model,
}

impl DecisionSource {
    pub fn from_rule_id(rule_id: RuleId) -> Self {
        if rule_id.is_rule() {
            DecisionSource::Rule(rule_id)
        } else {
            DecisionSource::Model
        }
    }

    pub fn is_rule(&self) -> bool {
        matches!(self, DecisionSource::Rule(_))
    }
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionSource::Rule(id) => write!(f, "RULE:{}", id),
            DecisionSource::Model => write!(f, "MODEL"),
        }
    }
}

impl std::str::FromStr for DecisionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "MODEL" {
            return Ok(DecisionSource::Model);
        }
        let id = s
            .strip_prefix("RULE:")
            .and_then(|id| RuleId::ALL.iter().copied().find(|r| r.is_rule() && r.as_str() == id))
            .ok_or_else(|| format!("invalid decision source: '{}'", s))?;
        Ok(DecisionSource::Rule(id))
    }
}

impl Serialize for DecisionSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DecisionSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// CONFIDENCE LABEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

impl ConfidenceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::Low => "LOW",
            ConfidenceLabel::Medium => "MEDIUM",
            ConfidenceLabel::High => "HIGH",
        }
    }
}

// ============================================================================
// FINAL DECISION
// ============================================================================

/// One student's decision. Built once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub status: Status,
    pub category: Category,
    pub probability: f64,
    pub urgency: UrgencyLevel,
    pub top_positive_features: Vec<FeatureContribution>,
    pub top_negative_features: Vec<FeatureContribution>,
    pub source: DecisionSource,
    pub confidence_label: ConfidenceLabel,
    pub reason: String,

    // Audit: what the model itself said
    pub model_category: Category,
    pub model_probability: f64,
    pub model_ranking: Vec<ModelRank>,
    pub primary_factor: Option<PrimaryFactor>,
}

impl FinalDecision {
    pub fn is_enrolled(&self) -> bool {
        self.status == Status::Enrolled
    }

    /// Rule overrode a different model category
    pub fn overrides_model(&self) -> bool {
        self.source.is_rule() && self.category != self.model_category
    }
}

/// Decision plus whatever degraded while building it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDecision {
    pub decision: FinalDecision,
    pub warnings: Vec<DecodeWarning>,
}

impl SampleDecision {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_resolves_codes_and_descriptions() {
        let classes = ClassList::new(&["Matriculado", "LFI", "Nunca Compareceu"]).unwrap();
        assert_eq!(classes.len(), 3);
        assert_eq!(classes.category(0), Some(Category::MT));
        assert_eq!(classes.category(2), Some(Category::NC));
        assert_eq!(classes.index_of("LFI"), Some(1));
        assert_eq!(classes.index_of("MT"), Some(0));
        assert_eq!(classes.index_of("CAC"), None);
    }

    #[test]
    fn test_class_list_rejects_unknown_and_empty() {
        assert!(matches!(
            ClassList::new(&["MT", "Classe_9"]),
            Err(EngineError::UnknownCategory(ref l)) if l == "Classe_9"
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(ClassList::new(&empty), Err(EngineError::EmptyClassList)));
    }

    #[test]
    fn test_top_probability_and_argmax() {
        let out = ClassifierOutput::new("LFI", vec![0.1, 0.6, f64::NAN, 0.3]);
        assert_eq!(out.top_probability(), 0.6);
        assert_eq!(out.argmax(4), Some(1));
        assert_eq!(out.argmax(1), Some(0));
        assert_eq!(ClassifierOutput::new("MT", vec![]).top_probability(), 0.0);
    }

    #[test]
    fn test_decision_source_string_form() {
        assert_eq!(DecisionSource::Rule(RuleId::LFI).to_string(), "RULE:LFI");
        assert_eq!(DecisionSource::Model.to_string(), "MODEL");
        assert_eq!(DecisionSource::from_rule_id(RuleId::Model), DecisionSource::Model);

        let json = serde_json::to_string(&DecisionSource::Rule(RuleId::NC)).unwrap();
        assert_eq!(json, "\"RULE:NC\"");
        let back: DecisionSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DecisionSource::Rule(RuleId::NC));

        assert!("RULE:MODEL".parse::<DecisionSource>().is_err());
        assert!("RULE:XYZ".parse::<DecisionSource>().is_err());
    }
}
