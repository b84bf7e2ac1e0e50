//! Decision Merger
//!
//! Combines rule cascade, classifier output and attribution into one
//! FinalDecision per student. The only place counters are incremented.

use std::cmp::Ordering;

use super::counters::RuleFiringCounters;
use super::types::{
    ClassList, ClassifierOutput, ConfidenceLabel, DecisionSource, FinalDecision, ModelRank,
    SampleDecision,
};
use crate::logic::config::EngineConfig;
use crate::logic::explain::{AttributionExtractor, AttributionTensor, DecodeWarning, FeatureLayout, TopFeatures};
use crate::logic::record::{CurriculumAnalyzer, StudentRecord};
use crate::logic::rules::RuleCascade;
use crate::logic::urgency::{Status, UrgencyThresholds};

/// Model decisions at or above this are labelled High
pub const CONFIDENCE_HIGH: f64 = 0.80;
/// Model decisions at or above this are labelled Medium
pub const CONFIDENCE_MEDIUM: f64 = 0.60;
/// Classes kept in `model_ranking`
pub const MODEL_RANKING_SIZE: usize = 3;

// ============================================================================
// MERGER
// ============================================================================

#[derive(Debug, Clone)]
pub struct DecisionMerger {
    cascade: RuleCascade,
    extractor: AttributionExtractor,
    urgency: UrgencyThresholds,
    classes: ClassList,
}

impl DecisionMerger {
    pub fn new(classes: ClassList, config: &EngineConfig) -> Self {
        Self {
            cascade: RuleCascade::new(
                config.rules.clone(),
                CurriculumAnalyzer::new(config.schema.clone()),
            ),
            extractor: AttributionExtractor::new(config.top_k),
            urgency: config.urgency.clone(),
            classes,
        }
    }

    pub fn with_defaults(classes: ClassList) -> Self {
        Self::new(classes, &EngineConfig::default())
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Decide for one student. `sample` is the row in `tensor`.
    pub fn decide(
        &self,
        sample: usize,
        record: &StudentRecord,
        output: &ClassifierOutput,
        tensor: &AttributionTensor,
        layout: &FeatureLayout,
        counters: &mut RuleFiringCounters,
    ) -> SampleDecision {
        let mut warnings = Vec::new();

        // 1. Model top-1
        let predicted_index = self.predicted_index(output, &mut warnings);
        let model_category = self.classes.categories()[predicted_index];
        let model_probability = clamp_probability(output.top_probability(), &mut warnings);

        // 2. Rules
        let outcome = self.cascade.evaluate(record, model_category, model_probability);
        counters.record(outcome.rule_id);

        // 3. Status and urgency
        let status = if outcome.category.is_enrolled() {
            Status::Enrolled
        } else {
            Status::AtRisk
        };
        let urgency = self.urgency.classify(status, outcome.probability);

        // 4. Attribution for the model's predicted class, whatever the rule said
        let top = match self.extractor.extract(tensor, sample, predicted_index, layout) {
            Ok(extraction) => {
                warnings.extend(extraction.warnings);
                extraction.top
            }
            Err(w) => {
                warnings.push(w);
                TopFeatures::empty(self.extractor.k())
            }
        };
        let primary_factor = self.extractor.primary_factor(tensor, sample, layout);

        for w in &warnings {
            log::warn!("Sample {}: {}", sample, w);
        }

        let source = DecisionSource::from_rule_id(outcome.rule_id);
        log::debug!(
            "Sample {}: {} ({:.2}) via {}, model said {} ({:.2})",
            sample,
            outcome.category,
            outcome.probability,
            source,
            model_category,
            model_probability
        );

        let decision = FinalDecision {
            status,
            category: outcome.category,
            probability: outcome.probability,
            urgency,
            top_positive_features: top.positive,
            top_negative_features: top.negative,
            source,
            confidence_label: confidence_label(source, outcome.probability),
            reason: outcome.reason,
            model_category,
            model_probability,
            model_ranking: self.model_ranking(output),
            primary_factor,
        };

        SampleDecision { decision, warnings }
    }

    /// Class index of the prediction. Unknown names resolve to the argmax.
    fn predicted_index(&self, output: &ClassifierOutput, warnings: &mut Vec<DecodeWarning>) -> usize {
        if let Some(index) = self.classes.index_of(&output.predicted_class) {
            return index;
        }

        let index = output.argmax(self.classes.len()).unwrap_or(0);
        warnings.push(DecodeWarning::UnknownPredictedClass {
            label: output.predicted_class.clone(),
            resolved: self.classes.label(index).unwrap_or_default().to_string(),
        });
        index
    }

    fn model_ranking(&self, output: &ClassifierOutput) -> Vec<ModelRank> {
        let mut ranked: Vec<ModelRank> = self
            .classes
            .categories()
            .iter()
            .zip(output.probabilities.iter())
            .filter(|(_, p)| !p.is_nan())
            .map(|(category, p)| ModelRank {
                category: *category,
                probability: p.clamp(0.0, 1.0),
            })
            .collect();
        ranked.sort_by(|a, b| b.probability.partial_cmp(&a.probability).unwrap_or(Ordering::Equal));
        ranked.truncate(MODEL_RANKING_SIZE);
        ranked
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn clamp_probability(value: f64, warnings: &mut Vec<DecodeWarning>) -> f64 {
    if (0.0..=1.0).contains(&value) {
        return value;
    }
    warnings.push(DecodeWarning::ProbabilityOutOfRange { value });
    value.clamp(0.0, 1.0)
}

/// Rules are always High; model decisions by their own probability
pub fn confidence_label(source: DecisionSource, probability: f64) -> ConfidenceLabel {
    if source.is_rule() || probability >= CONFIDENCE_HIGH {
        ConfidenceLabel::High
    } else if probability >= CONFIDENCE_MEDIUM {
        ConfidenceLabel::Medium
    } else {
        ConfidenceLabel::Low
    }
}

// ============================================================================
// TESTS
// ============================================================================
