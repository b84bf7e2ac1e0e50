//! Batch Report
//!
//! What one run produced, ready to serialize: decisions, rule counters,
//! per-sample warnings and a summary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::runner::{BatchOutput, SampleWarning};
use crate::logic::decision::{FinalDecision, RuleFiringCounters};
use crate::logic::explain::FeatureLayout;
use crate::logic::rules::Category;
use crate::logic::urgency::UrgencyLevel;

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub counters: RuleFiringCounters,
    pub warnings: Vec<SampleWarning>,
    pub decisions: Vec<FinalDecision>,
}

impl BatchReport {
    pub fn new(output: BatchOutput, layout: &FeatureLayout) -> Self {
        let summary = BatchSummary::compute(&output, layout);
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            summary,
            counters: output.counters,
            warnings: output.warnings,
            decisions: output.decisions,
        }
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub enrolled: usize,
    pub at_risk: usize,
    pub enrolled_pct: f64,
    pub at_risk_pct: f64,
    /// Needs intervention (HIGH or URGENT)
    pub intervention_needed: usize,
    /// Rule fired with a category different from the model's
    pub rule_overrides: usize,
    /// Samples with at least one warning
    pub degraded_samples: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_urgency: BTreeMap<UrgencyLevel, usize>,
    pub model_confidence: ConfidenceStats,
    /// CRC32 of the feature-name layout
    pub layout_hash: u32,
}

/// Model top-1 probability over the batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfidenceStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl BatchSummary {
    pub fn compute(output: &BatchOutput, layout: &FeatureLayout) -> Self {
        let decisions = &output.decisions;
        let total = decisions.len();
        let enrolled = decisions.iter().filter(|d| d.is_enrolled()).count();
        let at_risk = total - enrolled;

        let mut by_category = BTreeMap::new();
        let mut by_urgency: BTreeMap<UrgencyLevel, usize> =
            UrgencyLevel::ALL.iter().map(|u| (*u, 0)).collect();
        for d in decisions {
            *by_category.entry(d.category).or_insert(0) += 1;
            *by_urgency.entry(d.urgency).or_insert(0) += 1;
        }

        let mut degraded: Vec<usize> = output.warnings.iter().map(|w| w.sample).collect();
        degraded.dedup();

        Self {
            total,
            enrolled,
            at_risk,
            enrolled_pct: percent(enrolled, total),
            at_risk_pct: percent(at_risk, total),
            intervention_needed: decisions.iter().filter(|d| d.urgency.needs_intervention()).count(),
            rule_overrides: decisions.iter().filter(|d| d.overrides_model()).count(),
            degraded_samples: degraded.len(),
            by_category,
            by_urgency,
            model_confidence: confidence_stats(decisions),
            layout_hash: layout.hash(),
        }
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

fn confidence_stats(decisions: &[FinalDecision]) -> ConfidenceStats {
    if decisions.is_empty() {
        return ConfidenceStats::default();
    }
    let values: Vec<f64> = decisions.iter().map(|d| d.model_probability).collect();
    ConfidenceStats {
        mean: values.iter().sum::<f64>() / values.len() as f64,
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}
