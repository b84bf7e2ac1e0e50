//! Rule Cascade Evaluator
//!
//! ONLY evaluation logic - no types, no counters.
//! Input: StudentFacts + model top-1 category/probability
//! Output: RuleOutcome
//!
//! Rules are checked in strict priority order, first match wins.

use super::thresholds::RuleThresholds;
use super::types::{Category, RuleId, RuleOutcome};
use crate::logic::record::{has_academic_pendency, CurriculumAnalyzer, StudentFacts, StudentRecord};

// ============================================================================
// EVALUATOR
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RuleCascade {
    thresholds: RuleThresholds,
    curriculum: CurriculumAnalyzer,
}

impl RuleCascade {
    pub fn new(thresholds: RuleThresholds, curriculum: CurriculumAnalyzer) -> Self {
        Self { thresholds, curriculum }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Evaluate one raw record
    pub fn evaluate(
        &self,
        record: &StudentRecord,
        model_category: Category,
        model_probability: f64,
    ) -> RuleOutcome {
        let facts = self.curriculum.facts(record);
        log::debug!(
            "Evaluating student: absences={}, installments={}, pendency='{}', first_unit={}, completed={}",
            facts.consecutive_absences,
            facts.pending_installments,
            facts.academic_pendency,
            facts.first_unit,
            facts.course_completed
        );
        evaluate_facts(&facts, &self.thresholds, model_category, model_probability)
    }
}

/// Main cascade over already-coerced facts
pub fn evaluate_facts(
    facts: &StudentFacts,
    t: &RuleThresholds,
    model_category: Category,
    model_probability: f64,
) -> RuleOutcome {
    let absences = facts.consecutive_absences;
    let installments = facts.pending_installments;

    // 1. NC, degrading to LFR for heavy absence outside the first unit
    if absences >= t.nc_min_absences {
        if facts.first_unit {
            return outcome(
                Category::NC,
                t.probability_nc,
                format!(">= {} consecutive absences on first course unit", t.nc_min_absences),
                RuleId::NC,
            );
        } else if absences >= t.lfr_min_absences {
            return outcome(
                Category::LFR,
                t.probability_lfr,
                format!(">= {} consecutive absences (not first unit)", t.lfr_min_absences),
                RuleId::LFR,
            );
        }
    }

    // 2. LFI
    if installments >= t.lfi_min_installments {
        return outcome(
            Category::LFI,
            t.probability_lfi,
            format!(">= {} pending installments", t.lfi_min_installments),
            RuleId::LFI,
        );
    }

    // 3. LFR
    if installments > 0.0 && absences >= t.lfr_min_absences {
        return outcome(
            Category::LFR,
            t.probability_lfr,
            format!("pending installments + >= {} consecutive absences", t.lfr_min_absences),
            RuleId::LFR,
        );
    }

    // 4. LAC
    if has_academic_pendency(&facts.academic_pendency) {
        return outcome(
            Category::LAC,
            t.probability_lac,
            format!("academic pendency '{}'", facts.academic_pendency),
            RuleId::LAC,
        );
    }

    // 5. NF
    if facts.course_completed && installments > 0.0 && installments <= t.nf_max_installments {
        return outcome(
            Category::NF,
            t.probability_nf,
            format!("course completed + <= {} pending installments", t.nf_max_installments),
            RuleId::NF,
        );
    }

    // 6. MT
    if installments == 0.0 && absences <= t.mt_max_absences {
        return outcome(
            Category::MT,
            t.probability_mt,
            "no significant pendency".to_string(),
            RuleId::MT,
        );
    }

    RuleOutcome::from_model(model_category, model_probability)
}

fn outcome(category: Category, probability: f64, reason: String, rule_id: RuleId) -> RuleOutcome {
    RuleOutcome {
        category,
        probability,
        reason,
        rule_id,
    }
}

// ============================================================================
// TESTS
// ============================================================================
