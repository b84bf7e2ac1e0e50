//! Decision Module
//!
//! Merges rule outcome, classifier output and attribution into the final
//! per-student decision.
//!
//! ## Structure
//! - `types`: ClassList, ClassifierOutput, FinalDecision, DecisionSource
//! - `counters`: RuleFiringCounters
//! - `merger`: DecisionMerger (per-sample orchestration)

pub mod types;
pub mod counters;
pub mod merger;

pub use types::{
    ClassList, ClassifierOutput, ConfidenceLabel, DecisionSource, FinalDecision, ModelRank,
    SampleDecision,
};
pub use counters::RuleFiringCounters;
pub use merger::{confidence_label, DecisionMerger};
