//! Rules Module
//!
//! Deterministic business-rule cascade over one student record.
//! Rules always win over the classifier when one fires.
//!
//! ## Structure
//! - `types`: Category, RuleId, RuleOutcome
//! - `thresholds`: limits and per-rule probabilities
//! - `cascade`: evaluation logic (NC > LFI > LFR > LAC > NF > MT > model)
//!
//! ## Usage
//! ```ignore
//! use dropout_engine::logic::rules::{RuleCascade, Category};
//!
//! let outcome = RuleCascade::default().evaluate(&record, Category::CAC, 0.61);
//! if outcome.fired_rule() {
//!     println!("{} via {}", outcome.category, outcome.rule_id);
//! }
//! ```

pub mod types;
pub mod thresholds;
pub mod cascade;

pub use types::{Category, RuleId, RuleOutcome};
pub use thresholds::RuleThresholds;
pub use cascade::{evaluate_facts, RuleCascade};
