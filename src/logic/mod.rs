//! Logic Module - Decision engine
//!
//! Rules first, classifier as fallback, attribution for the explanation.
//!
//! - `record/` - raw student records, coercion, curriculum facts
//! - `rules/` - business-rule cascade
//! - `explain/` - attribution tensor decoding and top features
//! - `urgency` - urgency buckets
//! - `decision/` - per-student merge and rule counters
//! - `batch/` - batch runner and report
//! - `config` - engine configuration

pub mod config;
pub mod record;
pub mod rules;
pub mod explain;
pub mod urgency;
pub mod decision;
pub mod batch;

pub use config::EngineConfig;
