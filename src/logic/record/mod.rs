//! Record Module
//!
//! Raw student records and their coercion into rule-ready facts.
//!
//! ## Structure
//! - `types`: StudentRecord, FieldValue, RecordSchema
//! - `coerce`: numeric / sentinel / pendency-code coercion
//! - `curriculum`: first-unit and course-completion detection

pub mod types;
pub mod coerce;
pub mod curriculum;

pub use types::{FieldValue, RecordSchema, StudentRecord};
pub use coerce::{has_academic_pendency, FULLY_PAID_SENTINEL};
pub use curriculum::{CurriculumAnalyzer, StudentFacts};
