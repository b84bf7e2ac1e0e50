//! Record Types
//!
//! Raw student record as handed over by the ingestion layer.
//! Flat, no nesting, primitive values only.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD VALUE
// ============================================================================

/// One primitive attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Trimmed text form; numbers keep their natural rendering (1.0 -> "1")
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) if n.is_nan() => None,
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.trim().to_string()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

// ============================================================================
// STUDENT RECORD
// ============================================================================

/// Named attributes of one student. Immutable input, owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl StudentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for StudentRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// RECORD SCHEMA (field names)
// ============================================================================

/// Which record fields carry which attribute (configurable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    pub consecutive_absences: String,
    pub pending_installments: String,
    pub academic_pendency: String,
    pub current_module: String,
    pub current_unit_code: String,
    pub enrollment_status: String,
    /// Explicit override; derived from module/unit code when absent
    pub first_unit: String,
    /// Explicit override; derived from status/module when absent
    pub course_completed: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            consecutive_absences: "consecutive_absences".to_string(),
            pending_installments: "pending_installments".to_string(),
            academic_pendency: "academic_pendency".to_string(),
            current_module: "current_module".to_string(),
            current_unit_code: "current_unit_code".to_string(),
            enrollment_status: "enrollment_status".to_string(),
            first_unit: "first_unit".to_string(),
            course_completed: "course_completed".to_string(),
        }
    }
}

impl RecordSchema {
    /// Column names of the institutional spreadsheet export
    pub fn spreadsheet() -> Self {
        Self {
            consecutive_absences: "Faltas Consecutivas".to_string(),
            pending_installments: "Pend. Financ.".to_string(),
            academic_pendency: "Pend. Acad.".to_string(),
            current_module: "Módulo atual".to_string(),
            current_unit_code: "Cód.Disc. atual".to_string(),
            enrollment_status: "Situação".to_string(),
            ..Default::default()
        }
    }
}
