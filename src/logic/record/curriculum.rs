//! Curriculum Analyzer
//!
//! Derives "first course unit" and "course completed" from the module /
//! unit code / situation fields when the record carries no explicit flag.

use once_cell::sync::Lazy;
use regex::Regex;

use super::coerce::{to_flag, to_installments, to_number, to_pendency_code};
use super::types::{FieldValue, RecordSchema, StudentRecord};

// ============================================================================
// PATTERNS
// ============================================================================

static FIRST_MODULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(1|1\.0|i|m[oó]dulo 1)$").expect("valid regex"));

static LAST_MODULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(4|4\.0|iv|m[oó]dulo 4|[uú]ltimo)$").expect("valid regex"));

/// Opening unit codes: contain 001, end with 01, or mention INTRO
static FIRST_UNIT_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(001|01$|intro)").expect("valid regex"));

/// Situations meaning the course is done
const COMPLETION_MARKERS: &[&str] = &["FORMADO", "CONCLUÍDO", "CONCLUIDO", "FINALIZADO", "TF"];

// ============================================================================
// ANALYZER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CurriculumAnalyzer {
    schema: RecordSchema,
}

impl CurriculumAnalyzer {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn is_first_unit(&self, record: &StudentRecord) -> bool {
        if let Some(flag) = to_flag(record.get(&self.schema.first_unit)) {
            return flag;
        }

        if module_matches(record.get(&self.schema.current_module), 1.0, &FIRST_MODULE) {
            return true;
        }

        record
            .get(&self.schema.current_unit_code)
            .and_then(FieldValue::as_text)
            .map(|code| !code.is_empty() && FIRST_UNIT_CODE.is_match(&code))
            .unwrap_or(false)
    }

    pub fn is_course_completed(&self, record: &StudentRecord) -> bool {
        if let Some(flag) = to_flag(record.get(&self.schema.course_completed)) {
            return flag;
        }

        let status = record
            .get(&self.schema.enrollment_status)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
            .to_uppercase();
        if COMPLETION_MARKERS.iter().any(|m| status.contains(m)) {
            return true;
        }

        module_matches(record.get(&self.schema.current_module), 4.0, &LAST_MODULE)
    }

    /// Coerce a raw record into the facts the rule cascade reads
    pub fn facts(&self, record: &StudentRecord) -> StudentFacts {
        StudentFacts {
            consecutive_absences: to_number(record.get(&self.schema.consecutive_absences)),
            pending_installments: to_installments(record.get(&self.schema.pending_installments)),
            academic_pendency: to_pendency_code(record.get(&self.schema.academic_pendency)),
            first_unit: self.is_first_unit(record),
            course_completed: self.is_course_completed(record),
        }
    }
}

fn module_matches(value: Option<&FieldValue>, number: f64, pattern: &Regex) -> bool {
    match value {
        Some(FieldValue::Number(n)) => *n == number,
        Some(other) => other
            .as_text()
            .map(|s| pattern.is_match(&s))
            .unwrap_or(false),
        None => false,
    }
}

// ============================================================================
// STUDENT FACTS
// ============================================================================

/// Coerced view of a record. Every field has a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFacts {
    pub consecutive_absences: f64,
    pub pending_installments: f64,
    /// Trimmed, uppercased; "" when absent
    pub academic_pendency: String,
    pub first_unit: bool,
    pub course_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> CurriculumAnalyzer {
        CurriculumAnalyzer::default()
    }

    #[test]
    fn test_explicit_flag_wins() {
        let record = StudentRecord::new()
            .with("first_unit", false)
            .with("current_module", 1.0);
        assert!(!analyzer().is_first_unit(&record));
    }

    #[test]
    fn test_first_unit_from_module() {
        for module in ["1", "1.0", "I", "Módulo 1", "modulo 1"] {
            let record = StudentRecord::new().with("current_module", module);
            assert!(analyzer().is_first_unit(&record), "module {}", module);
        }
        let record = StudentRecord::new().with("current_module", 1.0);
        assert!(analyzer().is_first_unit(&record));

        let record = StudentRecord::new().with("current_module", "2");
        assert!(!analyzer().is_first_unit(&record));
    }

    #[test]
    fn test_first_unit_from_unit_code() {
        for code in ["ENF001", "ELT-001-A", "ADM01", "intro_farm"] {
            let record = StudentRecord::new().with("current_unit_code", code);
            assert!(analyzer().is_first_unit(&record), "code {}", code);
        }
        let record = StudentRecord::new().with("current_unit_code", "ENF210");
        assert!(!analyzer().is_first_unit(&record));
    }

    #[test]
    fn test_course_completed() {
        let record = StudentRecord::new().with("enrollment_status", "Formado");
        assert!(analyzer().is_course_completed(&record));

        let record = StudentRecord::new().with("current_module", "IV");
        assert!(analyzer().is_course_completed(&record));

        let record = StudentRecord::new().with("current_module", 4.0);
        assert!(analyzer().is_course_completed(&record));

        let record = StudentRecord::new().with("enrollment_status", "Ativo");
        assert!(!analyzer().is_course_completed(&record));
    }

    #[test]
    fn test_facts_from_spreadsheet_schema() {
        let analyzer = CurriculumAnalyzer::new(RecordSchema::spreadsheet());
        let record = StudentRecord::new()
            .with("Faltas Consecutivas", "7")
            .with("Pend. Financ.", "PC")
            .with("Pend. Acad.", "pr")
            .with("Módulo atual", "1");

        let facts = analyzer.facts(&record);
        assert_eq!(facts.consecutive_absences, 7.0);
        assert_eq!(facts.pending_installments, 0.0);
        assert_eq!(facts.academic_pendency, "PR");
        assert!(facts.first_unit);
        assert!(!facts.course_completed);
    }
}
