//! Numeric / categorical coercion of raw field values.
//!
//! Policy: anything that is not a usable number becomes 0. Never fails.

use super::types::FieldValue;

/// "Fully paid" sentinel in the pending-installments column
pub const FULLY_PAID_SENTINEL: &str = "PC";

/// Academic-pendency codes that always mean "pending"
pub const PENDENCY_CODES: &[&str] = &["PR", "PV", "PF"];

/// Academic-pendency values that mean "nothing pending"
pub const NO_PENDENCY_VALUES: &[&str] = &["", "NO", "NÃO", "NAO", "NAN", "NONE"];

/// Missing, NaN, infinite or non-numeric -> 0
pub fn to_number(value: Option<&FieldValue>) -> f64 {
    match value {
        Some(FieldValue::Number(n)) if n.is_finite() => *n,
        Some(FieldValue::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(FieldValue::Text(s)) => parse_number(s),
        _ => 0.0,
    }
}

/// Same as `to_number`, plus the fully-paid sentinel (case-insensitive) -> 0
pub fn to_installments(value: Option<&FieldValue>) -> f64 {
    match value {
        Some(FieldValue::Text(s)) if s.trim().eq_ignore_ascii_case(FULLY_PAID_SENTINEL) => 0.0,
        other => to_number(other),
    }
}

/// Normalized academic-pendency code: trimmed and uppercased, "" when missing
pub fn to_pendency_code(value: Option<&FieldValue>) -> String {
    value
        .and_then(FieldValue::as_text)
        .map(|s| s.to_uppercase())
        .unwrap_or_default()
}

pub fn has_academic_pendency(code: &str) -> bool {
    let code = code.trim().to_uppercase();
    if PENDENCY_CODES.contains(&code.as_str()) {
        return true;
    }
    !NO_PENDENCY_VALUES.contains(&code.as_str())
}

/// Explicit boolean flag; None when the field is absent or unreadable
pub fn to_flag(value: Option<&FieldValue>) -> Option<bool> {
    match value? {
        FieldValue::Bool(b) => Some(*b),
        FieldValue::Number(n) if n.is_finite() => Some(*n != 0.0),
        FieldValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "sim" | "s" | "y" | "1" => Some(true),
            "false" | "no" | "não" | "nao" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    s.parse::<f64>()
        .or_else(|_| s.replace(',', ".").parse::<f64>())
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_to_number_coerces_garbage_to_zero() {
        assert_eq!(to_number(None), 0.0);
        assert_eq!(to_number(Some(&FieldValue::Null)), 0.0);
        assert_eq!(to_number(Some(&FieldValue::Number(f64::NAN))), 0.0);
        assert_eq!(to_number(Some(&text("abc"))), 0.0);
        assert_eq!(to_number(Some(&text(" 12 "))), 12.0);
        assert_eq!(to_number(Some(&text("2,5"))), 2.5);
        assert_eq!(to_number(Some(&FieldValue::Number(7.0))), 7.0);
    }

    #[test]
    fn test_fully_paid_sentinel() {
        assert_eq!(to_installments(Some(&text("PC"))), 0.0);
        assert_eq!(to_installments(Some(&text("pc"))), 0.0);
        assert_eq!(to_installments(Some(&text("3"))), 3.0);
        assert_eq!(to_installments(Some(&FieldValue::Number(2.0))), 2.0);
    }

    #[test]
    fn test_academic_pendency() {
        assert!(has_academic_pendency("PR"));
        assert!(has_academic_pendency("pv"));
        assert!(has_academic_pendency("PF"));
        assert!(has_academic_pendency("XYZ"));
        assert!(!has_academic_pendency(""));
        assert!(!has_academic_pendency("no"));
        assert!(!has_academic_pendency("Não"));
        assert!(!has_academic_pendency("nan"));
        assert!(!has_academic_pendency("None"));
    }

    #[test]
    fn test_pendency_code_from_missing_is_empty() {
        assert_eq!(to_pendency_code(None), "");
        assert_eq!(to_pendency_code(Some(&FieldValue::Null)), "");
        assert_eq!(to_pendency_code(Some(&text(" pr "))), "PR");
    }

    #[test]
    fn test_flags() {
        assert_eq!(to_flag(Some(&FieldValue::Bool(true))), Some(true));
        assert_eq!(to_flag(Some(&text("Sim"))), Some(true));
        assert_eq!(to_flag(Some(&FieldValue::Number(0.0))), Some(false));
        assert_eq!(to_flag(Some(&text("maybe"))), None);
        assert_eq!(to_flag(None), None);
    }
}
