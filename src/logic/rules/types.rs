//! Rule Types
//!
//! Core types for the rule cascade: categories, rule ids, outcomes.
//! NO logic here - data structures only.

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY (closed set)
// ============================================================================

/// Enrollment situation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Matriculated - no dropout risk detected
    MT,
    /// Financial clean-up
    LFI,
    /// Attendance clean-up
    LFR,
    /// Academic clean-up
    LAC,
    /// Never attended
    NC,
    /// Not graduated
    NF,
    /// Commercial cancellation
    CAC,
    /// Unit cancellation
    CAU,
    /// Transferred
    TR,
    /// Transferred to another class
    TF,
    /// Graduated
    FO,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::MT,
        Category::LFI,
        Category::LFR,
        Category::LAC,
        Category::NC,
        Category::NF,
        Category::CAC,
        Category::CAU,
        Category::TR,
        Category::TF,
        Category::FO,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Category::MT => "MT",
            Category::LFI => "LFI",
            Category::LFR => "LFR",
            Category::LAC => "LAC",
            Category::NC => "NC",
            Category::NF => "NF",
            Category::CAC => "CAC",
            Category::CAU => "CAU",
            Category::TR => "TR",
            Category::TF => "TF",
            Category::FO => "FO",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::MT => "Matriculado",
            Category::LFI => "Limpeza Financeira",
            Category::LFR => "Limpeza de Frequencia",
            Category::LAC => "Limpeza Academica",
            Category::NC => "Nunca Compareceu",
            Category::NF => "Não Formados",
            Category::CAC => "Cancelamento Comercial",
            Category::CAU => "Cancelamento Unidade",
            Category::TR => "Transferido",
            Category::TF => "Transferido para outra turma",
            Category::FO => "Formado",
        }
    }

    /// Resolve a classifier label, either the short code or the description.
    /// Case-insensitive, accents in descriptions optional.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = fold_label(label);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.iter().copied().find(|c| {
            fold_label(c.code()) == wanted || fold_label(c.description()) == wanted
        })
    }

    pub fn is_enrolled(&self) -> bool {
        matches!(self, Category::MT)
    }

    pub fn is_risk(&self) -> bool {
        !self.is_enrolled()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

fn fold_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

// ============================================================================
// RULE ID
// ============================================================================

/// Which rule produced an outcome. `Model` = no rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    NC,
    LFI,
    LFR,
    LAC,
    NF,
    MT,
    #[serde(rename = "MODEL")]
    Model,
}

impl RuleId {
    pub const ALL: [RuleId; 7] = [
        RuleId::NC,
        RuleId::LFI,
        RuleId::LFR,
        RuleId::LAC,
        RuleId::NF,
        RuleId::MT,
        RuleId::Model,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::NC => "NC",
            RuleId::LFI => "LFI",
            RuleId::LFR => "LFR",
            RuleId::LAC => "LAC",
            RuleId::NF => "NF",
            RuleId::MT => "MT",
            RuleId::Model => "MODEL",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            RuleId::NC => 0,
            RuleId::LFI => 1,
            RuleId::LFR => 2,
            RuleId::LAC => 3,
            RuleId::NF => 4,
            RuleId::MT => 5,
            RuleId::Model => 6,
        }
    }

    pub fn is_rule(&self) -> bool {
        !matches!(self, RuleId::Model)
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RULE OUTCOME
// ============================================================================

/// Result of one cascade evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub category: Category,
    pub probability: f64,
    pub reason: String,
    pub rule_id: RuleId,
}

impl RuleOutcome {
    pub fn from_model(category: Category, probability: f64) -> Self {
        Self {
            category,
            probability,
            reason: "model".to_string(),
            rule_id: RuleId::Model,
        }
    }

    pub fn fired_rule(&self) -> bool {
        self.rule_id.is_rule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code_and_description() {
        assert_eq!(Category::from_label("MT"), Some(Category::MT));
        assert_eq!(Category::from_label(" lfi "), Some(Category::LFI));
        assert_eq!(Category::from_label("Limpeza Financeira"), Some(Category::LFI));
        assert_eq!(Category::from_label("nao formados"), Some(Category::NF));
        assert_eq!(Category::from_label("Não Formados"), Some(Category::NF));
        assert_eq!(Category::from_label("Nunca Compareceu"), Some(Category::NC));
        assert_eq!(Category::from_label("Classe_0"), None);
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn test_only_mt_is_enrolled() {
        for c in Category::ALL {
            assert_eq!(c.is_enrolled(), c == Category::MT);
        }
    }

    #[test]
    fn test_rule_id_serializes_model_uppercase() {
        let json = serde_json::to_string(&RuleId::Model).unwrap();
        assert_eq!(json, "\"MODEL\"");
        let json = serde_json::to_string(&RuleId::LFR).unwrap();
        assert_eq!(json, "\"LFR\"");
    }

    #[test]
    fn test_rule_id_indexes_are_dense() {
        for (i, id) in RuleId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
