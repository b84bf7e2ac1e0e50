//! Urgency Classifier
//!
//! Maps the final probability to an intervention urgency bucket.
//! Enrolled students never get an urgency.

use serde::{Deserialize, Serialize};

// ============================================================================
// URGENCY LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    None,
    Low,
    Medium,
    High,
    Urgent,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 5] = [
        UrgencyLevel::None,
        UrgencyLevel::Low,
        UrgencyLevel::Medium,
        UrgencyLevel::High,
        UrgencyLevel::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::None => "NONE",
            UrgencyLevel::Low => "LOW",
            UrgencyLevel::Medium => "MEDIUM",
            UrgencyLevel::High => "HIGH",
            UrgencyLevel::Urgent => "URGENT",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            UrgencyLevel::None => "#10b981",   // Green
            UrgencyLevel::Low => "#84cc16",    // Lime
            UrgencyLevel::Medium => "#f59e0b", // Yellow
            UrgencyLevel::High => "#f97316",   // Orange
            UrgencyLevel::Urgent => "#ef4444", // Red
        }
    }

    pub fn needs_intervention(&self) -> bool {
        matches!(self, UrgencyLevel::High | UrgencyLevel::Urgent)
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// STATUS
// ============================================================================

/// Binary enrollment status of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Enrolled,
    AtRisk,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Enrolled => "ENROLLED",
            Status::AtRisk => "AT_RISK",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THRESHOLDS
// ============================================================================

pub const URGENT_THRESHOLD: f64 = 0.90;
pub const HIGH_THRESHOLD: f64 = 0.80;
pub const MEDIUM_THRESHOLD: f64 = 0.70;

/// Inclusive lower bounds of each bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyThresholds {
    pub urgent: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            urgent: URGENT_THRESHOLD,
            high: HIGH_THRESHOLD,
            medium: MEDIUM_THRESHOLD,
        }
    }
}

impl UrgencyThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0 <= self.medium && self.medium <= self.high && self.high <= self.urgent && self.urgent <= 1.0) {
            return Err(format!(
                "urgency thresholds must satisfy 0 <= medium ({}) <= high ({}) <= urgent ({}) <= 1",
                self.medium, self.high, self.urgent
            ));
        }
        Ok(())
    }

    pub fn classify(&self, status: Status, probability: f64) -> UrgencyLevel {
        if status == Status::Enrolled {
            return UrgencyLevel::None;
        }
        if probability >= self.urgent {
            UrgencyLevel::Urgent
        } else if probability >= self.high {
            UrgencyLevel::High
        } else if probability >= self.medium {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }
}

/// Urgency with default thresholds
pub fn urgency(status: Status, probability: f64) -> UrgencyLevel {
    UrgencyThresholds::default().classify(status, probability)
}
