//! Rule Thresholds & Probabilities
//!
//! Limits and per-rule probabilities of the cascade.
//! NO evaluation logic here - constants and config only.

use serde::{Deserialize, Serialize};

// ============================================================================
// LIMITS (Constants)
// ============================================================================

/// NC: at least this many consecutive absences on the first unit
pub const NC_MIN_ABSENCES: f64 = 5.0;

/// LFR: at least this many consecutive absences
pub const LFR_MIN_ABSENCES: f64 = 12.0;

/// LFI: at least this many pending installments
pub const LFI_MIN_INSTALLMENTS: f64 = 2.0;

/// NF: at most this many pending installments (and more than zero)
pub const NF_MAX_INSTALLMENTS: f64 = 2.0;

/// MT: at most this many consecutive absences
pub const MT_MAX_ABSENCES: f64 = 4.0;

// ============================================================================
// PROBABILITIES (one constant per rule)
// ============================================================================

pub const PROBABILITY_NC: f64 = 0.95;
pub const PROBABILITY_LFI: f64 = 0.90;
pub const PROBABILITY_LFR: f64 = 0.90;
pub const PROBABILITY_LAC: f64 = 0.85;
pub const PROBABILITY_NF: f64 = 0.80;
pub const PROBABILITY_MT: f64 = 0.85;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Rule limits and probabilities (configurable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    pub nc_min_absences: f64,
    pub lfr_min_absences: f64,
    pub lfi_min_installments: f64,
    pub nf_max_installments: f64,
    pub mt_max_absences: f64,

    pub probability_nc: f64,
    pub probability_lfi: f64,
    pub probability_lfr: f64,
    pub probability_lac: f64,
    pub probability_nf: f64,
    pub probability_mt: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            nc_min_absences: NC_MIN_ABSENCES,
            lfr_min_absences: LFR_MIN_ABSENCES,
            lfi_min_installments: LFI_MIN_INSTALLMENTS,
            nf_max_installments: NF_MAX_INSTALLMENTS,
            mt_max_absences: MT_MAX_ABSENCES,
            probability_nc: PROBABILITY_NC,
            probability_lfi: PROBABILITY_LFI,
            probability_lfr: PROBABILITY_LFR,
            probability_lac: PROBABILITY_LAC,
            probability_nf: PROBABILITY_NF,
            probability_mt: PROBABILITY_MT,
        }
    }
}

impl RuleThresholds {
    /// All rule probabilities, named, for validation and reporting
    pub fn probabilities(&self) -> [(&'static str, f64); 6] {
        [
            ("probability_nc", self.probability_nc),
            ("probability_lfi", self.probability_lfi),
            ("probability_lfr", self.probability_lfr),
            ("probability_lac", self.probability_lac),
            ("probability_nf", self.probability_nf),
            ("probability_mt", self.probability_mt),
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, p) in self.probabilities() {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} = {} is outside [0, 1]", name, p));
            }
        }
        if self.lfr_min_absences < self.nc_min_absences {
            return Err(format!(
                "lfr_min_absences ({}) must be >= nc_min_absences ({})",
                self.lfr_min_absences, self.nc_min_absences
            ));
        }
        Ok(())
    }
}
