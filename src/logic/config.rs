//! Engine configuration
//!
//! JSON file (every field optional) + environment overrides.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{APP_NAME, CONFIG_FILE_NAME, ENV_PARALLEL, ENV_TOP_K};
use crate::error::{EngineError, EngineResult};
use crate::logic::explain::DEFAULT_TOP_K;
use crate::logic::record::RecordSchema;
use crate::logic::rules::RuleThresholds;
use crate::logic::urgency::UrgencyThresholds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule limits and per-rule probabilities
    pub rules: RuleThresholds,

    /// Urgency bucket lower bounds
    pub urgency: UrgencyThresholds,

    /// Features kept per direction
    pub top_k: usize,

    /// Record field names
    pub schema: RecordSchema,

    /// Decide samples on the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: RuleThresholds::default(),
            urgency: UrgencyThresholds::default(),
            top_k: DEFAULT_TOP_K,
            schema: RecordSchema::default(),
            parallel: false,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file and validate
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/dropout-engine/engine.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Default-location file if present, defaults otherwise; env applied on top
    pub fn load_default() -> EngineResult<Self> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            log::info!("Loading config from {}", path.display());
            Self::from_file(&path)?
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// DROPOUT_TOP_K, DROPOUT_PARALLEL
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(k) = lookup(ENV_TOP_K).and_then(|v| v.trim().parse().ok()) {
            self.top_k = k;
        }
        if let Some(p) = lookup(ENV_PARALLEL).and_then(|v| parse_bool(&v)) {
            self.parallel = p;
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.rules.validate().map_err(EngineError::InvalidConfig)?;
        self.urgency.validate().map_err(EngineError::InvalidConfig)?;
        if self.top_k == 0 {
            return Err(EngineError::InvalidConfig("top_k must be > 0".to_string()));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
