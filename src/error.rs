//! Error handling
//!
//! Batch-fatal errors only. Per-sample problems are not errors, they are
//! `DecodeWarning`s carried next to the decision (see `logic::explain`).

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Input arrays disagree on length, row alignment cannot be trusted
    #[error("shape mismatch: {array} has {actual} entries, expected {expected}")]
    ShapeMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unknown category: '{0}'")]
    UnknownCategory(String),

    #[error("class list is empty")]
    EmptyClassList,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn shape(array: &'static str, expected: usize, actual: usize) -> Self {
        EngineError::ShapeMismatch { array, expected, actual }
    }

    /// Batch-fatal input errors (as opposed to environment failures)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::ShapeMismatch { .. }
                | EngineError::UnknownCategory(_)
                | EngineError::EmptyClassList
        )
    }
}
