//! Hybrid dropout-risk decision engine.
//!
//! Business rules decide first; the classifier's prediction is the
//! fallback; attribution values explain the classifier's view.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use error::{EngineError, EngineResult};
pub use logic::config::EngineConfig;
