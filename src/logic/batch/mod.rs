//! Batch Module
//!
//! Runs the merger over a whole batch and builds the run report.
//!
//! ## Structure
//! - `runner`: BatchRunner (shape checks, sequential / rayon runs)
//! - `report`: BatchReport, BatchSummary

pub mod runner;
pub mod report;

#[cfg(test)]
mod tests;

pub use runner::{BatchOutput, BatchRunner, SampleWarning};
pub use report::{BatchReport, BatchSummary, ConfidenceStats};
