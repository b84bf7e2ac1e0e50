//! API Module
//!
//! - batch_file.rs: JSON batch input and its conversion to domain types
//! - commands.rs: run a batch, get a report

pub mod batch_file;
pub mod commands;

pub use batch_file::{AttributionInput, BatchFile, PreparedBatch};
pub use commands::{run_batch, run_batch_file};
