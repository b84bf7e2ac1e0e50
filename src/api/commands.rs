//! Commands - entry points used by the binary
//!
//! Batch file in, report out. No I/O beyond reading the input file.

use std::path::Path;

use super::batch_file::{BatchFile, PreparedBatch};
use crate::error::EngineResult;
use crate::logic::batch::{BatchReport, BatchRunner};
use crate::logic::config::EngineConfig;

/// Run a prepared batch with the given config
pub fn run_batch(batch: PreparedBatch, config: &EngineConfig) -> EngineResult<BatchReport> {
    config.validate()?;
    let mut runner = BatchRunner::new(batch.classes, config);
    let output = runner.execute(&batch.records, &batch.outputs, &batch.tensor, &batch.layout)?;
    Ok(BatchReport::new(output, &batch.layout))
}

/// Load a batch file and run it
pub fn run_batch_file(path: &Path, config: &EngineConfig) -> EngineResult<BatchReport> {
    let batch = BatchFile::load(path)?.prepare()?;
    run_batch(batch, config)
}
