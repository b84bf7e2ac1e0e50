//! Batch Runner
//!
//! Zips records, classifier outputs and attribution rows and calls the
//! merger once per sample. Owns the rule counters of the run.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::logic::config::EngineConfig;
use crate::logic::decision::{ClassList, ClassifierOutput, DecisionMerger, FinalDecision, RuleFiringCounters, SampleDecision};
use crate::logic::explain::{AttributionTensor, DecodeWarning, FeatureLayout};
use crate::logic::record::StudentRecord;

/// A per-sample warning tagged with its row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleWarning {
    pub sample: usize,
    pub warning: DecodeWarning,
}

/// Everything one run produced, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    pub decisions: Vec<FinalDecision>,
    pub counters: RuleFiringCounters,
    pub warnings: Vec<SampleWarning>,
}

// ============================================================================
// RUNNER
// ============================================================================

#[derive(Debug)]
pub struct BatchRunner {
    merger: DecisionMerger,
    counters: RuleFiringCounters,
    parallel: bool,
}

impl BatchRunner {
    pub fn new(classes: ClassList, config: &EngineConfig) -> Self {
        Self {
            merger: DecisionMerger::new(classes, config),
            counters: RuleFiringCounters::new(),
            parallel: config.parallel,
        }
    }

    pub fn merger(&self) -> &DecisionMerger {
        &self.merger
    }

    /// Counters of the last run
    pub fn counters(&self) -> &RuleFiringCounters {
        &self.counters
    }

    /// Run with the configured mode
    pub fn execute(
        &mut self,
        records: &[StudentRecord],
        outputs: &[ClassifierOutput],
        tensor: &AttributionTensor,
        layout: &FeatureLayout,
    ) -> EngineResult<BatchOutput> {
        if self.parallel {
            self.run_parallel(records, outputs, tensor, layout)
        } else {
            self.run(records, outputs, tensor, layout)
        }
    }

    /// Sequential run
    pub fn run(
        &mut self,
        records: &[StudentRecord],
        outputs: &[ClassifierOutput],
        tensor: &AttributionTensor,
        layout: &FeatureLayout,
    ) -> EngineResult<BatchOutput> {
        check_shapes(records, outputs, tensor)?;
        self.counters.reset();
        log::info!("Running batch of {} samples", records.len());

        let mut results = Vec::with_capacity(records.len());
        for (i, (record, output)) in records.iter().zip(outputs).enumerate() {
            results.push(self.merger.decide(i, record, output, tensor, layout, &mut self.counters));
        }

        Ok(self.finish(results))
    }

    /// Same result as `run`, decisions computed on the rayon pool.
    /// Each worker keeps its own counters; they are merged after the join.
    pub fn run_parallel(
        &mut self,
        records: &[StudentRecord],
        outputs: &[ClassifierOutput],
        tensor: &AttributionTensor,
        layout: &FeatureLayout,
    ) -> EngineResult<BatchOutput> {
        check_shapes(records, outputs, tensor)?;
        self.counters.reset();
        log::info!("Running batch of {} samples (parallel)", records.len());

        let merger = &self.merger;
        let (mut indexed, counters) = (0..records.len())
            .into_par_iter()
            .fold(
                || (Vec::new(), RuleFiringCounters::new()),
                |(mut acc, mut counters), i| {
                    let result = merger.decide(i, &records[i], &outputs[i], tensor, layout, &mut counters);
                    acc.push((i, result));
                    (acc, counters)
                },
            )
            .reduce(
                || (Vec::new(), RuleFiringCounters::new()),
                |(mut a, mut ca), (b, cb)| {
                    a.extend(b);
                    ca.merge(&cb);
                    (a, ca)
                },
            );

        indexed.sort_by_key(|(i, _)| *i);
        self.counters = counters;

        Ok(self.finish(indexed.into_iter().map(|(_, r)| r).collect()))
    }

    fn finish(&self, results: Vec<SampleDecision>) -> BatchOutput {
        let mut decisions = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        for (sample, result) in results.into_iter().enumerate() {
            warnings.extend(
                result
                    .warnings
                    .into_iter()
                    .map(|warning| SampleWarning { sample, warning }),
            );
            decisions.push(result.decision);
        }

        log::info!(
            "Batch done: {} decisions, {} by rules, {} by model, {} warnings",
            decisions.len(),
            self.counters.rule_decisions(),
            self.counters.total() - self.counters.rule_decisions(),
            warnings.len()
        );

        BatchOutput {
            decisions,
            counters: self.counters.clone(),
            warnings,
        }
    }
}

/// All three inputs must describe the same samples
fn check_shapes(
    records: &[StudentRecord],
    outputs: &[ClassifierOutput],
    tensor: &AttributionTensor,
) -> EngineResult<()> {
    let expected = records.len();
    if outputs.len() != expected {
        return Err(EngineError::shape("classifier_outputs", expected, outputs.len()));
    }
    let samples = tensor.sample_count();
    if samples != expected {
        return Err(EngineError::shape("attributions", expected, samples));
    }
    Ok(())
}
