//! Rule Firing Counters
//!
//! How many decisions each rule (or the model) produced in one run.
//! Owned by the run, passed by `&mut`; parallel workers keep their own
//! copy and `merge` at the end.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::logic::rules::RuleId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFiringCounters {
    counts: [u64; RuleId::ALL.len()],
    total: u64,
}

impl RuleFiringCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero everything (start of a run)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record(&mut self, rule_id: RuleId) {
        self.counts[rule_id.index()] += 1;
        self.total += 1;
    }

    pub fn get(&self, rule_id: RuleId) -> u64 {
        self.counts[rule_id.index()]
    }

    /// Every decision, model fallbacks included
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Decisions produced by a business rule
    pub fn rule_decisions(&self) -> u64 {
        self.total - self.get(RuleId::Model)
    }

    pub fn merge(&mut self, other: &RuleFiringCounters) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self.total += other.total;
    }

    /// rule id -> count, plus "total"
    pub fn summary(&self) -> BTreeMap<String, u64> {
        let mut map: BTreeMap<String, u64> = RuleId::ALL
            .iter()
            .map(|id| (id.as_str().to_string(), self.get(*id)))
            .collect();
        map.insert("total".to_string(), self.total);
        map
    }
}

impl Serialize for RuleFiringCounters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.summary().serialize(serializer)
    }
}
