//! Resource ledger - village-level counters credited by harvests

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Kind of resource a harvest pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Grain,
    Wood,
}

/// Amount credited to the village by a single harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDelta {
    pub kind: ResourceKind,
    pub amount: u32,
}

/// Running totals of harvested resources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceLedger {
    totals: AHashMap<ResourceKind, u64>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        self.totals.get(&kind).copied().unwrap_or(0)
    }

    pub fn apply(&mut self, delta: ResourceDelta) {
        *self.totals.entry(delta.kind).or_insert(0) += u64::from(delta.amount);
    }
}
