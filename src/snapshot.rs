//! Read-only view of the lab handed to the presentation layer.

use serde::Serialize;

use crate::kernel::{argmax, AttentionResult};
use crate::memory::{Memory, MemoryRecord};

/// The query, memory and every derived sequence, captured together.
///
/// All four derived sequences were computed from exactly this `query`.
/// Presentation must read them from here and never recompute attention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabSnapshot {
    pub query: Vec<f64>,
    pub memory: Memory,
    pub scores: Vec<f64>,
    pub scaled_scores: Vec<f64>,
    pub weights: Vec<f64>,
    pub output: Vec<f64>,
}

impl LabSnapshot {
    pub(crate) fn capture(query: &[f64], memory: &Memory, result: &AttentionResult) -> Self {
        Self {
            query: query.to_vec(),
            memory: memory.clone(),
            scores: result.scores.clone(),
            scaled_scores: result.scaled_scores.clone(),
            weights: result.weights.clone(),
            output: result.output.clone(),
        }
    }

    /// Dimensionality of the query.
    pub fn dimension(&self) -> usize {
        self.query.len()
    }

    /// Record receiving the largest weight; the earlier record wins ties.
    pub fn best_match(&self) -> Option<&MemoryRecord> {
        argmax(&self.weights).and_then(|i| self.memory.get(i))
    }

    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
