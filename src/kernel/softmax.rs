//! Softmax normalization.
//!
//! The default policy exponentiates scores as they are, without subtracting
//! the maximum first. For the toy inputs this is indistinguishable from the
//! stable form; `SoftmaxPolicy::MaxShift` is available for larger scores.

use serde::{Deserialize, Serialize};

/// How scores are exponentiated before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftmaxPolicy {
    /// `exp(xᵢ) / Σ exp(xⱼ)` exactly as written.
    #[default]
    Raw,
    /// Subtract `max(x)` before exponentiating. Overflow-safe.
    MaxShift,
}

/// Softmax with the raw policy.
///
/// An empty input yields an empty output.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    softmax_with(scores, SoftmaxPolicy::Raw)
}

/// Softmax with an explicit policy.
pub fn softmax_with(scores: &[f64], policy: SoftmaxPolicy) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let shift = match policy {
        SoftmaxPolicy::Raw => 0.0,
        SoftmaxPolicy::MaxShift => scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };

    let exps: Vec<f64> = scores.iter().map(|&x| (x - shift).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}
