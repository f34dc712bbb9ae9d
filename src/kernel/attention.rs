//! Scaled dot-product attention over a key/value memory.
//!
//! `Attention(q, K, V) = softmax(q·Kᵀ / scale) · V` for a single query. Every
//! intermediate stage is returned so a caller can display the whole pipeline.

use serde::Serialize;

use super::softmax::{softmax_with, SoftmaxPolicy};
use super::vector::{dot_product, ensure_finite, scale_scores, weighted_sum};
use crate::error::LabError;
use crate::memory::MemoryRecord;

/// Every stage of one attention pass, in memory order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionResult {
    /// Raw `query · key` per record.
    pub scores: Vec<f64>,
    /// `scores / scale`.
    pub scaled_scores: Vec<f64>,
    /// Softmax of the scaled scores.
    pub weights: Vec<f64>,
    /// Weighted sum of the value vectors (the context vector).
    pub output: Vec<f64>,
}

impl AttentionResult {
    /// Index of the record with the largest weight. Ties go to the earlier record.
    pub fn argmax(&self) -> Option<usize> {
        argmax(&self.weights)
    }

    /// Sum of all weights; 1 for any non-empty finite memory, 0 when empty.
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Index of the largest weight. Ties go to the earlier index; `None` when empty.
pub fn argmax(weights: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &w) in weights.iter().enumerate() {
        match best {
            Some((_, bw)) if w <= bw => {}
            _ => best = Some((i, w)),
        }
    }
    best.map(|(i, _)| i)
}

/// Attention with the raw softmax policy.
pub fn attend(query: &[f64], memory: &[MemoryRecord], scale: f64) -> AttentionResult {
    attend_with(query, memory, scale, SoftmaxPolicy::Raw)
}

/// Attention with an explicit softmax policy.
///
/// The output has the length of the first record's value vector, or of the
/// query when the memory is empty.
pub fn attend_with(
    query: &[f64],
    memory: &[MemoryRecord],
    scale: f64,
    policy: SoftmaxPolicy,
) -> AttentionResult {
    let scores: Vec<f64> = memory
        .iter()
        .map(|record| dot_product(query, &record.key))
        .collect();
    let scaled_scores = scale_scores(&scores, scale);
    let weights = softmax_with(&scaled_scores, policy);

    let dim = memory
        .first()
        .map(|record| record.value.len())
        .unwrap_or(query.len());
    let values: Vec<&[f64]> = memory.iter().map(|record| record.value.as_slice()).collect();
    let output = weighted_sum(&weights, &values, dim);

    AttentionResult {
        scores,
        scaled_scores,
        weights,
        output,
    }
}

/// Attention that validates its inputs instead of padding or propagating NaN.
///
/// Every key must match the query length, every value must match the first
/// value's length, all numbers must be finite and `scale` must be positive.
pub fn try_attend(
    query: &[f64],
    memory: &[MemoryRecord],
    scale: f64,
    policy: SoftmaxPolicy,
) -> Result<AttentionResult, LabError> {
    if !scale.is_finite() {
        return Err(LabError::NonFiniteValue {
            context: "scale factor".to_string(),
        });
    }
    if scale <= 0.0 {
        return Err(LabError::configuration(format!(
            "scale factor must be positive, got {}",
            scale
        )));
    }
    ensure_finite(query, "query")?;

    let value_dim = memory.first().map(|record| record.value.len());
    for record in memory {
        if record.key.len() != query.len() {
            return Err(LabError::InvalidDimension {
                expected: query.len(),
                actual: record.key.len(),
            });
        }
        if let Some(expected) = value_dim {
            if record.value.len() != expected {
                return Err(LabError::InvalidDimension {
                    expected,
                    actual: record.value.len(),
                });
            }
        }
        ensure_finite(&record.key, &format!("key of record {}", record.id))?;
        ensure_finite(&record.value, &format!("value of record {}", record.id))?;
    }

    Ok(attend_with(query, memory, scale, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::toy_memory;

    #[test]
    fn test_attend_empty_memory() {
        let result = attend(&[0.5, 0.5, 0.5], &[], 3.0f64.sqrt());
        assert!(result.scores.is_empty());
        assert!(result.weights.is_empty());
        assert_eq!(result.output, vec![0.0, 0.0, 0.0]);
        assert_eq!(result.argmax(), None);
        assert_eq!(result.weight_sum(), 0.0);
    }

    #[test]
    fn test_attend_single_record_takes_all_weight() {
        let memory = vec![MemoryRecord::new(1, vec![0.1, 0.2], vec![3.0, 4.0], "only")];
        let result = attend(&[1.0, 1.0], &memory, 2.0f64.sqrt());
        assert_eq!(result.weights, vec![1.0]);
        assert_eq!(result.output, vec![3.0, 4.0]);
    }

    #[test]
    fn test_argmax_prefers_first_on_tie() {
        let result = AttentionResult {
            scores: vec![1.0, 1.0],
            scaled_scores: vec![1.0, 1.0],
            weights: vec![0.5, 0.5],
            output: vec![],
        };
        assert_eq!(result.argmax(), Some(0));
    }

    #[test]
    fn test_argmax_helper() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[0.2, 0.5, 0.3]), Some(1));
        assert_eq!(argmax(&[0.4, 0.2, 0.4]), Some(0));
    }

    #[test]
    fn test_try_attend_accepts_toy_memory() {
        let memory = toy_memory();
        let strict = try_attend(&[0.8, 0.2, 0.5], &memory, 3.0f64.sqrt(), SoftmaxPolicy::Raw)
            .expect("toy memory is well formed");
        let permissive = attend(&[0.8, 0.2, 0.5], &memory, 3.0f64.sqrt());
        assert_eq!(strict, permissive);
    }

    #[test]
    fn test_try_attend_rejects_short_key() {
        let memory = vec![MemoryRecord::new(1, vec![1.0], vec![1.0, 0.0], "short")];
        let err = try_attend(&[1.0, 0.0], &memory, 1.0, SoftmaxPolicy::Raw).unwrap_err();
        assert_eq!(
            err,
            LabError::InvalidDimension {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_try_attend_rejects_bad_scale() {
        let memory = toy_memory();
        let err = try_attend(&[0.0; 3], &memory, 0.0, SoftmaxPolicy::Raw).unwrap_err();
        assert!(matches!(err, LabError::Configuration { .. }));
        let err = try_attend(&[0.0; 3], &memory, f64::NAN, SoftmaxPolicy::Raw).unwrap_err();
        assert!(matches!(err, LabError::NonFiniteValue { .. }));
    }
}
