//! Attention lab controller.
//!
//! Owns the mutable query and the fixed memory. Every query edit recomputes
//! the full attention pipeline before returning, so the stored result always
//! belongs to the current query.

use tracing::{debug, info, warn};

use crate::config::LabConfig;
use crate::error::LabError;
use crate::kernel::{attend_with, AttentionResult, SoftmaxPolicy};
use crate::memory::{toy_memory, Memory, DEFAULT_QUERY};
use crate::snapshot::LabSnapshot;

/// Lower bound of the query slider domain.
pub const QUERY_MIN: f64 = 0.0;
/// Upper bound of the query slider domain.
pub const QUERY_MAX: f64 = 1.0;

/// Interactive single-head attention over a fixed memory.
///
/// # Example
///
/// ```
/// use attention_lab::AttentionLab;
///
/// let mut lab = AttentionLab::toy();
/// lab.set_query_component(0, 1.0).unwrap();
/// lab.set_query_component(1, 0.0).unwrap();
/// lab.set_query_component(2, 0.0).unwrap();
/// let snapshot = lab.snapshot();
/// assert_eq!(snapshot.best_match().unwrap().label, "Word A");
/// ```
#[derive(Debug, Clone)]
pub struct AttentionLab {
    query: Vec<f64>,
    memory: Memory,
    scale: f64,
    policy: SoftmaxPolicy,
    result: AttentionResult,
}

impl AttentionLab {
    /// Builds a lab, checking that the query, every key and every value share
    /// one dimensionality and that `scale` is positive and finite.
    pub fn new(
        default_query: Vec<f64>,
        memory: Memory,
        scale: f64,
        policy: SoftmaxPolicy,
    ) -> Result<Self, LabError> {
        let dimension = default_query.len();
        if dimension == 0 {
            warn!("rejecting lab with an empty query");
            return Err(LabError::configuration("query must have at least one dimension"));
        }
        if let Err(err) = memory.validate_dimension(dimension) {
            warn!(error = %err, "rejecting lab configuration");
            return Err(err);
        }
        if !scale.is_finite() || scale <= 0.0 {
            warn!(scale, "rejecting lab scale factor");
            return Err(LabError::configuration(format!(
                "scale factor must be positive and finite, got {}",
                scale
            )));
        }
        if default_query.iter().any(|v| !v.is_finite()) {
            warn!(query = ?default_query, "rejecting non-finite default query");
            return Err(LabError::NonFiniteValue {
                context: "default query".to_string(),
            });
        }

        let query: Vec<f64> = default_query
            .into_iter()
            .map(|v| v.clamp(QUERY_MIN, QUERY_MAX))
            .collect();
        let result = attend_with(&query, memory.records(), scale, policy);
        info!(
            dimension,
            records = memory.len(),
            scale,
            ?policy,
            "attention lab initialized"
        );

        Ok(Self {
            query,
            memory,
            scale,
            policy,
            result,
        })
    }

    /// Builds a lab from a configuration, validating it first.
    pub fn from_config(config: &LabConfig) -> Result<Self, LabError> {
        config.validate()?;
        let memory = Memory::new(config.memory.clone())?;
        Self::new(
            config.default_query.clone(),
            memory,
            config.resolved_scale_factor(),
            config.softmax_policy,
        )
    }

    /// The three-word toy lab with the default query and `sqrt(3)` scaling.
    pub fn toy() -> Self {
        let query = DEFAULT_QUERY.to_vec();
        let memory = Memory::from_trusted(toy_memory());
        let scale = (query.len() as f64).sqrt();
        let policy = SoftmaxPolicy::Raw;
        let result = attend_with(&query, memory.records(), scale, policy);
        Self {
            query,
            memory,
            scale,
            policy,
            result,
        }
    }

    /// Replaces one query component and recomputes attention.
    ///
    /// `value` is clamped to `[0, 1]`. An index outside the query is an error
    /// and leaves the lab untouched, as does a NaN value.
    pub fn set_query_component(&mut self, index: usize, value: f64) -> Result<(), LabError> {
        let dimension = self.query.len();
        if index >= dimension {
            return Err(LabError::IndexOutOfBounds { index, dimension });
        }
        if value.is_nan() {
            return Err(LabError::NonFiniteValue {
                context: format!("query component {}", index),
            });
        }

        let clamped = value.clamp(QUERY_MIN, QUERY_MAX);
        if clamped != value {
            debug!(index, value, clamped, "query value clamped to slider domain");
        }
        self.query[index] = clamped;
        self.recompute();
        Ok(())
    }

    /// Drives one query component through `positions`, capturing a snapshot
    /// after each step. The component keeps the last position afterwards.
    ///
    /// The index and every position are checked before the query changes, so
    /// a failed sweep leaves the lab untouched.
    pub fn sweep(&mut self, index: usize, positions: &[f64]) -> Result<Vec<LabSnapshot>, LabError> {
        let dimension = self.query.len();
        if index >= dimension {
            return Err(LabError::IndexOutOfBounds { index, dimension });
        }
        if let Some(step) = positions.iter().position(|p| p.is_nan()) {
            return Err(LabError::NonFiniteValue {
                context: format!("sweep position {}", step),
            });
        }

        let mut frames = Vec::with_capacity(positions.len());
        for &position in positions {
            self.set_query_component(index, position)?;
            frames.push(self.snapshot());
        }
        Ok(frames)
    }

    /// Copy of the current query and everything derived from it.
    pub fn snapshot(&self) -> LabSnapshot {
        LabSnapshot::capture(&self.query, &self.memory, &self.result)
    }

    pub fn query(&self) -> &[f64] {
        &self.query
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Result of the most recent recomputation.
    pub fn result(&self) -> &AttentionResult {
        &self.result
    }

    pub fn dimension(&self) -> usize {
        self.query.len()
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    pub fn softmax_policy(&self) -> SoftmaxPolicy {
        self.policy
    }

    fn recompute(&mut self) {
        self.result = attend_with(&self.query, self.memory.records(), self.scale, self.policy);
        debug!(
            query = ?self.query,
            best = ?self.result.argmax(),
            "attention recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRecord;

    #[test]
    fn test_toy_lab_matches_validated_lab() {
        let validated = AttentionLab::new(
            DEFAULT_QUERY.to_vec(),
            Memory::new(toy_memory()).unwrap(),
            3.0f64.sqrt(),
            SoftmaxPolicy::Raw,
        )
        .unwrap();
        assert_eq!(validated.snapshot(), AttentionLab::toy().snapshot());
    }

    #[test]
    fn test_index_error_leaves_state_untouched() {
        let mut lab = AttentionLab::toy();
        let before = lab.snapshot();
        let err = lab.set_query_component(3, 0.5).unwrap_err();
        assert_eq!(
            err,
            LabError::IndexOutOfBounds {
                index: 3,
                dimension: 3
            }
        );
        assert_eq!(lab.snapshot(), before);
    }

    #[test]
    fn test_nan_rejected() {
        let mut lab = AttentionLab::toy();
        let before = lab.snapshot();
        assert!(lab.set_query_component(0, f64::NAN).is_err());
        assert_eq!(lab.snapshot(), before);
    }

    #[test]
    fn test_non_finite_default_query_rejected() {
        let err = AttentionLab::new(
            vec![0.5, f64::INFINITY, 0.5],
            Memory::new(toy_memory()).unwrap(),
            3.0f64.sqrt(),
            SoftmaxPolicy::Raw,
        )
        .unwrap_err();
        assert!(matches!(err, LabError::NonFiniteValue { .. }));
    }

    #[test]
    fn test_infinity_clamped() {
        let mut lab = AttentionLab::toy();
        lab.set_query_component(1, f64::INFINITY).unwrap();
        assert_eq!(lab.query()[1], 1.0);
        lab.set_query_component(1, f64::NEG_INFINITY).unwrap();
        assert_eq!(lab.query()[1], 0.0);
    }

    #[test]
    fn test_mismatched_value_rejected_at_startup() {
        let memory = Memory::new(vec![MemoryRecord::new(
            7,
            vec![1.0, 0.0, 0.0],
            vec![1.0, 0.0],
            "bad",
        )])
        .unwrap();
        let err = AttentionLab::new(vec![0.0; 3], memory, 1.0, SoftmaxPolicy::Raw).unwrap_err();
        assert!(matches!(err, LabError::Configuration { .. }));
    }

    #[test]
    fn test_empty_query_rejected() {
        let memory = Memory::new(Vec::new()).unwrap();
        assert!(AttentionLab::new(Vec::new(), memory, 1.0, SoftmaxPolicy::Raw).is_err());
    }
}
