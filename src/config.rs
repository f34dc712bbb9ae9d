//! Configuration for the attention lab
//!
//! This module provides the configuration structure describing a lab: the
//! default query, the memory table, the scaling constant and the slider step.
//! Configurations are usually loaded from JSON, but `LabConfig::toy()` returns
//! the built-in three-word table.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;

use crate::error::LabError;
use crate::kernel::SoftmaxPolicy;
use crate::memory::{toy_memory, Memory, MemoryRecord, DEFAULT_QUERY};

/// Slider step used when the configuration does not name one.
pub const DEFAULT_SLIDER_STEP: f64 = 0.1;
/// Finest slider step a configuration may request.
pub const MIN_SLIDER_STEP: f64 = 1e-3;

/// Configuration for an attention lab.
///
/// Optional fields fall back to defaults:
///
/// - **scale_factor**: `sqrt(dimensionality)`
/// - **softmax_policy**: `"raw"` (no max-shift); `"max_shift"` opts into the stable form
/// - **slider_step**: `0.1`
///
/// # Example
///
/// ```json
/// {
///   "default_query": [0.8, 0.2, 0.5],
///   "memory": [
///     { "id": 1, "key": [0.9, 0.1, 0.1], "value": [1, 0, 0], "label": "Word A" },
///     { "id": 2, "key": [0.1, 0.9, 0.2], "value": [0, 1, 0], "label": "Word B" }
///   ],
///   "softmax_policy": "raw",
///   "slider_step": 0.1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabConfig {
    /// Query the lab starts from; its length fixes the dimensionality
    pub default_query: Vec<f64>,

    /// Key/value records in render order
    pub memory: Vec<MemoryRecord>,

    /// Divisor applied to raw scores (default `sqrt(dimensionality)`)
    #[serde(default)]
    pub scale_factor: Option<f64>,

    /// Softmax exponentiation policy (default `raw`)
    #[serde(default)]
    pub softmax_policy: SoftmaxPolicy,

    /// Step of the query sliders (default 0.1)
    #[serde(default)]
    pub slider_step: Option<f64>,
}

impl LabConfig {
    /// The built-in three-word lab.
    pub fn toy() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_vec(),
            memory: toy_memory(),
            scale_factor: None,
            softmax_policy: SoftmaxPolicy::Raw,
            slider_step: None,
        }
    }

    pub fn with_scale_factor(mut self, scale: f64) -> Self {
        self.scale_factor = Some(scale);
        self
    }

    pub fn with_softmax_policy(mut self, policy: SoftmaxPolicy) -> Self {
        self.softmax_policy = policy;
        self
    }

    pub fn with_slider_step(mut self, step: f64) -> Self {
        self.slider_step = Some(step);
        self
    }

    /// Dimensionality shared by the query, keys and values.
    pub fn dimension(&self) -> usize {
        self.default_query.len()
    }

    /// The configured scale factor, or `sqrt(dimensionality)`.
    pub fn resolved_scale_factor(&self) -> f64 {
        self.scale_factor
            .unwrap_or_else(|| (self.dimension() as f64).sqrt())
    }

    pub fn resolved_slider_step(&self) -> f64 {
        self.slider_step.unwrap_or(DEFAULT_SLIDER_STEP)
    }

    /// Every slider position from 0 to 1 inclusive, rounded to 6 decimals.
    ///
    /// Empty when the step lies outside `[MIN_SLIDER_STEP, 1]`.
    pub fn slider_positions(&self) -> Vec<f64> {
        let step = self.resolved_slider_step();
        if !valid_slider_step(step) {
            return Vec::new();
        }
        let steps = (1.0 / step + 1e-9).floor() as usize;
        (0..=steps)
            .map(|i| ((i as f64 * step).min(1.0) * 1e6).round() / 1e6)
            .collect()
    }

    /// Checks the configuration without building a lab.
    ///
    /// Fails on an empty query, a key or value whose length differs from the
    /// query, duplicate record ids, a non-positive scale or an invalid step.
    pub fn validate(&self) -> Result<(), LabError> {
        let dimension = self.dimension();
        if dimension == 0 {
            return Err(LabError::configuration(
                "default_query must have at least one dimension",
            ));
        }

        Memory::new(self.memory.clone())?.validate_dimension(dimension)?;

        if let Some(scale) = self.scale_factor {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(LabError::configuration(format!(
                    "scale_factor must be positive and finite, got {}",
                    scale
                )));
            }
        }

        if let Some(step) = self.slider_step {
            if !valid_slider_step(step) {
                return Err(LabError::configuration(format!(
                    "slider_step must be in [{}, 1], got {}",
                    MIN_SLIDER_STEP, step
                )));
            }
        }

        Ok(())
    }
}

fn valid_slider_step(step: f64) -> bool {
    (MIN_SLIDER_STEP..=1.0).contains(&step)
}

impl Default for LabConfig {
    fn default() -> Self {
        Self::toy()
    }
}

/// Loads a lab configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a `LabConfig` and validates it.
///
/// # Returns
///
/// `Ok(LabConfig)` on success, or an error if the file cannot be read, the JSON
/// is invalid, or the configuration fails validation.
///
/// # Examples
///
/// ```no_run
/// use attention_lab::config::load_config;
///
/// let cfg = load_config("config/attention_lab.json").unwrap();
/// assert_eq!(cfg.dimension(), 3);
/// ```
pub fn load_config(path: &str) -> Result<LabConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: LabConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
