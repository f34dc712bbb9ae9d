//! Error types for the attention lab.
//!
//! Configuration and indexing errors are programmer errors: they are returned
//! immediately and never recovered from. Numeric edge cases such as an empty
//! memory are not errors and have defined results in the kernel.

use thiserror::Error;

/// Errors raised by the kernel's strict entry points and by the lab controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    /// The query, keys, values or scale factor do not form a valid lab.
    #[error("Invalid lab configuration: {reason}")]
    Configuration { reason: String },

    /// A query component index outside `[0, dimension)`.
    #[error("Query index {index} out of bounds for dimension {dimension}")]
    IndexOutOfBounds { index: usize, dimension: usize },

    /// Two vectors that must share a length do not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// A NaN or infinite number where a finite one is required.
    #[error("Non-finite value in {context}")]
    NonFiniteValue { context: String },
}

impl LabError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        LabError::Configuration {
            reason: reason.into(),
        }
    }
}
