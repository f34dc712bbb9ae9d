//! The key/value memory a query attends over.
//!
//! A `Memory` is built once, in order, and never changes afterwards. Record ids
//! are stable render keys and must be unique.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LabError;

/// Query the lab starts from.
pub const DEFAULT_QUERY: [f64; 3] = [0.8, 0.2, 0.5];

/// One immutable entry of the memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: u32,
    /// Compared against the query to produce a relevance score.
    pub key: Vec<f64>,
    /// Contributed to the output in proportion to the record's weight.
    pub value: Vec<f64>,
    /// Display text only.
    pub label: String,
}

impl MemoryRecord {
    pub fn new(id: u32, key: Vec<f64>, value: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            id,
            key,
            value,
            label: label.into(),
        }
    }
}

/// Ordered, fixed sequence of records. Iteration order is render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Memory {
    records: Vec<MemoryRecord>,
}

impl Memory {
    /// Wraps `records`, rejecting duplicate ids.
    pub fn new(records: Vec<MemoryRecord>) -> Result<Self, LabError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(LabError::configuration(format!(
                    "duplicate memory record id {}",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    /// Wraps records known to have unique ids.
    pub(crate) fn from_trusted(records: Vec<MemoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MemoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MemoryRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemoryRecord> {
        self.records.iter()
    }

    /// Checks that every key and value has length `dimension`.
    pub fn validate_dimension(&self, dimension: usize) -> Result<(), LabError> {
        for record in &self.records {
            if record.key.len() != dimension {
                return Err(LabError::configuration(format!(
                    "key of record {} has length {}, expected {}",
                    record.id,
                    record.key.len(),
                    dimension
                )));
            }
            if record.value.len() != dimension {
                return Err(LabError::configuration(format!(
                    "value of record {} has length {}, expected {}",
                    record.id,
                    record.value.len(),
                    dimension
                )));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Memory {
    type Item = &'a MemoryRecord;
    type IntoIter = std::slice::Iter<'a, MemoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The three-word toy memory: each key favors one query dimension (the third
/// a mix), each value is a one-hot vector.
pub fn toy_memory() -> Vec<MemoryRecord> {
    vec![
        MemoryRecord::new(1, vec![0.9, 0.1, 0.1], vec![1.0, 0.0, 0.0], "Word A"),
        MemoryRecord::new(2, vec![0.1, 0.9, 0.2], vec![0.0, 1.0, 0.0], "Word B"),
        MemoryRecord::new(3, vec![0.5, 0.5, 0.8], vec![0.0, 0.0, 1.0], "Word C"),
    ]
}
