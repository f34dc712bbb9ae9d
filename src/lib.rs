//! Attention Lab
//!
//! A toy scaled dot-product attention engine: a query is compared against a
//! small key/value memory, scores are scaled and normalized with softmax, and
//! the values are blended into a context vector. The lab controller recomputes
//! the whole pipeline on every query edit and hands out read-only snapshots.
//!
//! # Modules
//!
//! - `kernel`: dot product, softmax and the attention pipeline
//! - `memory`: key/value records and the built-in toy memory
//! - `lab`: the controller owning the query
//! - `snapshot`: the read-only view handed to presentation
//! - `render`: proportional visual encodings derived from a snapshot
//! - `config`: lab configuration loaded from JSON
//! - `positional`: sinusoidal positional encoding
//! - `error`: error taxonomy

pub mod config;
pub mod error;
pub mod kernel;
pub mod lab;
pub mod memory;
pub mod positional;
pub mod render;
pub mod snapshot;

pub use config::{load_config, LabConfig};
pub use error::LabError;
pub use kernel::{attend, dot_product, softmax, AttentionResult, SoftmaxPolicy};
pub use lab::AttentionLab;
pub use memory::{Memory, MemoryRecord};
pub use render::VisualEncoding;
pub use snapshot::LabSnapshot;
