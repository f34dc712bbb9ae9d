//! Numeric kernel: vector primitives, softmax, and the attention pipeline.
//!
//! Everything in this module is a pure function. Nothing above it repeats
//! this math.

pub mod attention;
pub mod softmax;
pub mod vector;

pub use attention::{argmax, attend, attend_with, try_attend, AttentionResult};
pub use softmax::{softmax, softmax_with, SoftmaxPolicy};
pub use vector::{dot_product, scale_scores, try_dot_product, weighted_sum};
