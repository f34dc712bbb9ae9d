//! Vector primitives used by the attention pipeline.
//!
//! The permissive functions here never fail: a shorter right-hand vector is
//! padded with zeros. `try_dot_product` is the strict counterpart for callers
//! that would rather see a mismatch than a silently truncated score.

use crate::error::LabError;

/// Dot product `Σ aᵢ·bᵢ` over the length of `a`.
///
/// Missing elements of `b` count as 0 and surplus elements of `b` are ignored,
/// so `dot_product(&[1.0, 2.0, 3.0], &[1.0]) == 1.0`.
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .enumerate()
        .fold(0.0, |sum, (i, &x)| sum + x * b.get(i).copied().unwrap_or(0.0))
}

/// Dot product that rejects mismatched lengths and non-finite inputs.
pub fn try_dot_product(a: &[f64], b: &[f64]) -> Result<f64, LabError> {
    if a.len() != b.len() {
        return Err(LabError::InvalidDimension {
            expected: a.len(),
            actual: b.len(),
        });
    }
    ensure_finite(a, "dot product left operand")?;
    ensure_finite(b, "dot product right operand")?;
    Ok(dot_product(a, b))
}

/// Divides every score by `scale`.
pub fn scale_scores(scores: &[f64], scale: f64) -> Vec<f64> {
    scores.iter().map(|&s| s / scale).collect()
}

/// Weighted elementwise sum of `values`, producing a vector of length `dim`.
///
/// `out[d] = Σᵢ weights[i] · values[i][d]`. Value components beyond a vector's
/// length count as 0; weights without a matching value are ignored.
pub fn weighted_sum<V: AsRef<[f64]>>(weights: &[f64], values: &[V], dim: usize) -> Vec<f64> {
    let mut out = vec![0.0f64; dim];
    for (&w, value) in weights.iter().zip(values) {
        let value = value.as_ref();
        for (d, slot) in out.iter_mut().enumerate() {
            *slot += w * value.get(d).copied().unwrap_or(0.0);
        }
    }
    out
}

pub(crate) fn ensure_finite(values: &[f64], context: &str) -> Result<(), LabError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(LabError::NonFiniteValue {
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_dot_product_basic() {
        let result = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert!((result - 32.0).abs() < EPSILON);
    }

    #[test]
    fn test_dot_product_pads_short_rhs() {
        assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[1.0]), 1.0);
    }

    #[test]
    fn test_dot_product_ignores_long_rhs() {
        assert_eq!(dot_product(&[2.0], &[3.0, 100.0, 100.0]), 6.0);
    }

    #[test]
    fn test_dot_product_empty() {
        assert_eq!(dot_product(&[], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_try_dot_product_rejects_mismatch() {
        let err = try_dot_product(&[1.0, 2.0, 3.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            LabError::InvalidDimension {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_try_dot_product_rejects_nan() {
        let err = try_dot_product(&[1.0, f64::NAN], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, LabError::NonFiniteValue { .. }));
    }

    #[test]
    fn test_scale_scores() {
        let scaled = scale_scores(&[2.0, 4.0], 2.0);
        assert_eq!(scaled, vec![1.0, 2.0]);
    }

    #[test]
    fn test_weighted_sum_one_hot_values() {
        let values = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let out = weighted_sum(&[0.25, 0.75], &values, 2);
        assert_eq!(out, vec![0.25, 0.75]);
    }

    #[test]
    fn test_weighted_sum_pads_short_values() {
        let values = vec![vec![1.0], vec![1.0, 1.0]];
        let out = weighted_sum(&[0.5, 0.5], &values, 2);
        assert_eq!(out, vec![1.0, 0.5]);
    }
}
