//! Measures backed by an explicit matrix or a closure.

use super::traits::PairwiseMeasure;
use crate::error::{Error, Result};
use ndarray::Array2;

/// Dense symmetric weight matrix.
///
/// The diagonal is returned as-is; graph builders read it as self-loop weight
/// when asked to keep loops.
#[derive(Debug, Clone)]
pub struct MatrixMeasure {
    weights: Array2<f64>,
}

impl MatrixMeasure {
    /// Wrap a square matrix. Symmetry is the caller's responsibility.
    pub fn new(weights: Array2<f64>) -> Result<Self> {
        if weights.nrows() != weights.ncols() {
            return Err(Error::DimensionMismatch {
                expected: weights.nrows(),
                found: weights.ncols(),
            });
        }
        Ok(Self { weights })
    }

    /// Build from row vectors.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let mut weights = Array2::zeros((n, n));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    found: row.len(),
                });
            }
            for (j, &w) in row.iter().enumerate() {
                weights[[i, j]] = w;
            }
        }
        Ok(Self { weights })
    }

    /// Zero matrix over `n` items.
    pub fn zeros(n: usize) -> Self {
        Self {
            weights: Array2::zeros((n, n)),
        }
    }

    /// Set both `(a, b)` and `(b, a)`.
    pub fn set(&mut self, a: usize, b: usize, w: f64) {
        self.weights[[a, b]] = w;
        self.weights[[b, a]] = w;
    }
}

impl PairwiseMeasure for MatrixMeasure {
    fn len(&self) -> usize {
        self.weights.nrows()
    }

    fn compute(&mut self, a: usize, b: usize) -> f64 {
        self.weights[[a, b]]
    }
}

/// Measure computed by a closure over `0..len`.
pub struct FnMeasure<F> {
    len: usize,
    f: F,
}

impl<F: FnMut(usize, usize) -> f64> FnMeasure<F> {
    /// Wrap `f`, which must be symmetric.
    pub fn new(len: usize, f: F) -> Self {
        Self { len, f }
    }
}

impl<F: FnMut(usize, usize) -> f64> PairwiseMeasure for FnMeasure<F> {
    fn len(&self) -> usize {
        self.len
    }

    fn compute(&mut self, a: usize, b: usize) -> f64 {
        (self.f)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_measure_rejects_ragged() {
        assert!(MatrixMeasure::from_rows(&[vec![0.0, 1.0], vec![1.0]]).is_err());
        assert!(MatrixMeasure::new(Array2::zeros((2, 3))).is_err());
    }

    #[test]
    fn test_matrix_measure_set_is_symmetric() {
        let mut m = MatrixMeasure::zeros(3);
        m.set(0, 2, 0.5);
        assert_eq!(m.compute(2, 0), 0.5);
        assert_eq!(m.compute(0, 1), 0.0);
    }

    #[test]
    fn test_fn_measure() {
        let mut m = FnMeasure::new(4, |a, b| if a / 2 == b / 2 { 1.0 } else { 0.0 });
        assert_eq!(m.len(), 4);
        assert_eq!(m.compute(0, 1), 1.0);
        assert_eq!(m.compute(1, 2), 0.0);
    }
}
