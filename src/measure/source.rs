//! Where entropies come from.
//!
//! The clustering engine does not own the statistical variables. A
//! [`VariableSource`] answers marginal and joint entropy queries by global
//! variable id; the provider maps local item indices onto those ids.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};
use std::collections::BTreeMap;

/// Entropy oracle over a population of variables, addressed by global id.
pub trait VariableSource {
    /// Number of variables (valid ids are `0..n_variables()`).
    fn n_variables(&self) -> usize;

    /// Shannon entropy (nats) of one variable.
    fn entropy(&self, var: usize) -> f64;

    /// Joint Shannon entropy (nats) of two variables.
    fn joint_entropy(&self, a: usize, b: usize) -> f64;
}

impl<V: VariableSource + ?Sized> VariableSource for &V {
    fn n_variables(&self) -> usize {
        (**self).n_variables()
    }

    fn entropy(&self, var: usize) -> f64 {
        (**self).entropy(var)
    }

    fn joint_entropy(&self, a: usize, b: usize) -> f64 {
        (**self).joint_entropy(a, b)
    }
}

/// Empirical entropies over discrete observations.
///
/// Rows are variables, columns are observations (individuals). An optional
/// missing-value code is skipped: marginals use every observed value,
/// joints only the observations where both variables are present.
#[derive(Debug, Clone)]
pub struct EmpiricalSource {
    data: Array2<u8>,
    missing: Option<u8>,
}

impl EmpiricalSource {
    /// Wrap a `variables × observations` matrix.
    pub fn new(data: Array2<u8>) -> Self {
        Self {
            data,
            missing: None,
        }
    }

    /// Build from one row per variable. Rows must share a length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let n_obs = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * n_obs);
        for row in rows {
            if row.len() != n_obs {
                return Err(Error::DimensionMismatch {
                    expected: n_obs,
                    found: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((rows.len(), n_obs), flat).map_err(|e| {
            Error::InvalidParameter {
                name: "rows",
                message: e.to_string(),
            }
        })?;
        Ok(Self::new(data))
    }

    /// Treat `code` as a missing observation.
    pub fn with_missing(mut self, code: u8) -> Self {
        self.missing = Some(code);
        self
    }

    /// Number of observations per variable.
    pub fn n_observations(&self) -> usize {
        self.data.ncols()
    }

    /// Observations of one variable.
    pub fn row(&self, var: usize) -> ArrayView1<'_, u8> {
        self.data.row(var)
    }

    fn present(&self, v: u8) -> bool {
        self.missing != Some(v)
    }
}

/// `ln(n) - (1/n) Σ c ln c`, the plug-in entropy of a count table.
///
/// Counts are summed in iteration order, so callers pass them in a fixed order.
fn entropy_from_counts<I: IntoIterator<Item = usize>>(counts: I, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let sum_c_log_c: f64 = counts
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let c = c as f64;
            c * c.ln()
        })
        .sum();
    n.ln() - sum_c_log_c / n
}

impl VariableSource for EmpiricalSource {
    fn n_variables(&self) -> usize {
        self.data.nrows()
    }

    fn entropy(&self, var: usize) -> f64 {
        let mut counts = [0usize; 256];
        let mut total = 0;
        for &v in self.data.row(var) {
            if self.present(v) {
                counts[v as usize] += 1;
                total += 1;
            }
        }
        entropy_from_counts(counts, total)
    }

    fn joint_entropy(&self, a: usize, b: usize) -> f64 {
        let mut counts: BTreeMap<(u8, u8), usize> = BTreeMap::new();
        let mut total = 0;
        for (&x, &y) in self.data.row(a).iter().zip(self.data.row(b).iter()) {
            if self.present(x) && self.present(y) {
                *counts.entry((x, y)).or_insert(0) += 1;
                total += 1;
            }
        }
        entropy_from_counts(counts.into_values(), total)
    }
}
