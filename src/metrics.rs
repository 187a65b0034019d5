//! Information-theoretic comparison of two partitions.
//!
//! Used to score a clustering against a reference one.
//!
//! # Metrics Overview
//!
//! | Metric | Range | Best | Properties |
//! |--------|-------|------|------------|
//! | [`mutual_information`] | [0, ln k] | - | Raw shared information (nats) |
//! | [`normalized_mutual_information`] | [0, 1] | 1 | `2I / (H(A) + H(B))` |
//! | [`adjusted_mutual_information`] | ≤ 1 | 1 | Corrected for chance |
//!
//! AMI subtracts the mutual information two random partitions with the same
//! cluster sizes would share on average ([`expected_mutual_information`]):
//!
//! ```text
//! AMI(A, B) = (I(A; B) - E[I]) / (max(H(A), H(B)) - E[I])
//! ```
//!
//! # Example
//!
//! ```rust
//! use lvclust::metrics::{adjusted_mutual_information, contingency};
//! use lvclust::Partition;
//!
//! let a = Partition::from_labels(&[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
//! let b = Partition::from_labels(&[0, 0, 0, 0, 1, 0, 1, 1, 1, 1, 2, 0, 2, 2, 2, 1, 1]);
//!
//! let table = contingency(&a, &b).unwrap();
//! assert_eq!(table, vec![vec![5, 1, 0], vec![1, 4, 1], vec![0, 2, 3]]);
//!
//! let ami = adjusted_mutual_information(&a, &b).unwrap();
//! assert!((ami - 0.2750).abs() < 1e-4);
//! ```
//!
//! # References
//!
//! - Vinh, Epps, Bailey (2010). "Information theoretic measures for clusterings
//!   comparison: variants, properties, normalization and correction for chance."
//!   JMLR 11, 2837–2854.

use crate::error::{Error, Result};
use crate::partition::{Label, Partition};
use statrs::function::gamma::ln_gamma;
use std::collections::BTreeMap;

/// Contingency table between two partitions of the same items.
///
/// Row `i` is the `i`-th label of `a` in ascending order, column `j` the
/// `j`-th label of `b`; cell `(i, j)` counts the items carrying both.
///
/// # Errors
///
/// `EmptyInput` when `a` is empty, `DimensionMismatch` when the partitions
/// cover a different number of items, `UnknownLabel` when an item of `a` has
/// no label in `b`.
pub fn contingency(a: &Partition, b: &Partition) -> Result<Vec<Vec<usize>>> {
    if a.is_empty() {
        return Err(Error::EmptyInput);
    }
    if a.n_items() != b.n_items() {
        return Err(Error::DimensionMismatch {
            expected: a.n_items(),
            found: b.n_items(),
        });
    }
    let rows = dense_labels(a);
    let cols = dense_labels(b);
    let mut table = vec![vec![0usize; cols.len()]; rows.len()];
    for (item, la) in a.iter() {
        let lb = b.label(item).ok_or(Error::UnknownLabel { index: item })?;
        table[rows[&la]][cols[&lb]] += 1;
    }
    Ok(table)
}

fn dense_labels(p: &Partition) -> BTreeMap<Label, usize> {
    p.labels().enumerate().map(|(i, l)| (l, i)).collect()
}

/// Entropy (nats) of a partition's cluster-size distribution.
pub fn entropy(p: &Partition) -> f64 {
    let n = p.n_items();
    if n == 0 {
        return 0.0;
    }
    let sizes: Vec<usize> = p.labels().map(|l| p.cluster_size(l)).collect();
    entropy_of_counts(&sizes, n)
}

fn entropy_of_counts(counts: &[usize], n: usize) -> f64 {
    let n_f = n as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n_f;
            -p * p.ln()
        })
        .sum()
}

/// Row sums, column sums and grand total of a contingency table.
fn marginals(table: &[Vec<usize>]) -> (Vec<usize>, Vec<usize>, usize) {
    let rows: Vec<usize> = table.iter().map(|r| r.iter().sum()).collect();
    let n_cols = table.iter().map(Vec::len).max().unwrap_or(0);
    let mut cols = vec![0usize; n_cols];
    for row in table {
        for (j, &c) in row.iter().enumerate() {
            cols[j] += c;
        }
    }
    let n = rows.iter().sum();
    (rows, cols, n)
}

fn mutual_information_of_table(table: &[Vec<usize>]) -> f64 {
    let (rows, cols, n) = marginals(table);
    if n == 0 {
        return 0.0;
    }
    let n_f = n as f64;
    let mut mi = 0.0;
    for (i, row) in table.iter().enumerate() {
        for (j, &nij) in row.iter().enumerate() {
            if nij > 0 {
                let nij = nij as f64;
                mi += nij / n_f * (n_f * nij / (rows[i] as f64 * cols[j] as f64)).ln();
            }
        }
    }
    mi.max(0.0)
}

/// Mutual information (nats) between two partitions.
pub fn mutual_information(a: &Partition, b: &Partition) -> Result<f64> {
    Ok(mutual_information_of_table(&contingency(a, b)?))
}

/// `2 I(A; B) / (H(A) + H(B))`, 1 when both partitions are a single cluster.
pub fn normalized_mutual_information(a: &Partition, b: &Partition) -> Result<f64> {
    let mi = mutual_information(a, b)?;
    let denom = entropy(a) + entropy(b);
    if denom > 0.0 {
        Ok(2.0 * mi / denom)
    } else {
        Ok(1.0)
    }
}

/// Expected mutual information of two random partitions whose cluster sizes
/// are the row and column sums of `table` (hypergeometric model).
///
/// ```text
/// E[I] = Σ_i Σ_j Σ_{n_ij} (n_ij / N) ln(N n_ij / (a_i b_j)) P(n_ij)
/// ```
///
/// with `n_ij` running over `max(1, a_i + b_j - N) ..= min(a_i, b_j)` and
/// `P(n_ij)` evaluated through log-gamma terms.
pub fn expected_mutual_information(table: &[Vec<usize>]) -> f64 {
    let (rows, cols, n) = marginals(table);
    if n == 0 {
        return 0.0;
    }
    let n_f = n as f64;
    let lg = |x: usize| ln_gamma(x as f64 + 1.0);
    let lg_n = lg(n);

    let mut emi = 0.0;
    for &a in &rows {
        for &b in &cols {
            if a == 0 || b == 0 {
                continue;
            }
            let (a_f, b_f) = (a as f64, b as f64);
            let fixed = lg(a) + lg(b) + lg(n - a) + lg(n - b) - lg_n;
            let start = (a + b).saturating_sub(n).max(1);
            for nij in start..=a.min(b) {
                let nij_f = nij as f64;
                let term1 = nij_f / n_f;
                let term2 = (n_f * nij_f / (a_f * b_f)).ln();
                // n - a - b + nij >= 0 by the lower bound on nij
                let gln = fixed - lg(nij) - lg(a - nij) - lg(b - nij) - lg(n + nij - a - b);
                emi += term1 * term2 * gln.exp();
            }
        }
    }
    emi
}

/// [`expected_mutual_information`] of the contingency table of `a` and `b`.
pub fn expected_mutual_information_partitions(a: &Partition, b: &Partition) -> Result<f64> {
    Ok(expected_mutual_information(&contingency(a, b)?))
}

/// Adjusted mutual information between two partitions.
///
/// Returns 0 when the denominator `max(H(A), H(B)) - E[I]` is exactly zero,
/// which happens when both partitions are trivial.
pub fn adjusted_mutual_information(a: &Partition, b: &Partition) -> Result<f64> {
    let table = contingency(a, b)?;
    let mi = mutual_information_of_table(&table);
    let emi = expected_mutual_information(&table);
    let h_max = entropy(a).max(entropy(b));
    let denom = h_max - emi;
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok((mi - emi) / denom)
}

/// AMI of every candidate against `reference`.
pub fn score_against_reference(candidates: &[Partition], reference: &Partition) -> Result<Vec<f64>> {
    candidates
        .iter()
        .map(|c| adjusted_mutual_information(c, reference))
        .collect()
}

/// 1-based ranks of `values` in ascending order. Equal values keep their
/// input order.
///
/// ```rust
/// use lvclust::metrics::rank;
///
/// assert_eq!(rank(&[0.3, 0.1, 0.3, 0.2]), vec![3, 1, 4, 2]);
/// ```
pub fn rank(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));
    let mut ranks = vec![0; values.len()];
    for (r, i) in order.into_iter().enumerate() {
        ranks[i] = r + 1;
    }
    ranks
}
