//! CAST: Cluster Affinity Search Technique.
//!
//! # The Algorithm (Ben-Dor, Shamir & Yakhini, 1999)
//!
//! CAST grows one cluster at a time around an affinity threshold `t`:
//!
//! 1. Open an empty cluster `C`. Every unassigned item starts at affinity 0.
//! 2. **Add**: while the unassigned item with the highest affinity satisfies
//!    `a(x) >= t × |C|`, move it into `C`.
//! 3. **Remove**: while the member with the lowest affinity satisfies
//!    `a(x) < t × |C|`, move it back out.
//! 4. Repeat 2–3 until a full pass changes nothing, then close `C`.
//!
//! The affinity `a(x)` of an item is the sum of its similarities to all
//! current members of `C`. For a member this includes its own similarity
//! `sim(x, x)`, added when it enters and taken back when it leaves. Since
//! `t × 0 = 0`, the first item of every cluster is always admitted, and a lone
//! member is never evicted.
//!
//! ## Tie-Breaking
//!
//! Among equal extremal affinities the item met first in container order wins.
//! Items moved back out of `C` go to the end of the unassigned list.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) measure lookups per cluster in the worst case.
//! - **Space**: O(n).
//!
//! ## References
//!
//! Ben-Dor, Shamir, Yakhini (1999). "Clustering gene expression patterns."
//! Journal of Computational Biology 6(3-4), 281–297.

use super::traits::ClusterAlgorithm;
use crate::error::{Error, Result};
use crate::measure::PairwiseMeasure;
use crate::partition::{Index, Partition};

/// An item during a CAST run: its index and running affinity to the open cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CastItem {
    index: Index,
    affinity: f64,
}

/// CAST clustering over a similarity measure.
#[derive(Debug, Clone)]
pub struct Cast<S> {
    similarity: S,
    /// Affinity threshold `t`.
    threshold: f64,
    /// Safety cap on add/remove passes per cluster.
    max_passes: usize,
}

impl<S: PairwiseMeasure> Cast<S> {
    /// Create a CAST clusterer.
    ///
    /// `threshold` is the mean similarity an item must keep with the other
    /// members of its cluster. It must be finite and non-negative.
    pub fn new(similarity: S, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: format!("must be finite and non-negative, got {threshold}"),
            });
        }
        Ok(Self {
            similarity,
            threshold,
            max_passes: 1000,
        })
    }

    /// Set the cap on add/remove passes per cluster.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Affinity threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Bound similarity.
    pub fn similarity(&self) -> &S {
        &self.similarity
    }

    /// Move `source[pos]` into `target`, then shift every affinity in both
    /// sets, the moved item's own included, by `sign × sim(item, moved)`.
    fn transfer(
        &mut self,
        source: &mut Vec<CastItem>,
        target: &mut Vec<CastItem>,
        pos: usize,
        sign: f64,
    ) {
        let moved = source.remove(pos);
        target.push(moved);
        for item in source.iter_mut().chain(target.iter_mut()) {
            item.affinity += sign * self.similarity.compute(item.index, moved.index);
        }
    }

    /// Grow one cluster out of `unassigned`.
    fn grow_cluster(&mut self, unassigned: &mut Vec<CastItem>) -> Vec<CastItem> {
        let t = self.threshold;
        let mut open: Vec<CastItem> = Vec::new();
        for item in unassigned.iter_mut() {
            item.affinity = 0.0;
        }

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            if passes > self.max_passes {
                log::warn!(
                    "CAST: cluster did not stabilize after {} passes, closing it with {} members",
                    self.max_passes,
                    open.len()
                );
                break;
            }

            while let Some(best) = extremum(unassigned, |a, b| a > b) {
                if unassigned[best].affinity >= t * open.len() as f64 {
                    self.transfer(unassigned, &mut open, best, 1.0);
                    changed = true;
                } else {
                    break;
                }
            }

            while open.len() > 1 {
                let Some(worst) = extremum(&open, |a, b| a < b) else {
                    break;
                };
                if open[worst].affinity < t * open.len() as f64 {
                    self.transfer(&mut open, unassigned, worst, -1.0);
                    changed = true;
                } else {
                    break;
                }
            }
        }
        open
    }
}

/// Position of the first item whose affinity beats every other under `better`.
fn extremum(items: &[CastItem], better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let mut best = 0;
    for (pos, item) in items.iter().enumerate().skip(1) {
        if better(item.affinity, items[best].affinity) {
            best = pos;
        }
    }
    Some(best)
}

impl<S: PairwiseMeasure> ClusterAlgorithm for Cast<S> {
    type Measure = S;

    fn run(&mut self) -> Partition {
        let n = self.similarity.len();
        log::debug!("{}: clustering {n} items", self.name());

        let mut unassigned: Vec<CastItem> = (0..n)
            .map(|index| CastItem {
                index,
                affinity: 0.0,
            })
            .collect();
        let mut partition = Partition::new();
        let mut next_label = 0;

        while !unassigned.is_empty() {
            let cluster = self.grow_cluster(&mut unassigned);
            debug_assert!(!cluster.is_empty(), "CAST closed an empty cluster");
            log::trace!("CAST: cluster {next_label} closed with {} items", cluster.len());
            for item in &cluster {
                partition.set_label(item.index, next_label);
            }
            next_label += 1;
        }

        log::debug!("{}: {} clusters", self.name(), partition.n_clusters());
        partition
    }

    fn name(&self) -> String {
        format!("CAST_{:.3}", self.threshold)
    }

    fn invalidate(&mut self) {
        self.similarity.invalidate();
    }

    fn set_measure(&mut self, measure: S) -> S {
        std::mem::replace(&mut self.similarity, measure)
    }
}
