//! Clustering traits.

use crate::measure::PairwiseMeasure;
use crate::partition::Partition;

/// Trait for clustering algorithms driven by a pairwise measure.
pub trait ClusterAlgorithm {
    /// Measure the algorithm is bound to.
    type Measure: PairwiseMeasure;

    /// Cluster items `0..measure.len()`.
    ///
    /// Returns a partition covering every item.
    fn run(&mut self) -> Partition;

    /// Human-readable name including parameters, e.g. `CAST_0.600`.
    fn name(&self) -> String;

    /// Drop memoized measure state. Propagates to the measure provider.
    fn invalidate(&mut self);

    /// Rebind to a freshly built measure, returning the previous one.
    fn set_measure(&mut self, measure: Self::Measure) -> Self::Measure;
}
