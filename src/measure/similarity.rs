//! Normalized mutual-information similarity with memoization.
//!
//! ```text
//! sim(a, b) = I(a; b) / min(H(a), H(b)),   I(a; b) = H(a) + H(b) - H(a, b)
//! ```
//!
//! The score is 1 for functionally dependent variables and 0 for independent
//! ones. When the smaller entropy is exactly zero (a constant variable) the
//! similarity is defined as 0.
//!
//! ## Caching
//!
//! Marginal entropies are memoized per item. Pairwise scores can additionally
//! be memoized in a flattened upper-triangular table addressed by
//! [`index_of_pair`]. Both caches are dropped by
//! [`invalidate`](PairwiseMeasure::invalidate); the provider has no dirty
//! tracking of its own.

use super::source::VariableSource;
use super::traits::{LocalityCriterion, PairwiseMeasure};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Largest similarity value.
pub const MAX_SIMILARITY: f64 = 1.0;
/// Smallest similarity value.
pub const MIN_SIMILARITY: f64 = 0.0;

/// Position of pair `(a, b)`, `a < b < n`, in a flattened upper triangle.
///
/// ```rust
/// use lvclust::measure::index_of_pair;
///
/// assert_eq!(index_of_pair(0, 1, 4), 0);
/// assert_eq!(index_of_pair(0, 3, 4), 2);
/// assert_eq!(index_of_pair(1, 2, 4), 3);
/// assert_eq!(index_of_pair(2, 3, 4), 5);
/// ```
#[inline]
pub fn index_of_pair(a: usize, b: usize, n: usize) -> usize {
    debug_assert!(a < b && b < n, "index_of_pair({a}, {b}, {n})");
    (2 * n - a - 1) * a / 2 + b - a - 1
}

/// Similarity between variables of a [`VariableSource`], addressed by local index.
pub struct MutualInfoSimilarity<'a, V: ?Sized> {
    source: &'a V,
    local_to_global: Vec<usize>,
    criterion: Option<Arc<dyn LocalityCriterion>>,
    entropies: Vec<Option<f64>>,
    pairs: Option<Vec<Option<f64>>>,
}

impl<'a, V: VariableSource + ?Sized> MutualInfoSimilarity<'a, V> {
    /// Bind a provider to `source` through a local → global index map.
    pub fn new(source: &'a V, local_to_global: Vec<usize>) -> Result<Self> {
        let len = source.n_variables();
        if let Some(&bad) = local_to_global.iter().find(|&&g| g >= len) {
            return Err(Error::IndexOutOfRange { index: bad, len });
        }
        let n = local_to_global.len();
        Ok(Self {
            source,
            local_to_global,
            criterion: None,
            entropies: vec![None; n],
            pairs: None,
        })
    }

    /// Provider over every variable of `source`, local index = global id.
    pub fn over_all(source: &'a V) -> Self {
        let n = source.n_variables();
        Self {
            source,
            local_to_global: (0..n).collect(),
            criterion: None,
            entropies: vec![None; n],
            pairs: None,
        }
    }

    /// Restrict comparisons with a locality criterion.
    pub fn with_criterion(mut self, criterion: Arc<dyn LocalityCriterion>) -> Self {
        self.set_criterion(Some(criterion));
        self
    }

    /// Memoize pairwise scores in a triangular table.
    pub fn with_pair_cache(mut self) -> Self {
        self.enable_pair_cache();
        self
    }

    /// Replace the locality criterion. Clears the pairwise cache.
    pub fn set_criterion(&mut self, criterion: Option<Arc<dyn LocalityCriterion>>) {
        self.criterion = criterion;
        if let Some(pairs) = self.pairs.as_mut() {
            pairs.iter_mut().for_each(|p| *p = None);
        }
    }

    /// Current locality criterion, shareable with a rebuilt provider.
    pub fn criterion(&self) -> Option<Arc<dyn LocalityCriterion>> {
        self.criterion.clone()
    }

    /// Local → global index map.
    pub fn local_to_global(&self) -> &[usize] {
        &self.local_to_global
    }

    /// Fill the whole pairwise cache so later lookups are O(1).
    pub fn precompute_all(&mut self) {
        self.enable_pair_cache();
        let n = self.len();
        log::debug!("precomputing {} pairwise similarities", n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in (a + 1)..n {
                let _ = self.compute(a, b);
            }
        }
    }

    /// Number of pairwise scores currently memoized.
    pub fn cached_pairs(&self) -> usize {
        self.pairs
            .as_ref()
            .map_or(0, |p| p.iter().filter(|v| v.is_some()).count())
    }

    fn enable_pair_cache(&mut self) {
        if self.pairs.is_none() {
            let n = self.local_to_global.len();
            self.pairs = Some(vec![None; n * n.saturating_sub(1) / 2]);
        }
    }

    fn entropy(&mut self, local: usize) -> f64 {
        if let Some(h) = self.entropies[local] {
            return h;
        }
        let h = self.source.entropy(self.local_to_global[local]);
        self.entropies[local] = Some(h);
        h
    }

    fn measure(&mut self, a: usize, b: usize) -> f64 {
        if let Some(criterion) = &self.criterion {
            if !criterion.valid(a, b) {
                return MIN_SIMILARITY;
            }
        }
        let h_a = self.entropy(a);
        let h_b = self.entropy(b);
        let min_h = h_a.min(h_b);
        if min_h == 0.0 {
            return MIN_SIMILARITY;
        }
        let (ga, gb) = (self.local_to_global[a], self.local_to_global[b]);
        let mi = h_a + h_b - self.source.joint_entropy(ga, gb);
        (mi / min_h).clamp(MIN_SIMILARITY, MAX_SIMILARITY)
    }
}

impl<V: VariableSource + ?Sized> PairwiseMeasure for MutualInfoSimilarity<'_, V> {
    fn len(&self) -> usize {
        self.local_to_global.len()
    }

    /// # Panics
    ///
    /// Panics if either index is `>= len()`.
    fn compute(&mut self, a: usize, b: usize) -> f64 {
        if a == b {
            return MAX_SIMILARITY;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        let n = self.len();
        let slot = index_of_pair(a, b, n);
        if let Some(Some(v)) = self.pairs.as_ref().map(|p| p[slot]) {
            return v;
        }
        let v = self.measure(a, b);
        if let Some(pairs) = self.pairs.as_mut() {
            pairs[slot] = Some(v);
        }
        v
    }

    fn invalidate(&mut self) {
        log::debug!("invalidating similarity caches over {} items", self.len());
        self.entropies = vec![None; self.local_to_global.len()];
        if let Some(pairs) = self.pairs.as_mut() {
            pairs.iter_mut().for_each(|p| *p = None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::criteria::PositionCriterion;
    use crate::measure::source::EmpiricalSource;
    use std::cell::Cell;

    fn source() -> EmpiricalSource {
        EmpiricalSource::from_rows(&[
            vec![0, 0, 1, 1, 2, 2],
            vec![0, 0, 1, 1, 2, 2],
            vec![0, 1, 0, 1, 0, 1],
            vec![1, 1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    /// Counts joint-entropy calls to observe caching.
    struct Counting<'a> {
        inner: &'a EmpiricalSource,
        joints: Cell<usize>,
    }

    impl VariableSource for Counting<'_> {
        fn n_variables(&self) -> usize {
            self.inner.n_variables()
        }
        fn entropy(&self, var: usize) -> f64 {
            self.inner.entropy(var)
        }
        fn joint_entropy(&self, a: usize, b: usize) -> f64 {
            self.joints.set(self.joints.get() + 1);
            self.inner.joint_entropy(a, b)
        }
    }

    #[test]
    fn test_index_of_pair_is_dense() {
        let n = 6;
        let mut seen = vec![false; n * (n - 1) / 2];
        for a in 0..n {
            for b in (a + 1)..n {
                let k = index_of_pair(a, b, n);
                assert!(!seen[k]);
                seen[k] = true;
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn test_identical_variables_have_max_similarity() {
        let src = source();
        let mut sim = MutualInfoSimilarity::over_all(&src);
        assert!((sim.compute(0, 1) - 1.0).abs() < 1e-12);
        assert_eq!(sim.compute(2, 2), MAX_SIMILARITY);
    }

    #[test]
    fn test_symmetry_and_range() {
        let src = source();
        let mut sim = MutualInfoSimilarity::over_all(&src);
        for a in 0..4 {
            for b in 0..4 {
                let s = sim.compute(a, b);
                assert!((0.0..=1.0).contains(&s));
                assert_eq!(s, sim.compute(b, a));
            }
        }
    }

    #[test]
    fn test_constant_variable_has_zero_similarity() {
        let src = source();
        let mut sim = MutualInfoSimilarity::over_all(&src);
        assert_eq!(sim.compute(0, 3), 0.0);
    }

    #[test]
    fn test_criterion_short_circuits() {
        let src = source();
        let counting = Counting {
            inner: &src,
            joints: Cell::new(0),
        };
        let criterion = Arc::new(PositionCriterion::new(vec![0, 100, 1, 2], 5));
        let mut sim = MutualInfoSimilarity::over_all(&counting).with_criterion(criterion);
        assert_eq!(sim.compute(0, 1), MIN_SIMILARITY);
        assert_eq!(counting.joints.get(), 0);
        let _ = sim.compute(0, 2);
        assert_eq!(counting.joints.get(), 1);
    }

    #[test]
    fn test_local_to_global_mapping() {
        let src = source();
        let mut sim = MutualInfoSimilarity::new(&src, vec![2, 0, 1]).unwrap();
        assert_eq!(sim.len(), 3);
        // local 1 and 2 are globals 0 and 1: identical rows
        assert!((sim.compute(1, 2) - 1.0).abs() < 1e-12);
        assert!(MutualInfoSimilarity::new(&src, vec![0, 4]).is_err());
    }

    #[test]
    fn test_pair_cache_avoids_recomputation() {
        let src = source();
        let counting = Counting {
            inner: &src,
            joints: Cell::new(0),
        };
        let mut sim = MutualInfoSimilarity::over_all(&counting).with_pair_cache();
        let first = sim.compute(0, 2);
        let second = sim.compute(2, 0);
        assert_eq!(first, second);
        assert_eq!(counting.joints.get(), 1);
        assert_eq!(sim.cached_pairs(), 1);

        sim.invalidate();
        assert_eq!(sim.cached_pairs(), 0);
        let _ = sim.compute(0, 2);
        assert_eq!(counting.joints.get(), 2);
    }

    #[test]
    fn test_precompute_matches_lazy() {
        let src = source();
        let mut lazy = MutualInfoSimilarity::over_all(&src);
        let mut eager = MutualInfoSimilarity::over_all(&src);
        eager.precompute_all();
        assert_eq!(eager.cached_pairs(), 6);
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(lazy.compute(a, b), eager.compute(a, b));
            }
        }
    }
}
