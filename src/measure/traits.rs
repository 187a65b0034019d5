//! Pairwise measure traits.

/// A symmetric pairwise score over items `0..len()`.
///
/// `compute` takes `&mut self` because providers memoize on read.
pub trait PairwiseMeasure {
    /// Number of items the measure is defined over.
    fn len(&self) -> usize;

    /// True when the measure covers no item.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Score between items `a` and `b`. Must equal `compute(b, a)`.
    fn compute(&mut self, a: usize, b: usize) -> f64;

    /// Drop every memoized value. Call whenever the underlying variables change.
    fn invalidate(&mut self) {}
}

impl<M: PairwiseMeasure + ?Sized> PairwiseMeasure for &mut M {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn compute(&mut self, a: usize, b: usize) -> f64 {
        (**self).compute(a, b)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}

impl<M: PairwiseMeasure + ?Sized> PairwiseMeasure for Box<M> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn compute(&mut self, a: usize, b: usize) -> f64 {
        (**self).compute(a, b)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}

/// Locality predicate: may items `a` and `b` be compared at all?
pub trait LocalityCriterion {
    /// True when the pair is close enough to warrant a real measurement.
    fn valid(&self, a: usize, b: usize) -> bool;
}
