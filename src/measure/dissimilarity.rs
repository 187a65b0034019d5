//! Dissimilarity as the complement of a similarity.

use super::traits::PairwiseMeasure;

/// Largest dissimilarity value.
pub const MAX_DISSIMILARITY: f64 = 1.0;

/// `1 - similarity`, delegating caching and invalidation to the wrapped measure.
#[derive(Debug, Clone)]
pub struct Dissimilarity<S> {
    similarity: S,
}

impl<S: PairwiseMeasure> Dissimilarity<S> {
    /// Wrap a similarity in `[0, 1]`.
    pub fn new(similarity: S) -> Self {
        Self { similarity }
    }

    /// Underlying similarity.
    pub fn similarity(&self) -> &S {
        &self.similarity
    }

    /// Mutable access to the underlying similarity.
    pub fn similarity_mut(&mut self) -> &mut S {
        &mut self.similarity
    }

    /// Unwrap the similarity.
    pub fn into_inner(self) -> S {
        self.similarity
    }
}

impl<S: PairwiseMeasure> PairwiseMeasure for Dissimilarity<S> {
    fn len(&self) -> usize {
        self.similarity.len()
    }

    fn compute(&mut self, a: usize, b: usize) -> f64 {
        MAX_DISSIMILARITY - self.similarity.compute(a, b)
    }

    fn invalidate(&mut self) {
        self.similarity.invalidate()
    }
}
