//! Locality criteria.
//!
//! Markers far apart on the genome are not expected to share a latent
//! ancestor, so the provider skips their (expensive) measurement and reports
//! the least informative score instead.

use super::traits::LocalityCriterion;
use crate::error::{Error, Result};

/// Accepts every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl LocalityCriterion for AcceptAll {
    fn valid(&self, _a: usize, _b: usize) -> bool {
        true
    }
}

/// Accepts pairs whose positions differ by strictly less than `max_distance`.
///
/// Positions are indexed by local item index.
#[derive(Debug, Clone)]
pub struct PositionCriterion {
    positions: Vec<i64>,
    max_distance: i64,
}

impl PositionCriterion {
    /// Create a criterion over `positions`.
    pub fn new(positions: Vec<i64>, max_distance: i64) -> Self {
        Self {
            positions,
            max_distance,
        }
    }

    /// Maximum (exclusive) allowed distance.
    pub fn max_distance(&self) -> i64 {
        self.max_distance
    }

    /// Number of positioned items.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no item is positioned.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl LocalityCriterion for PositionCriterion {
    /// # Panics
    ///
    /// Panics if either index has no position.
    fn valid(&self, a: usize, b: usize) -> bool {
        (self.positions[a] - self.positions[b]).abs() < self.max_distance
    }
}

/// Position criterion that widens the allowed distance across hierarchy levels.
///
/// Two items at levels `la` and `lb` may be compared when their positions
/// differ by less than `4 * (|la - lb| + 1) * max_distance`. A latent variable
/// sits at the mean position of its children, so the window grows with the
/// level gap.
#[derive(Debug, Clone)]
pub struct LevelledPositionCriterion {
    positions: Vec<i64>,
    levels: Vec<i64>,
    max_distance: i64,
}

impl LevelledPositionCriterion {
    /// Create a criterion; `positions` and `levels` are indexed by local item.
    pub fn new(positions: Vec<i64>, levels: Vec<i64>, max_distance: i64) -> Result<Self> {
        if positions.len() != levels.len() {
            return Err(Error::DimensionMismatch {
                expected: positions.len(),
                found: levels.len(),
            });
        }
        Ok(Self {
            positions,
            levels,
            max_distance,
        })
    }
}

impl LocalityCriterion for LevelledPositionCriterion {
    fn valid(&self, a: usize, b: usize) -> bool {
        let delta = (self.positions[a] - self.positions[b]).abs();
        let level_gap = (self.levels[a] - self.levels[b]).abs() + 1;
        delta < 4 * level_gap * self.max_distance
    }
}

/// Adapts a closure into a criterion.
pub struct FnCriterion<F>(pub F);

impl<F: Fn(usize, usize) -> bool> LocalityCriterion for FnCriterion<F> {
    fn valid(&self, a: usize, b: usize) -> bool {
        (self.0)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_criterion_is_exclusive() {
        let c = PositionCriterion::new(vec![0, 4, 5, 10], 5);
        assert!(c.valid(0, 1));
        assert!(!c.valid(0, 2), "distance equal to max is rejected");
        assert!(c.valid(2, 1));
        assert!(!c.valid(3, 0));
    }

    #[test]
    fn test_levelled_criterion_widens_with_level_gap() {
        let c = LevelledPositionCriterion::new(vec![0, 30, 30], vec![0, 0, 1], 5).unwrap();
        // same level: 4 * 1 * 5 = 20
        assert!(!c.valid(0, 1));
        // one level apart: 4 * 2 * 5 = 40
        assert!(c.valid(0, 2));
    }

    #[test]
    fn test_levelled_criterion_length_mismatch() {
        assert!(LevelledPositionCriterion::new(vec![0, 1], vec![0], 3).is_err());
    }

    #[test]
    fn test_fn_criterion() {
        let c = FnCriterion(|a: usize, b: usize| a / 2 == b / 2);
        assert!(c.valid(0, 1));
        assert!(!c.valid(1, 2));
        assert!(AcceptAll.valid(0, 1000));
    }
}
