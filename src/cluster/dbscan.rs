//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups items by neighborhood density over a dissimilarity:
//!
//! - **Epsilon (ε)**: items at dissimilarity `<= ε` are neighbors.
//! - **MinPts**: an item is *core* when its neighborhood, itself included,
//!   holds at least MinPts items.
//! - **Border item**: within ε of a core item but not core itself.
//! - **Noise item**: neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. For each unvisited item P, in index order:
//!    - mark P visited and query its neighborhood;
//!    - if P is not core, leave it unlabelled (it may become a border item later);
//!    - otherwise open a new cluster with P and expand it.
//! 2. Expansion walks a work-list seeded with P's neighborhood. Each unvisited
//!    item is visited; if it is core its neighborhood joins the work-list. Any
//!    item without a label takes the current cluster's. A border item already
//!    claimed by an earlier cluster keeps that label.
//! 3. Items still unlabelled after the pass become singleton clusters, labelled
//!    after the last density cluster in index order. Every item ends up
//!    labelled; there is no noise label in the output.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) measure lookups.
//! - **Space**: O(n).
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use super::traits::ClusterAlgorithm;
use crate::error::{Error, Result};
use crate::measure::PairwiseMeasure;
use crate::partition::{Index, Label, Partition};
use std::collections::VecDeque;

/// DBSCAN clustering over a dissimilarity measure.
#[derive(Debug, Clone)]
pub struct Dbscan<D> {
    dissimilarity: D,
    /// Minimum neighborhood size, the item itself included.
    min_points: usize,
    /// Neighborhood radius.
    epsilon: f64,
}

impl<D: PairwiseMeasure> Dbscan<D> {
    /// Create a DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `dissimilarity` - Pairwise dissimilarity, 0 for identical items.
    /// * `min_points` - Neighbors (self included) needed for a core item. At least 1.
    /// * `epsilon` - Neighborhood radius. Finite and non-negative.
    pub fn new(dissimilarity: D, min_points: usize, epsilon: f64) -> Result<Self> {
        if min_points == 0 {
            return Err(Error::InvalidParameter {
                name: "min_points",
                message: "must be at least 1".to_string(),
            });
        }
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: format!("must be finite and non-negative, got {epsilon}"),
            });
        }
        Ok(Self {
            dissimilarity,
            min_points,
            epsilon,
        })
    }

    /// Minimum neighborhood size.
    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Neighborhood radius.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Bound dissimilarity.
    pub fn dissimilarity(&self) -> &D {
        &self.dissimilarity
    }

    /// Items within ε of `item`, itself included, in index order.
    pub fn region_query(&mut self, item: Index) -> Vec<Index> {
        let eps = self.epsilon;
        (0..self.dissimilarity.len())
            .filter(|&other| other == item || self.dissimilarity.compute(item, other) <= eps)
            .collect()
    }

    fn expand_cluster(
        &mut self,
        seeds: Vec<Index>,
        label: Label,
        labels: &mut [Option<Label>],
        visited: &mut [bool],
    ) {
        let mut queued = vec![false; labels.len()];
        for &s in &seeds {
            queued[s] = true;
        }
        let mut work: VecDeque<Index> = seeds.into();

        while let Some(item) = work.pop_front() {
            if !visited[item] {
                visited[item] = true;
                let neighbors = self.region_query(item);
                if neighbors.len() >= self.min_points {
                    for n in neighbors {
                        if !queued[n] {
                            queued[n] = true;
                            work.push_back(n);
                        }
                    }
                }
            }
            if labels[item].is_none() {
                labels[item] = Some(label);
            }
        }
    }
}

impl<D: PairwiseMeasure> ClusterAlgorithm for Dbscan<D> {
    type Measure = D;

    fn run(&mut self) -> Partition {
        let n = self.dissimilarity.len();
        log::debug!("{}: clustering {n} items", self.name());

        let mut labels: Vec<Option<Label>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut n_clusters = 0;

        for item in 0..n {
            if visited[item] {
                continue;
            }
            visited[item] = true;

            let neighbors = self.region_query(item);
            if neighbors.len() < self.min_points {
                continue;
            }

            labels[item] = Some(n_clusters);
            self.expand_cluster(neighbors, n_clusters, &mut labels, &mut visited);
            n_clusters += 1;
        }

        let mut partition = Partition::new();
        let mut next_label = n_clusters;
        for (item, label) in labels.into_iter().enumerate() {
            match label {
                Some(l) => {
                    partition.set_label(item, l);
                }
                None => {
                    partition.set_label(item, next_label);
                    next_label += 1;
                }
            }
        }

        log::debug!(
            "{}: {n_clusters} density clusters, {} singletons",
            self.name(),
            next_label - n_clusters
        );
        partition
    }

    fn name(&self) -> String {
        format!("DBSCAN_{}_{:.3}", self.min_points, self.epsilon)
    }

    fn invalidate(&mut self) {
        self.dissimilarity.invalidate();
    }

    fn set_measure(&mut self, measure: D) -> D {
        std::mem::replace(&mut self.dissimilarity, measure)
    }
}
