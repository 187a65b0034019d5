//! Clustering algorithms over a pairwise measure.
//!
//! Every algorithm binds to one [`PairwiseMeasure`](crate::measure::PairwiseMeasure),
//! clusters items `0..len()` and returns a [`Partition`](crate::Partition)
//! covering all of them.
//!
//! ## Algorithms
//!
//! ### CAST
//!
//! Grows clusters one at a time: an item joins while its summed similarity to
//! the open cluster reaches `t × |C|` and leaves when its summed similarity to
//! the members, itself included, falls below `t × |C|`. The threshold `t` is the only parameter; the number of
//! clusters follows from it.
//!
//! ### DBSCAN
//!
//! Connects items through dense neighborhoods of a dissimilarity. Items that no
//! dense neighborhood reaches become singletons, so every item is labelled.
//!
//! ### Louvain
//!
//! Lives in [`community`](crate::community); it reads the similarity as graph
//! edge weights and maximizes modularity.
//!
//! | Algorithm | Measure | Parameters | Name |
//! |-----------|---------|------------|------|
//! | [`Cast`] | similarity | `t` | `CAST_0.600` |
//! | [`Dbscan`] | dissimilarity | `minPts`, `eps` | `DBSCAN_2_0.450` |
//! | [`Louvain`](crate::community::Louvain) | similarity as weight | `seed` (optional) | `LOUVAIN` |
//!
//! ## Usage
//!
//! ```rust
//! use lvclust::cluster::{Algorithm, AlgorithmConfig, ClusterAlgorithm};
//! use lvclust::measure::MatrixMeasure;
//!
//! let sim = MatrixMeasure::from_rows(&[
//!     vec![1.0, 0.9, 0.1],
//!     vec![0.9, 1.0, 0.1],
//!     vec![0.1, 0.1, 1.0],
//! ]).unwrap();
//!
//! let cfg = AlgorithmConfig::new("CAST").with_parameter("t", "0.5");
//! let mut algo = Algorithm::from_config(&cfg, sim).unwrap();
//! let partition = algo.run();
//! assert_eq!(partition.n_clusters(), 2);
//! assert_eq!(algo.name(), "CAST_0.500");
//! ```

mod algorithm;
mod cast;
mod dbscan;
mod traits;

pub use algorithm::{Algorithm, AlgorithmConfig};
pub use cast::Cast;
pub use dbscan::Dbscan;
pub use traits::ClusterAlgorithm;
