//! # lvclust
//!
//! Clustering engine for building hierarchical latent-variable models over
//! correlated discrete variables (e.g. genomic markers).
//!
//! Each round of the model builder partitions the current variables, turns
//! cohesive groups into latent variables and repeats on the reduced set. This
//! crate owns the partitioning step: pairwise measures with caching and a
//! locality constraint, three clustering algorithms over them, and the
//! mutual-information metrics used to compare two partitions.
//!
//! - [`measure`]: normalized mutual-information similarity, dissimilarity,
//!   locality criteria.
//! - [`cluster`]: CAST, DBSCAN and configuration-driven selection.
//! - [`community`]: Louvain modularity optimization.
//! - [`metrics`]: contingency tables, EMI, AMI, NMI.
//!
//! ```rust
//! use lvclust::cluster::{Cast, ClusterAlgorithm};
//! use lvclust::measure::{EmpiricalSource, MutualInfoSimilarity};
//!
//! let data = EmpiricalSource::from_rows(&[
//!     vec![0, 0, 0, 1, 1, 1, 2, 2, 2],
//!     vec![0, 0, 0, 1, 1, 1, 2, 2, 2],
//!     vec![0, 1, 2, 0, 1, 2, 0, 1, 2],
//!     vec![0, 1, 2, 0, 1, 2, 0, 1, 2],
//! ]).unwrap();
//!
//! let sim = MutualInfoSimilarity::over_all(&data).with_pair_cache();
//! let mut cast = Cast::new(sim, 0.5).unwrap();
//! let partition = cast.run();
//! assert_eq!(partition.to_clustering(), vec![vec![0, 1], vec![2, 3]]);
//! ```

pub mod cluster;
pub mod community;
/// Error types used across `lvclust`.
pub mod error;
pub mod measure;
pub mod metrics;
pub mod partition;

pub use error::{Error, Result};
pub use partition::{Cluster, Clustering, Index, Label, Partition};

pub use cluster::{Algorithm, AlgorithmConfig, Cast, ClusterAlgorithm, Dbscan};
pub use community::{Louvain, Network, WeightedGraph};
pub use measure::{Dissimilarity, MutualInfoSimilarity, PairwiseMeasure};
pub use metrics::{adjusted_mutual_information, expected_mutual_information};
