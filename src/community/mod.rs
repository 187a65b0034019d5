//! Community detection by modularity optimization.
//!
//! Given a symmetric weight provider, find groups of items that are densely
//! linked among themselves and sparsely linked to the rest.
//!
//! ## The Modularity Objective
//!
//! ```text
//! Q = Σ_c [ in_c / 2W - (tot_c / 2W)² ]
//! ```
//!
//! Where:
//! - W = total edge weight (each edge once, self-loops halved)
//! - in_c = internal weight of community c, edges counted from both ends
//! - tot_c = summed weighted degree of the members of c
//!
//! **Intuition**: a community scores when it holds more internal weight than
//! a random graph with the same degrees would give it.
//!
//! ## Layers
//!
//! - [`WeightedGraph`]: immutable weighted graph built from a measure or an
//!   edge list.
//! - [`Network`]: community assignment over one graph level, with the
//!   per-community aggregates Louvain updates on every move.
//! - [`Louvain`]: local moving plus contraction until nothing moves.
//!
//! ## Usage
//!
//! ```rust
//! use lvclust::cluster::ClusterAlgorithm;
//! use lvclust::community::Louvain;
//! use lvclust::measure::MatrixMeasure;
//!
//! let mut weights = MatrixMeasure::zeros(4);
//! weights.set(0, 1, 1.0);
//! weights.set(2, 3, 1.0);
//!
//! let communities = Louvain::new(weights).run();
//! assert_eq!(communities.to_label_vec().unwrap(), vec![0, 0, 1, 1]);
//! ```
//!
//! ## References
//!
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."

mod graph;
mod louvain;
mod network;

pub use graph::WeightedGraph;
pub use louvain::Louvain;
pub use network::Network;
