//! Weighted undirected graph for modularity optimization.
//!
//! Nodes are `0..n`. Edge weights live in a petgraph arena; each node also
//! carries a self-loop weight, which after contraction holds the internal
//! weight of the community the node stands for.
//!
//! Weighted degree counts the self-loop once, and the total weight counts it
//! half:
//!
//! ```text
//! k_i = Σ_j w_ij + loop_i
//! W   = Σ_{i<j} w_ij + Σ_i loop_i / 2
//! ```
//!
//! so that `Σ_i k_i = 2W` holds at every contraction level.

use crate::error::{Error, Result};
use crate::measure::PairwiseMeasure;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

/// Immutable weighted graph with per-node self-loops.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    graph: UnGraph<(), f64>,
    self_loops: Vec<f64>,
    /// Neighbor lists sorted by node, self excluded.
    adjacency: Vec<Vec<(usize, f64)>>,
    degrees: Vec<f64>,
    total_weight: f64,
}

impl WeightedGraph {
    /// Build from a pairwise weight provider.
    ///
    /// Only pairs `i < j` with a strictly positive weight become edges. The
    /// diagonal is read as self-loop weight when `keep_self_loops` is set and
    /// ignored otherwise.
    pub fn from_measure<M: PairwiseMeasure + ?Sized>(measure: &mut M, keep_self_loops: bool) -> Self {
        let n = measure.len();
        let mut self_loops = vec![0.0; n];
        let mut edges = Vec::new();
        for i in 0..n {
            if keep_self_loops {
                self_loops[i] = measure.compute(i, i);
            }
            for j in (i + 1)..n {
                let w = measure.compute(i, j);
                if w > 0.0 {
                    edges.push((i, j, w));
                }
            }
        }
        log::trace!("graph over {n} nodes with {} edges", edges.len());
        Self::assemble(n, edges, self_loops)
    }

    /// Build from an explicit edge list.
    ///
    /// Repeated pairs accumulate, `(i, i, w)` adds to the self-loop of `i`, and
    /// non-positive weights are skipped.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when `self_loops` is not `n` long, `IndexOutOfRange`
    /// when an edge names a node `>= n`.
    pub fn from_edges<I>(n: usize, edges: I, self_loops: Vec<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        if self_loops.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: self_loops.len(),
            });
        }
        let edges: Vec<(usize, usize, f64)> = edges.into_iter().collect();
        if let Some(&(a, b, _)) = edges.iter().find(|&&(a, b, _)| a >= n || b >= n) {
            return Err(Error::IndexOutOfRange {
                index: a.max(b),
                len: n,
            });
        }
        Ok(Self::assemble(n, edges, self_loops))
    }

    /// Indices must already be in range.
    pub(crate) fn assemble<I>(n: usize, edges: I, mut self_loops: Vec<f64>) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut links: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (a, b, w) in edges {
            if w.is_nan() || w <= 0.0 {
                continue;
            }
            if a == b {
                self_loops[a] += w;
            } else {
                *links.entry((a.min(b), a.max(b))).or_insert(0.0) += w;
            }
        }

        let mut graph = UnGraph::<(), f64>::with_capacity(n, links.len());
        for _ in 0..n {
            graph.add_node(());
        }
        for ((a, b), w) in links {
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), w);
        }

        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            adjacency[a].push((b, *edge.weight()));
            adjacency[b].push((a, *edge.weight()));
        }
        for list in &mut adjacency {
            list.sort_by_key(|&(node, _)| node);
        }

        let degrees: Vec<f64> = adjacency
            .iter()
            .zip(&self_loops)
            .map(|(list, &l)| list.iter().map(|&(_, w)| w).sum::<f64>() + l)
            .collect();
        let total_weight =
            graph.edge_weights().sum::<f64>() + self_loops.iter().sum::<f64>() / 2.0;

        Self {
            graph,
            self_loops,
            adjacency,
            degrees,
            total_weight,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges between distinct nodes.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Weight between `a` and `b`; the self-loop when `a == b`, 0 when unlinked.
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return self.self_loop(a);
        }
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .map_or(0.0, |e| self.graph[e])
    }

    /// Self-loop weight of `node`.
    pub fn self_loop(&self, node: usize) -> f64 {
        self.self_loops[node]
    }

    /// Weighted degree of `node`, self-loop counted once.
    pub fn linked_weight(&self, node: usize) -> f64 {
        self.degrees[node]
    }

    /// `W`: edges once plus half the self-loops.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Neighbors of `node` with edge weights, ascending by node.
    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }

    /// Every edge as `(a, b, w)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph.edge_references().map(|e| {
            let (a, b) = (e.source().index(), e.target().index());
            (a.min(b), a.max(b), *e.weight())
        })
    }
}
