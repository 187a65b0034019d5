//! Louvain algorithm for community detection.
//!
//! Fast modularity optimization through local node moves and graph aggregation.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! 1. **Phase 1 (Local Moving)**: Start with each node in its own community.
//!    For each node, compare the modularity it would add to every neighboring
//!    community against what it contributes to its own, and move it to the
//!    best strictly improving one. Sweep until a full pass moves nothing.
//!
//! 2. **Phase 2 (Aggregation)**: Build a meta-graph where communities become
//!    single nodes. Edge weights are sums of edges between communities.
//!    Self-loops carry each community's internal weight.
//!
//! 3. **Iterate**: Repeat phases 1-2 on the meta-graph until phase 1 makes no
//!    move. Modularity never decreases from one level to the next.
//!
//! Node order is index order unless shuffling is enabled.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use super::graph::WeightedGraph;
use super::network::Network;
use crate::cluster::ClusterAlgorithm;
use crate::measure::PairwiseMeasure;
use crate::partition::Partition;
use rand::prelude::*;

/// Louvain community detection over a pairwise weight provider.
///
/// The graph is built once from the provider: pairs `i < j` with positive
/// weight become edges, the diagonal is ignored.
#[derive(Debug)]
pub struct Louvain<M> {
    weights: M,
    network: Network,
    /// Item → node of the current level.
    item_to_node: Vec<usize>,
    /// Random seed for node-order shuffling.
    seed: Option<u64>,
    shuffle: bool,
    /// Maximum sweeps per phase 1.
    max_passes: usize,
    /// Modularity after each successful phase 1.
    levels: Vec<f64>,
}

impl<M: PairwiseMeasure> Louvain<M> {
    /// Create a detector and build its graph from `weights`.
    pub fn new(mut weights: M) -> Self {
        let graph = WeightedGraph::from_measure(&mut weights, false);
        let n = graph.node_count();
        Self {
            weights,
            network: Network::new(graph),
            item_to_node: (0..n).collect(),
            seed: None,
            shuffle: false,
            max_passes: 1000,
            levels: Vec::new(),
        }
    }

    /// Shuffle node order with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.shuffle = true;
        self
    }

    /// Enable or disable node-order shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Cap on sweeps per phase 1.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Network of the current level.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Modularity reached by each level so far.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Current item → community partition, labels dense in `0..k`.
    pub fn partition(&self) -> Partition {
        let labels: Vec<usize> = self
            .item_to_node
            .iter()
            .map(|&node| self.network.community(node))
            .collect();
        Partition::from_labels(&labels).compacted()
    }

    fn node_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.network.node_count()).collect();
        if self.shuffle {
            let mut rng: Box<dyn RngCore> = match self.seed {
                Some(s) => Box::new(StdRng::seed_from_u64(s.wrapping_add(self.levels.len() as u64))),
                None => Box::new(rand::rng()),
            };
            order.shuffle(&mut rng);
        }
        order
    }

    /// Best community for `node` and the weight it shares with it. Staying put
    /// wins unless another community beats it strictly; ties keep the first
    /// neighbor community met.
    fn best_community(&self, node: usize, own_shared: f64) -> (usize, f64) {
        let own = self.network.community(node);
        let mut best = (own, own_shared);
        let mut best_gain = -self.network.modularity_loss(node, own_shared);
        for comm in self.network.neighbor_communities(node) {
            if comm == own {
                continue;
            }
            let shared = self.network.shared_weight(node, comm);
            let gain = self.network.modularity_gain(node, comm, shared);
            if gain > best_gain {
                best_gain = gain;
                best = (comm, shared);
            }
        }
        best
    }

    /// Local moving. Returns true when at least one node changed community.
    pub fn first_phase(&mut self) -> bool {
        if self.network.total_weight() <= 0.0 {
            return false;
        }
        let order = self.node_order();
        let mut changed = false;
        for pass in 0..self.max_passes {
            let mut moved = 0;
            for &node in &order {
                let own = self.network.community(node);
                let own_shared = self.network.shared_weight(node, own);
                let (target, target_shared) = self.best_community(node, own_shared);
                if target != own {
                    self.network.move_node(node, target, own_shared, target_shared);
                    moved += 1;
                }
            }
            log::trace!("LOUVAIN: pass {pass} moved {moved} nodes");
            if moved == 0 {
                return changed;
            }
            changed = true;
        }
        log::warn!(
            "LOUVAIN: local moving did not settle after {} passes",
            self.max_passes
        );
        changed
    }

    /// Contract communities into nodes and restart from singletons.
    pub fn second_phase(&mut self) {
        let (graph, remap) = self.network.contract();
        for node in &mut self.item_to_node {
            let comm = self.network.community(*node);
            // every live community has an entry
            if let Some(new) = remap[comm] {
                *node = new;
            }
        }
        log::trace!(
            "LOUVAIN: contracted {} nodes into {}",
            self.network.node_count(),
            graph.node_count()
        );
        self.network.set_graph(graph);
    }

    fn reset(&mut self) {
        let graph = WeightedGraph::from_measure(&mut self.weights, false);
        self.item_to_node = (0..graph.node_count()).collect();
        self.network = Network::new(graph);
        self.levels.clear();
    }
}

impl<M: PairwiseMeasure> ClusterAlgorithm for Louvain<M> {
    type Measure = M;

    fn run(&mut self) -> Partition {
        log::debug!("LOUVAIN: clustering {} items", self.item_to_node.len());
        while self.first_phase() {
            if let Some(q) = self.network.modularity() {
                self.levels.push(q);
            }
            let before = self.network.node_count();
            self.second_phase();
            if self.network.node_count() == before {
                // moves cancelled out; nothing left to contract
                break;
            }
        }
        let partition = self.partition();
        log::debug!(
            "LOUVAIN: {} communities after {} levels",
            partition.n_clusters(),
            self.levels.len()
        );
        partition
    }

    fn name(&self) -> String {
        "LOUVAIN".to_string()
    }

    fn invalidate(&mut self) {
        self.weights.invalidate();
        self.reset();
    }

    fn set_measure(&mut self, measure: M) -> M {
        let old = std::mem::replace(&mut self.weights, measure);
        self.reset();
        old
    }
}
