//! Node-to-community assignment over a [`WeightedGraph`].
//!
//! Per community the network keeps two aggregates, updated in O(1) on every
//! node move:
//!
//! - `in_weight`: internal weight, each internal edge counted twice, plus the
//!   members' self-loops;
//! - `total_linked_weight`: sum of the members' weighted degrees.
//!
//! ```text
//! Q = Σ_c [ in_c / 2W - (tot_c / 2W)² ]
//! ```

use super::graph::WeightedGraph;
use crate::partition::Partition;
use std::collections::BTreeMap;

/// Community structure of one contraction level.
#[derive(Debug, Clone)]
pub struct Network {
    graph: WeightedGraph,
    community_of: Vec<usize>,
    member_counts: Vec<usize>,
    in_weights: Vec<f64>,
    total_weights: Vec<f64>,
}

impl Network {
    /// One singleton community per node, community id = node id.
    pub fn new(graph: WeightedGraph) -> Self {
        let n = graph.node_count();
        let in_weights = (0..n).map(|i| graph.self_loop(i)).collect();
        let total_weights = (0..n).map(|i| graph.linked_weight(i)).collect();
        Self {
            graph,
            community_of: (0..n).collect(),
            member_counts: vec![1; n],
            in_weights,
            total_weights,
        }
    }

    /// Swap in a new graph and reset to singleton communities.
    pub fn set_graph(&mut self, graph: WeightedGraph) {
        *self = Self::new(graph);
    }

    /// Underlying graph.
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// `W` of the underlying graph.
    pub fn total_weight(&self) -> f64 {
        self.graph.total_weight()
    }

    /// Community of `node`.
    pub fn community(&self, node: usize) -> usize {
        self.community_of[node]
    }

    /// Non-empty communities, ascending.
    pub fn communities(&self) -> impl Iterator<Item = usize> + '_ {
        self.member_counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(c, _)| c)
    }

    /// Number of non-empty communities.
    pub fn n_communities(&self) -> usize {
        self.member_counts.iter().filter(|&&c| c > 0).count()
    }

    /// Nodes of community `comm`, ascending.
    pub fn members_of(&self, comm: usize) -> Vec<usize> {
        self.community_of
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == comm)
            .map(|(node, _)| node)
            .collect()
    }

    /// Internal weight of `comm`.
    pub fn in_weight(&self, comm: usize) -> f64 {
        self.in_weights[comm]
    }

    /// Summed degree of the members of `comm`.
    pub fn total_linked_weight(&self, comm: usize) -> f64 {
        self.total_weights[comm]
    }

    /// Weight between `node` and the members of `comm`, self-loop excluded.
    pub fn shared_weight(&self, node: usize, comm: usize) -> f64 {
        self.graph
            .neighbors(node)
            .iter()
            .filter(|&&(other, _)| self.community_of[other] == comm)
            .map(|&(_, w)| w)
            .sum()
    }

    /// Distinct communities adjacent to `node`, in neighbor order.
    pub fn neighbor_communities(&self, node: usize) -> Vec<usize> {
        let mut seen: Vec<usize> = Vec::new();
        for &(other, _) in self.graph.neighbors(node) {
            let c = self.community_of[other];
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen
    }

    /// Modularity lost by taking `node` out of its community, given the
    /// weight it shares with that community.
    pub fn modularity_loss(&self, node: usize, own_shared: f64) -> f64 {
        let w = self.total_weight();
        let k = self.graph.linked_weight(node);
        let tot = self.total_weights[self.community_of[node]];
        (-own_shared + (tot - k) * k / (2.0 * w)) / w
    }

    /// Modularity gained by inserting `node` into `comm`, given the weight it
    /// shares with that community. Zero for the node's own community.
    pub fn modularity_gain(&self, node: usize, comm: usize, shared: f64) -> f64 {
        if self.community_of[node] == comm {
            return 0.0;
        }
        let w = self.total_weight();
        let k = self.graph.linked_weight(node);
        (shared - self.total_weights[comm] * k / (2.0 * w)) / w
    }

    /// Move `node` into `target`, updating both aggregates.
    ///
    /// `old_shared` / `new_shared` are the weights `node` shares with its
    /// current community and with `target`.
    pub fn move_node(&mut self, node: usize, target: usize, old_shared: f64, new_shared: f64) {
        let from = self.community_of[node];
        if from == target {
            return;
        }
        let k = self.graph.linked_weight(node);
        let lp = self.graph.self_loop(node);

        self.member_counts[from] -= 1;
        self.total_weights[from] -= k;
        self.in_weights[from] -= 2.0 * old_shared + lp;

        self.community_of[node] = target;
        self.member_counts[target] += 1;
        self.total_weights[target] += k;
        self.in_weights[target] += 2.0 * new_shared + lp;
    }

    /// Global modularity. `None` when the graph carries no weight.
    pub fn modularity(&self) -> Option<f64> {
        let w = self.total_weight();
        if w <= 0.0 {
            return None;
        }
        let tw2 = 2.0 * w;
        Some(
            self.communities()
                .map(|c| {
                    let share = self.total_weights[c] / tw2;
                    self.in_weights[c] / tw2 - share * share
                })
                .sum(),
        )
    }

    /// Weight of the edges running between communities `a` and `b`, or the
    /// internal weight when `a == b`.
    pub fn inter_community_weight(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return self.in_weight(a);
        }
        self.graph
            .edges()
            .filter(|&(l, r, _)| {
                let (cl, cr) = (self.community_of[l], self.community_of[r]);
                (cl == a && cr == b) || (cl == b && cr == a)
            })
            .map(|(_, _, w)| w)
            .sum()
    }

    /// Current assignment as a partition of the nodes.
    pub fn to_partition(&self) -> Partition {
        Partition::from_labels(&self.community_of)
    }

    /// Collapse every community into one node.
    ///
    /// New node ids follow the order in which communities are first met when
    /// scanning nodes `0..n`. Each new node's self-loop is the community's
    /// internal weight. Returns the contracted graph and the old community →
    /// new node map.
    pub fn contract(&self) -> (WeightedGraph, Vec<Option<usize>>) {
        let n = self.node_count();
        let mut remap: Vec<Option<usize>> = vec![None; n];
        let mut old_of_new: Vec<usize> = Vec::new();
        for &c in &self.community_of {
            if remap[c].is_none() {
                remap[c] = Some(old_of_new.len());
                old_of_new.push(c);
            }
        }

        let mut links: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (l, r, w) in self.graph.edges() {
            let (Some(a), Some(b)) = (
                remap[self.community_of[l]],
                remap[self.community_of[r]],
            ) else {
                continue;
            };
            if a != b {
                *links.entry((a.min(b), a.max(b))).or_insert(0.0) += w;
            }
        }
        let self_loops: Vec<f64> = old_of_new.iter().map(|&c| self.in_weights[c]).collect();
        let m = old_of_new.len();
        let graph = WeightedGraph::assemble(
            m,
            links.into_iter().map(|((a, b), w)| (a, b, w)),
            self_loops,
        );
        (graph, remap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MatrixMeasure;

    fn linked() -> Network {
        let mut m = MatrixMeasure::from_rows(&[
            vec![0.0, 1.0, 2.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 3.0, 0.0],
            vec![2.0, 0.0, 0.0, 3.0, 4.0],
            vec![0.0, 3.0, 3.0, 0.0, 0.0],
            vec![0.0, 0.0, 4.0, 0.0, 0.0],
        ])
        .unwrap();
        Network::new(WeightedGraph::from_measure(&mut m, false))
    }

    #[test]
    fn test_singleton_start() {
        let net = linked();
        assert_eq!(net.n_communities(), 5);
        assert_eq!(net.total_linked_weight(2), 9.0);
        assert_eq!(net.in_weight(2), 0.0);
        let q = net.modularity().unwrap();
        // Σ -(k_i / 26)²
        let expected = -(9.0 + 16.0 + 81.0 + 36.0 + 16.0) / (26.0 * 26.0);
        assert!((q - expected).abs() < 1e-12);
    }

    #[test]
    fn test_move_node_updates_aggregates() {
        let mut net = linked();
        let old = net.shared_weight(4, 4);
        let new = net.shared_weight(4, 2);
        assert_eq!(new, 4.0);
        net.move_node(4, 2, old, new);
        assert_eq!(net.community(4), 2);
        assert_eq!(net.n_communities(), 4);
        assert_eq!(net.in_weight(2), 8.0);
        assert_eq!(net.total_linked_weight(2), 13.0);
        assert_eq!(net.members_of(2), vec![2, 4]);
        assert_eq!(net.inter_community_weight(2, 3), 3.0);
        assert_eq!(net.inter_community_weight(2, 0), 2.0);

        // and back again
        let back_old = net.shared_weight(4, 2);
        net.move_node(4, 4, back_old, 0.0);
        assert_eq!(net.in_weight(2), 0.0);
        assert_eq!(net.total_linked_weight(2), 9.0);
    }

    #[test]
    fn test_gain_minus_loss_is_modularity_delta() {
        let mut net = linked();
        let before = net.modularity().unwrap();
        let own = net.shared_weight(4, 4);
        let shared = net.shared_weight(4, 2);
        let delta = net.modularity_gain(4, 2, shared) + net.modularity_loss(4, own);
        net.move_node(4, 2, own, shared);
        let after = net.modularity().unwrap();
        assert!((after - before - delta).abs() < 1e-12);
    }

    #[test]
    fn test_zero_graph_has_no_modularity() {
        let net = Network::new(WeightedGraph::from_measure(&mut MatrixMeasure::zeros(5), false));
        assert_eq!(net.modularity(), None);
        assert!(net.neighbor_communities(0).is_empty());
    }

    #[test]
    fn test_contract_preserves_modularity() {
        let mut net = linked();
        for (node, target) in [(4, 2), (1, 0), (3, 0)] {
            let old = net.shared_weight(node, net.community(node));
            let new = net.shared_weight(node, target);
            net.move_node(node, target, old, new);
        }
        let q = net.modularity().unwrap();
        let (graph, remap) = net.contract();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(remap[0], Some(0));
        assert_eq!(remap[2], Some(1));
        assert_eq!(graph.total_weight(), 13.0);
        let contracted = Network::new(graph);
        assert!((contracted.modularity().unwrap() - q).abs() < 1e-12);
    }
}
