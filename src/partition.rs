//! Partitions: the item → label mapping every clustering algorithm returns.
//!
//! A [`Partition`] is the bidirectional bookkeeping between item indices and
//! cluster labels. A [`Clustering`] is the same information laid out as a list
//! of clusters. The two convert into each other losslessly up to label
//! numbering, which is never canonical: compare partitions by grouping
//! ([`Partition::same_grouping`]), not by label value.
//!
//! ```rust
//! use lvclust::Partition;
//!
//! let p = Partition::from_labels(&[0, 0, 1, 1, 2]);
//! let clusters = p.to_clustering();
//! assert_eq!(clusters, vec![vec![0, 1], vec![2, 3], vec![4]]);
//!
//! let back = Partition::from_clustering(&clusters);
//! assert!(back.same_grouping(&p));
//! ```

use crate::error::{Error, Result};
use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Item index within the current working set.
pub type Index = usize;

/// Cluster identifier. Small, non-negative, not necessarily contiguous.
pub type Label = usize;

/// Item indices sharing one label.
pub type Cluster = Vec<Index>;

/// A sequence of clusters.
pub type Clustering = Vec<Cluster>;

/// Mapping from item index to cluster label.
///
/// Invariants:
/// - an assigned item keeps its label until reassigned;
/// - a label with no remaining member leaves the active label set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    index_to_label: BTreeMap<Index, Label>,
    member_counts: BTreeMap<Label, usize>,
}

impl Partition {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a partition where cluster `k` of `clustering` receives label `k`.
    ///
    /// Empty clusters contribute no label. An index listed twice keeps the
    /// label of its last occurrence.
    pub fn from_clustering(clustering: &[Cluster]) -> Self {
        let mut partition = Self::new();
        for (label, cluster) in clustering.iter().enumerate() {
            for &item in cluster {
                partition.set_label(item, label);
            }
        }
        partition
    }

    /// Build a partition from a label vector: item `i` gets `labels[i]`.
    pub fn from_labels(labels: &[Label]) -> Self {
        let mut partition = Self::new();
        for (item, &label) in labels.iter().enumerate() {
            partition.set_label(item, label);
        }
        partition
    }

    /// Number of active labels.
    pub fn n_clusters(&self) -> usize {
        self.member_counts.len()
    }

    /// Number of assigned items.
    pub fn n_items(&self) -> usize {
        self.index_to_label.len()
    }

    /// True when no item is assigned.
    pub fn is_empty(&self) -> bool {
        self.index_to_label.is_empty()
    }

    /// Label of `item`, if assigned.
    pub fn label(&self, item: Index) -> Option<Label> {
        self.index_to_label.get(&item).copied()
    }

    /// Assign `item` to `label`, moving it out of its previous cluster.
    pub fn set_label(&mut self, item: Index, label: Label) -> &mut Self {
        match self.index_to_label.insert(item, label) {
            Some(previous) if previous == label => return self,
            Some(previous) => self.decrement(previous),
            None => {}
        }
        *self.member_counts.entry(label).or_insert(0) += 1;
        self
    }

    /// Drop `label` from the active set and unassign its members.
    ///
    /// Returns the items that carried the label, in ascending order.
    pub fn remove_label(&mut self, label: Label) -> Vec<Index> {
        if self.member_counts.remove(&label).is_none() {
            return Vec::new();
        }
        let members = self.members(label);
        for item in &members {
            self.index_to_label.remove(item);
        }
        members
    }

    /// Active labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.member_counts.keys().copied()
    }

    /// Number of items carrying `label`.
    pub fn cluster_size(&self, label: Label) -> usize {
        self.member_counts.get(&label).copied().unwrap_or(0)
    }

    /// Items carrying `label`, ascending.
    pub fn members(&self, label: Label) -> Vec<Index> {
        self.index_to_label
            .iter()
            .filter(|&(_, &l)| l == label)
            .map(|(&i, _)| i)
            .collect()
    }

    /// `(item, label)` pairs in ascending item order.
    pub fn iter(&self) -> impl Iterator<Item = (Index, Label)> + '_ {
        self.index_to_label.iter().map(|(&i, &l)| (i, l))
    }

    /// Group items by label. Clusters come out in label order, items ascending.
    pub fn to_clustering(&self) -> Clustering {
        let mut groups: BTreeMap<Label, Cluster> = BTreeMap::new();
        for (&item, &label) in &self.index_to_label {
            groups.entry(label).or_default().push(item);
        }
        groups.into_values().collect()
    }

    /// Dense label vector for a partition covering exactly `0..n_items()`.
    pub fn to_label_vec(&self) -> Result<Vec<Label>> {
        (0..self.n_items())
            .map(|i| self.label(i).ok_or(Error::UnknownLabel { index: i }))
            .collect()
    }

    /// Copy of this partition with labels renumbered `0..n_clusters()` in
    /// ascending order of the original labels.
    pub fn compacted(&self) -> Self {
        let remap: BTreeMap<Label, Label> = self
            .member_counts
            .keys()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();
        let mut out = Self::new();
        for (&item, label) in &self.index_to_label {
            out.set_label(item, remap[label]);
        }
        out
    }

    /// True when both partitions cover the same items with the same grouping,
    /// whatever the label values.
    pub fn same_grouping(&self, other: &Partition) -> bool {
        if self.n_items() != other.n_items() || self.n_clusters() != other.n_clusters() {
            return false;
        }
        let mut forward: BTreeMap<Label, Label> = BTreeMap::new();
        for (item, label) in self.iter() {
            let Some(theirs) = other.label(item) else {
                return false;
            };
            match forward.get(&label) {
                Some(&mapped) if mapped != theirs => return false,
                Some(_) => {}
                None => {
                    forward.insert(label, theirs);
                }
            }
        }
        // Injective forward map with equal cluster counts means a bijection.
        let mut targets: Vec<Label> = forward.values().copied().collect();
        targets.sort_unstable();
        targets.dedup();
        targets.len() == forward.len()
    }

    fn decrement(&mut self, label: Label) {
        if let Some(count) = self.member_counts.get_mut(&label) {
            *count -= 1;
            if *count == 0 {
                self.member_counts.remove(&label);
            }
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} clusters", self.n_clusters())?;
        for (label, cluster) in self.labels().zip(self.to_clustering()) {
            let items: Vec<String> = cluster.iter().map(|i| i.to_string()).collect();
            writeln!(f, "cluster {label}: {}", items.join(", "))?;
        }
        Ok(())
    }
}
