//! End-to-end clustering over synthetic discrete data.
//!
//! Items of one group share an identical observation column (similarity 1).
//! Columns of different groups are pairwise independent (similarity 0):
//!
//! ```text
//! a = 0 0 0 1 1 1 2 2 2
//! b = 0 1 2 0 1 2 0 1 2
//! c = 0 1 2 1 2 0 2 0 1   (a + b mod 3)
//! ```

use lvclust::cluster::{Algorithm, AlgorithmConfig, Cast, ClusterAlgorithm, Dbscan};
use lvclust::community::Louvain;
use lvclust::measure::{
    Dissimilarity, EmpiricalSource, MutualInfoSimilarity, PairwiseMeasure, PositionCriterion,
};
use lvclust::metrics::{adjusted_mutual_information, score_against_reference};
use lvclust::{Error, Partition};
use std::sync::Arc;

const COLUMNS: [[u8; 9]; 3] = [
    [0, 0, 0, 1, 1, 1, 2, 2, 2],
    [0, 1, 2, 0, 1, 2, 0, 1, 2],
    [0, 1, 2, 1, 2, 0, 2, 0, 1],
];

fn grouped(n_groups: usize, group_size: usize) -> EmpiricalSource {
    let rows: Vec<Vec<u8>> = (0..n_groups * group_size)
        .map(|i| COLUMNS[i / group_size].to_vec())
        .collect();
    EmpiricalSource::from_rows(&rows).unwrap()
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn cast_recovers_three_groups_of_five() {
    init_logging();
    let data = grouped(3, 5);
    let positions: Vec<i64> = (0..15).collect();
    let sim = MutualInfoSimilarity::over_all(&data)
        .with_criterion(Arc::new(PositionCriterion::new(positions, 5)))
        .with_pair_cache();

    let mut cast = Cast::new(sim, 0.5).unwrap();
    let partition = cast.run();

    let expected: Vec<usize> = (0..15).map(|i| i / 5).collect();
    assert!(partition.same_grouping(&Partition::from_labels(&expected)));
    assert_eq!(
        partition.to_clustering(),
        vec![
            vec![0, 1, 2, 3, 4],
            vec![5, 6, 7, 8, 9],
            vec![10, 11, 12, 13, 14]
        ]
    );
    assert_eq!(cast.name(), "CAST_0.500");
}

#[test]
fn cast_respects_locality() {
    // one group of identical variables, but spread out along the genome
    let rows: Vec<Vec<u8>> = (0..4).map(|_| COLUMNS[0].to_vec()).collect();
    let data = EmpiricalSource::from_rows(&rows).unwrap();
    let criterion = Arc::new(PositionCriterion::new(vec![0, 1, 100, 101], 5));
    let sim = MutualInfoSimilarity::over_all(&data).with_criterion(criterion);

    let partition = Cast::new(sim, 0.5).unwrap().run();
    assert_eq!(partition.to_clustering(), vec![vec![0, 1], vec![2, 3]]);
}

#[test]
fn dbscan_on_prefix_then_on_subset() {
    init_logging();
    let data = grouped(3, 3);

    let prefix = MutualInfoSimilarity::new(&data, (0..6).collect()).unwrap();
    let mut dbscan = Dbscan::new(Dissimilarity::new(prefix), 2, 0.45).unwrap();
    assert_eq!(dbscan.name(), "DBSCAN_2_0.450");
    let partition = dbscan.run();
    assert_eq!(partition.to_label_vec().unwrap(), vec![0, 0, 0, 1, 1, 1]);

    let subset = MutualInfoSimilarity::new(&data, vec![0, 1, 3, 4, 5, 7]).unwrap();
    let mut dbscan = Dbscan::new(Dissimilarity::new(subset), 1, 0.45).unwrap();
    let partition = dbscan.run();
    assert_eq!(partition.to_label_vec().unwrap(), vec![0, 0, 1, 1, 1, 2]);
}

#[test]
fn configured_algorithm_rebinds_to_shrunk_population() {
    let data = grouped(3, 3);
    let cfg = AlgorithmConfig::new("DBSCAN")
        .with_parameter("minPts", "2")
        .with_parameter("eps", "0.45");

    let prefix = MutualInfoSimilarity::new(&data, (0..6).collect()).unwrap();
    let mut algo = Algorithm::from_config(&cfg, prefix).unwrap();
    assert_eq!(algo.run().n_clusters(), 2);

    // the outer loop collapsed some variables: rebuild the provider and rebind
    let subset = MutualInfoSimilarity::new(&data, vec![0, 1, 3, 4, 5, 7]).unwrap();
    let old = algo.set_measure(subset);
    assert_eq!(old.len(), 6);
    algo.invalidate();

    let partition = algo.run();
    assert_eq!(partition.n_items(), 6);
    // min_points 2 leaves global 7 alone
    assert_eq!(partition.to_label_vec().unwrap(), vec![0, 0, 1, 1, 1, 2]);
}

#[test]
fn louvain_on_mutual_information_graph() {
    let data = grouped(3, 3);
    let sim = MutualInfoSimilarity::over_all(&data);
    let mut louvain = Louvain::new(sim);
    let partition = louvain.run();
    assert_eq!(partition.n_clusters(), 3);
    assert_eq!(partition.to_label_vec().unwrap(), vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
    assert!(louvain.levels().iter().all(|&q| q > 0.6));
}

#[test]
fn all_algorithms_agree_with_reference() {
    let data = grouped(3, 4);
    let reference = Partition::from_labels(&(0..12).map(|i| i / 4).collect::<Vec<_>>());
    let configs = [
        AlgorithmConfig::new("CAST").with_parameter("t", "0.5"),
        AlgorithmConfig::new("DBSCAN")
            .with_parameter("minPts", "2")
            .with_parameter("eps", "0.45"),
        AlgorithmConfig::new("LOUVAIN"),
    ];

    let mut results = Vec::new();
    for cfg in &configs {
        let sim = MutualInfoSimilarity::over_all(&data).with_pair_cache();
        let mut algo = Algorithm::from_config(cfg, sim).unwrap();
        results.push(algo.run());
    }

    let scores = score_against_reference(&results, &reference).unwrap();
    for score in scores {
        assert!((score - 1.0).abs() < 1e-9);
    }
    let cast_vs_dbscan = adjusted_mutual_information(&results[0], &results[1]).unwrap();
    assert!((cast_vs_dbscan - 1.0).abs() < 1e-9);
}

#[test]
fn precomputed_cache_gives_identical_partitions() {
    let data = grouped(3, 5);
    let lazy = MutualInfoSimilarity::over_all(&data);
    let mut eager = MutualInfoSimilarity::over_all(&data);
    eager.precompute_all();
    assert_eq!(eager.cached_pairs(), 105);

    let a = Cast::new(lazy, 0.5).unwrap().run();
    let b = Cast::new(eager, 0.5).unwrap().run();
    assert_eq!(a, b);
}

#[test]
fn invalid_configurations_fail_loudly() {
    let data = grouped(1, 2);
    let sim = || MutualInfoSimilarity::over_all(&data);

    let unknown = Algorithm::from_config(&AlgorithmConfig::new("NULL"), sim());
    assert!(matches!(unknown, Err(Error::UnknownAlgorithm(name)) if name == "NULL"));

    let missing = Algorithm::from_config(&AlgorithmConfig::new("CAST"), sim());
    assert!(matches!(
        missing,
        Err(Error::MissingParameter {
            algorithm: "CAST",
            name: "t"
        })
    ));

    let negative = AlgorithmConfig::new("DBSCAN")
        .with_parameter("minPts", "2")
        .with_parameter("eps", "-0.1");
    assert!(Algorithm::from_config(&negative, sim()).is_err());
}
