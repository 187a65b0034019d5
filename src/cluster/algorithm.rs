//! Algorithm selection from a name and a flat parameter table.

use super::cast::Cast;
use super::dbscan::Dbscan;
use super::traits::ClusterAlgorithm;
use crate::community::Louvain;
use crate::error::{Error, Result};
use crate::measure::{Dissimilarity, PairwiseMeasure};
use crate::partition::Partition;
use core::str::FromStr;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Algorithm name plus string-keyed parameters, as handed over by the caller.
///
/// ```rust
/// use lvclust::cluster::AlgorithmConfig;
///
/// let cfg = AlgorithmConfig::new("dbscan")
///     .with_parameter("minPts", "2")
///     .with_parameter("eps", "0.45");
/// assert_eq!(cfg.parameter("eps"), Some("0.45"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlgorithmConfig {
    /// `CAST`, `DBSCAN` or `LOUVAIN`, any case.
    pub name: String,
    /// Raw parameter values by key.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: BTreeMap<String, String>,
}

impl AlgorithmConfig {
    /// Configuration with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Set one parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Raw value of `key`.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// First present key among `keys`, parsed as `T`.
    fn parse<T>(&self, keys: &[&'static str]) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: core::fmt::Display,
    {
        let Some((key, raw)) = keys
            .iter()
            .find_map(|&k| self.parameter(k).map(|v| (k, v)))
        else {
            return Ok(None);
        };
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::InvalidParameter {
                name: key,
                message: format!("cannot parse '{raw}': {e}"),
            })
    }

    fn require<T>(&self, algorithm: &'static str, keys: &[&'static str]) -> Result<T>
    where
        T: FromStr,
        T::Err: core::fmt::Display,
    {
        self.parse(keys)?.ok_or(Error::MissingParameter {
            algorithm,
            name: keys[0],
        })
    }
}

/// The closed set of clustering algorithms, bound to one similarity provider.
///
/// DBSCAN sees the provider through a [`Dissimilarity`] adapter; CAST and
/// Louvain read it directly.
pub enum Algorithm<S> {
    /// Affinity-threshold clustering.
    Cast(Cast<S>),
    /// Density-based clustering.
    Dbscan(Dbscan<Dissimilarity<S>>),
    /// Modularity optimization.
    Louvain(Louvain<S>),
}

impl<S: PairwiseMeasure> Algorithm<S> {
    /// Build the algorithm named in `config` over `similarity`.
    ///
    /// Unknown names and missing or malformed parameters are errors.
    pub fn from_config(config: &AlgorithmConfig, similarity: S) -> Result<Self> {
        let algorithm = match config.name.trim().to_ascii_uppercase().as_str() {
            "CAST" => {
                let threshold: f64 = config.require("CAST", &["t", "threshold"])?;
                Algorithm::Cast(Cast::new(similarity, threshold)?)
            }
            "DBSCAN" => {
                let min_points: usize = config.require("DBSCAN", &["minPts", "min_points"])?;
                let epsilon: f64 = config.require("DBSCAN", &["eps", "epsilon"])?;
                Algorithm::Dbscan(Dbscan::new(
                    Dissimilarity::new(similarity),
                    min_points,
                    epsilon,
                )?)
            }
            "LOUVAIN" => {
                let mut louvain = Louvain::new(similarity);
                if let Some(seed) = config.parse::<u64>(&["seed"])? {
                    louvain = louvain.with_seed(seed);
                }
                Algorithm::Louvain(louvain)
            }
            _ => return Err(Error::UnknownAlgorithm(config.name.clone())),
        };
        log::debug!("configured {}", algorithm.name());
        Ok(algorithm)
    }
}

impl<S: PairwiseMeasure> ClusterAlgorithm for Algorithm<S> {
    type Measure = S;

    fn run(&mut self) -> Partition {
        match self {
            Algorithm::Cast(a) => a.run(),
            Algorithm::Dbscan(a) => a.run(),
            Algorithm::Louvain(a) => a.run(),
        }
    }

    fn name(&self) -> String {
        match self {
            Algorithm::Cast(a) => a.name(),
            Algorithm::Dbscan(a) => a.name(),
            Algorithm::Louvain(a) => a.name(),
        }
    }

    fn invalidate(&mut self) {
        match self {
            Algorithm::Cast(a) => a.invalidate(),
            Algorithm::Dbscan(a) => a.invalidate(),
            Algorithm::Louvain(a) => a.invalidate(),
        }
    }

    fn set_measure(&mut self, measure: S) -> S {
        match self {
            Algorithm::Cast(a) => a.set_measure(measure),
            Algorithm::Dbscan(a) => a.set_measure(Dissimilarity::new(measure)).into_inner(),
            Algorithm::Louvain(a) => a.set_measure(measure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MatrixMeasure;

    fn two_pairs() -> MatrixMeasure {
        MatrixMeasure::from_rows(&[
            vec![1.0, 0.9, 0.0, 0.0],
            vec![0.9, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.9],
            vec![0.0, 0.0, 0.9, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_cast_from_config() {
        let cfg = AlgorithmConfig::new("cast").with_parameter("t", "0.6");
        let mut algo = Algorithm::from_config(&cfg, two_pairs()).unwrap();
        assert_eq!(algo.name(), "CAST_0.600");
        assert_eq!(algo.run().to_label_vec().unwrap(), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_dbscan_from_config_with_aliases() {
        let cfg = AlgorithmConfig::new("DBSCAN")
            .with_parameter("min_points", "2")
            .with_parameter("epsilon", "0.45");
        let mut algo = Algorithm::from_config(&cfg, two_pairs()).unwrap();
        assert_eq!(algo.name(), "DBSCAN_2_0.450");
        assert_eq!(algo.run().n_clusters(), 2);
    }

    #[test]
    fn test_louvain_from_config() {
        let cfg = AlgorithmConfig::new("Louvain").with_parameter("seed", "7");
        let mut algo = Algorithm::from_config(&cfg, two_pairs()).unwrap();
        assert_eq!(algo.name(), "LOUVAIN");
        assert_eq!(algo.run().n_clusters(), 2);
    }

    #[test]
    fn test_unknown_algorithm_fails() {
        let cfg = AlgorithmConfig::new("kmeans");
        let err = Algorithm::from_config(&cfg, two_pairs()).err();
        assert_eq!(err, Some(Error::UnknownAlgorithm("kmeans".to_string())));
    }

    #[test]
    fn test_missing_parameter_fails() {
        let cfg = AlgorithmConfig::new("DBSCAN").with_parameter("eps", "0.3");
        let err = Algorithm::from_config(&cfg, two_pairs()).err();
        assert_eq!(
            err,
            Some(Error::MissingParameter {
                algorithm: "DBSCAN",
                name: "minPts"
            })
        );
    }

    #[test]
    fn test_malformed_parameter_fails() {
        let cfg = AlgorithmConfig::new("CAST").with_parameter("threshold", "high");
        assert!(matches!(
            Algorithm::from_config(&cfg, two_pairs()),
            Err(Error::InvalidParameter { name: "threshold", .. })
        ));
        let cfg = AlgorithmConfig::new("DBSCAN")
            .with_parameter("minPts", "0")
            .with_parameter("eps", "0.3");
        assert!(Algorithm::from_config(&cfg, two_pairs()).is_err());
    }

    #[test]
    fn test_set_measure_through_dissimilarity() {
        let cfg = AlgorithmConfig::new("DBSCAN")
            .with_parameter("minPts", "1")
            .with_parameter("eps", "0.2");
        let mut algo = Algorithm::from_config(&cfg, two_pairs()).unwrap();
        let old = algo.set_measure(MatrixMeasure::zeros(3));
        assert_eq!(old.len(), 4);
        // zero similarity everywhere: every item alone
        assert_eq!(algo.run().n_clusters(), 3);
        algo.invalidate();
    }
}
