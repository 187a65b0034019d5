//! Pairwise similarity and dissimilarity providers.
//!
//! Every clustering algorithm in this crate sees its input only through a
//! [`PairwiseMeasure`]: an item count and a symmetric score `compute(i, j)`.
//! The concrete provider used by the latent-variable builder is
//! [`MutualInfoSimilarity`], the normalized mutual information between two
//! variables, optionally gated by a [`LocalityCriterion`] so that distant
//! markers are never measured.
//!
//! | Provider | Score | Use |
//! |----------|-------|-----|
//! | [`MutualInfoSimilarity`] | `I(a;b) / min(H(a), H(b))` | CAST, Louvain |
//! | [`Dissimilarity`] | `1 - sim` | DBSCAN |
//! | [`MatrixMeasure`] | explicit weights | tests, precomputed graphs |
//! | [`FnMeasure`] | closure | ad-hoc |
//!
//! ```rust
//! use lvclust::measure::{EmpiricalSource, MutualInfoSimilarity, PairwiseMeasure};
//!
//! let data = EmpiricalSource::from_rows(&[
//!     vec![0, 1, 2, 0, 1, 2],
//!     vec![0, 1, 2, 0, 1, 2],
//!     vec![0, 0, 0, 1, 1, 1],
//! ]).unwrap();
//! let mut sim = MutualInfoSimilarity::over_all(&data);
//! assert!((sim.compute(0, 1) - 1.0).abs() < 1e-12);
//! assert!(sim.compute(0, 2) < 1e-12);
//! ```

mod criteria;
mod dissimilarity;
mod matrix;
mod similarity;
mod source;
mod traits;

pub use criteria::{AcceptAll, FnCriterion, LevelledPositionCriterion, PositionCriterion};
pub use dissimilarity::{Dissimilarity, MAX_DISSIMILARITY};
pub use matrix::{FnMeasure, MatrixMeasure};
pub use similarity::{index_of_pair, MutualInfoSimilarity, MAX_SIMILARITY, MIN_SIMILARITY};
pub use source::{EmpiricalSource, VariableSource};
pub use traits::{LocalityCriterion, PairwiseMeasure};
