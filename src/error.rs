use core::fmt;

/// Result alias for `lvclust`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by measure providers, clustering algorithms and metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Two inputs that must agree in length do not.
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// An index refers outside the backing collection.
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Length of the collection.
        len: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// A required parameter was absent from an algorithm configuration.
    MissingParameter {
        /// Algorithm being configured.
        algorithm: &'static str,
        /// Parameter name.
        name: &'static str,
    },

    /// Algorithm name not recognised.
    UnknownAlgorithm(String),

    /// No label has been assigned to this item.
    UnknownLabel {
        /// Item index.
        index: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::MissingParameter { algorithm, name } => {
                write!(f, "{algorithm}: missing required parameter '{name}'")
            }
            Error::UnknownAlgorithm(name) => write!(f, "unknown clustering algorithm '{name}'"),
            Error::UnknownLabel { index } => write!(f, "item {index} has no label"),
        }
    }
}

impl std::error::Error for Error {}
