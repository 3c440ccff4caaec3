use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("no categories detected")]
    NoCategories,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Ensemble for category {0} has no members")]
    EmptyEnsemble(String),

    #[error("Invalid threshold {threshold} for category {category}: must be within [0, 1]")]
    InvalidThreshold { category: String, threshold: f64 },

    #[error("Invalid matrix dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Row count mismatch: feature table has {features} rows, scoring matrix has {matrix}")]
    RowCountMismatch { features: usize, matrix: usize },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether the error is the caller's fault rather than a broken deployment
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::NoCategories)
    }
}
