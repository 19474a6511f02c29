// Domain errors for classification, aggregation and chart shaping
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// An operation that needs at least one row received none
    #[error("dataset is empty")]
    EmptyDataset,

    /// A threshold or target configuration is structurally invalid
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rows handed over by a data provider break the dataset invariants
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A metric selector names a metric the row does not carry
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

impl DashboardError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_dataset(msg: impl Into<String>) -> Self {
        Self::InvalidDataset(msg.into())
    }
}
