//! Error types for site scheduling.
//!
//! Validation failures are raised before the annealing loop starts, so a
//! solve either fails up front or runs to completion (or cancellation).

use thiserror::Error;

/// Rejected input: sizes, cost values, grid invariants, or configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Cost matrix dimension differs from the number of sites.
    #[error("cost matrix is {actual}x{actual} but {expected} sites were given")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Node cost vector length differs from the number of sites.
    #[error("node cost vector has {actual} entries but {expected} sites were given")]
    NodeCostLength { expected: usize, actual: usize },

    /// More sites than the schedule grid can hold.
    #[error(
        "insufficient capacity: {n_days} days x {max_stops_per_day} stops = {capacity} slots, \
         but {required} sites must be scheduled"
    )]
    InsufficientCapacity {
        n_days: usize,
        max_stops_per_day: usize,
        capacity: usize,
        required: usize,
    },

    /// A matrix row whose length differs from the row count.
    #[error("cost matrix is not square: {rows} rows but row {row} has {len} entries")]
    NonSquare { rows: usize, row: usize, len: usize },

    #[error("cost matrix is empty")]
    EmptyMatrix,

    /// Negative or non-finite edge cost.
    #[error("invalid edge cost {value} at ({row}, {col})")]
    InvalidCost { row: usize, col: usize, value: f64 },

    /// Negative or non-finite node cost.
    #[error("invalid node cost {value} at site {index}")]
    InvalidNodeCost { index: usize, value: f64 },

    /// Some sites carry a node cost and others do not.
    #[error("node costs must be given for every site or for none")]
    MixedNodeCosts,

    /// A schedule grid that breaks its structural invariants.
    #[error("invalid schedule state: {0}")]
    InvalidState(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by a [`CostMatrixProvider`](crate::provider::CostMatrixProvider).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// An edge record refers to a site outside `0..n_sites`.
    #[error("edge ({site_1}, {site_2}) refers to a site outside 0..{n_sites}")]
    InvalidEdge {
        site_1: usize,
        site_2: usize,
        n_sites: usize,
    },

    /// Provider-specific failure (network, cache, parsing).
    #[error("{0}")]
    Other(String),
}

/// Main error type for scheduling operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Cost data could not be obtained; passed through from the provider.
    #[error("external data error: {0}")]
    ExternalData(#[from] ProviderError),
}

impl ScheduleError {
    /// Returns `true` if the input was rejected before solving.
    pub fn is_validation(&self) -> bool {
        matches!(self, ScheduleError::Validation(_))
    }
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
