//! Error type surfaced by the public operations.
//!
//! Repair failures never show up here: the layout generator resolves them to
//! an empty result (see `planar::RepairError`).

/// Errors returned by the geometry core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// Malformed geometry or non-positive parameters. Caller's responsibility.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The grid scan would evaluate more candidates than allowed.
    #[error("grid scan needs {candidates} candidate evaluations (limit {limit})")]
    IterationLimitExceeded { candidates: u64, limit: u64 },
}

impl GeoError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GeoError::InvalidInput(reason.into())
    }
}
