//! Error types for history store operations

use thiserror::Error;

use crate::bounds::BoundsError;

/// Errors during history insertion and lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error("checkpoint time {time} precedes the latest recorded time {last}")]
    NonMonotonicInsertion { time: u64, last: u64 },
}
