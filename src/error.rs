//! Error taxonomy for the run engine.
//!
//! All errors are local, synchronous, and non-retryable. Every public
//! operation validates inputs and ownership before mutating any state, so a
//! returned error never leaves partially-applied changes behind.

use thiserror::Error;

use crate::run::types::RunStatus;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input (bad node id, wrong lineup size, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced run, lineup, or node does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The entity exists but does not belong to the caller.
    #[error("{0} does not belong to caller")]
    Forbidden(&'static str),

    /// The operation is illegal for the run's current status.
    #[error("operation requires an active run (status is {0:?})")]
    InvalidState(RunStatus),
}

pub type EngineResult<T> = Result<T, EngineError>;
