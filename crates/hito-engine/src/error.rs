//! Error types for hito-engine.

use hito_core::errors::CoreError;
use thiserror::Error;

/// Errors reported by a record store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// The store could not be reached or did not answer.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the command.
    #[error("Store rejected command: {0}")]
    Rejected(String),
}

/// Errors from engine operations.
///
/// Only validation and resolution failures surface here; per-item failures
/// inside a batch are collected in [`crate::outcome::BatchOutcome`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input rejected before any side effect.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store call failed outside of a batch.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error raised by core types.
    #[error(transparent)]
    Core(#[from] CoreError),
}
