//! Cross-cutting error types for Hitos.
//!
//! Errors that can originate from any crate in the system. Store and engine
//! failures are defined in `hito-engine`; the CLI folds everything into
//! `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Hitos crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints, unknown codes).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
