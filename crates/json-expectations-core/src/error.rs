//! Error types for callers that need a single `std::error::Error`.
//!
//! Validation itself never errors: it returns [`Violations`]. This type
//! exists for the surrounding plumbing: reading input, writing output and
//! `?` in binaries.

use thiserror::Error;

use crate::violation::Violations;

#[derive(Debug, Error)]
pub enum ExpectationError {
    #[error("JSON writing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document violated {count} expectation(s):\n{0}", count = .0.len())]
    Violated(#[from] Violations),
}
