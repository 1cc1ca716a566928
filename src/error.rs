// src/error.rs

use thiserror::Error;

/// Errors surfaced by the vehicle model.
///
/// Every failure is reported to the caller; nothing is silently recovered,
/// broadcast, or truncated.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A vector or matrix had the wrong dimensions for the requested operation.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    Shape {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The exact discretization produced a non-finite result.
    #[error("numerical instability in {0}: matrix exponential produced non-finite entries")]
    NumericalInstability(&'static str),

    /// The model was constructed with an invalid parameter.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ModelError {
    pub(crate) fn shape(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::Shape {
            context,
            expected,
            actual,
        }
    }
}
