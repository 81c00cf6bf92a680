//! Errors raised by the validating entry points of the calculator.
//!
//! The plain `compute` path never fails; these only come out of the `try_*`
//! variants.

use thiserror::Error;

/// Validation failures for thresholds and revenue figures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// Threshold is negative or not finite.
    #[error("Invalid threshold: {threshold} (must be finite and non-negative)")]
    InvalidThreshold { threshold: f64 },

    /// Revenue is NaN or infinite.
    #[error("Revenue must be finite, got {revenue}")]
    NonFiniteRevenue { revenue: f64 },

    /// Revenue is below zero.
    #[error("Revenue must not be negative, got {revenue}")]
    NegativeRevenue { revenue: f64 },
}

impl AllocationError {
    /// Stable code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            AllocationError::InvalidThreshold { .. } => "INVALID_THRESHOLD",
            AllocationError::NonFiniteRevenue { .. } => "NON_FINITE_REVENUE",
            AllocationError::NegativeRevenue { .. } => "NEGATIVE_REVENUE",
        }
    }
}

/// Result alias for the validating calculator entry points.
pub type CalculatorResult<T> = Result<T, AllocationError>;
