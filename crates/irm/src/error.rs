//! Error types for the rate model.

use alloy_primitives::I256;
use thiserror::Error;

/// Errors that can occur while computing borrow rates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrmError {
    /// An intermediate value left the representable range
    #[error("Arithmetic overflow")]
    Overflow,

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Elapsed time was requested with a timestamp before the last update
    #[error("Invalid timestamp: {now} is before last update {last_update}")]
    InvalidTimestamp { now: u64, last_update: u64 },

    /// Curve parameters were rejected at construction
    #[error("Invalid curve parameters: {reason}")]
    InvalidCurveParams { reason: String },

    /// A textual WAD value could not be parsed
    #[error("Invalid number: {input}")]
    InvalidNumber { input: String },

    /// A stored rate at target is neither zero nor within its bounds
    #[error("Rate at target {rate} is outside its bounds")]
    RateAtTargetOutOfBounds { rate: I256 },
}

/// Result type alias for rate model operations.
pub type Result<T> = std::result::Result<T, IrmError>;
