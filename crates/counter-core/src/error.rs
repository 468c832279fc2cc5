//! Error types for counter operations.

use thiserror::Error;

/// Result type alias for counter operations.
pub type CounterResult<T> = Result<T, CounterError>;

/// Errors reported by [`Counter`](crate::Counter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    /// Adding `delta` to `value` leaves the i64 range and the counter
    /// is configured with [`OverflowPolicy::Reject`](crate::OverflowPolicy::Reject).
    #[error("increment overflow: {value} + {delta} does not fit in i64")]
    Overflow {
        /// Value before the rejected increment.
        value: i64,
        /// Rejected delta.
        delta: i64,
    },
}

impl CounterError {
    /// Creates an overflow error.
    pub fn overflow(value: i64, delta: i64) -> Self {
        Self::Overflow { value, delta }
    }
}
