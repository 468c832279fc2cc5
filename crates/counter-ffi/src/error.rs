//! Error type for the C ABI layer.
//!
//! Every failure inside an exported function is first expressed as an
//! [`FfiError`], then collapsed to a [`CounterStatus`] at the boundary.
//! The `Display` text is what ends up in the last-error slot.

use counter_core::CounterError;
use thiserror::Error;

use crate::status::CounterStatus;

/// Error type for FFI operations.
#[derive(Debug, Clone, Error)]
pub enum FfiError {
    #[error("{name} is NULL")]
    NullArgument { name: &'static str },

    #[error("{name} must be valid UTF-8")]
    InvalidUtf8 { name: &'static str },

    #[error("buffer too small: {needed} bytes needed, {provided} provided")]
    BufferTooSmall { needed: usize, provided: usize },

    #[error("unknown overflow policy {raw}")]
    InvalidPolicy { raw: u32 },

    #[error(transparent)]
    Counter(#[from] CounterError),

    #[error("re-entrant call on counter handle")]
    Reentrant,

    #[error("internal panic: {message}")]
    Panic { message: String },
}

/// Result type for FFI operations.
pub type FfiResult<T> = Result<T, FfiError>;

impl FfiError {
    pub fn null_argument(name: &'static str) -> Self {
        Self::NullArgument { name }
    }

    pub fn invalid_utf8(name: &'static str) -> Self {
        Self::InvalidUtf8 { name }
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self::Panic {
            message: message.into(),
        }
    }

    /// Status code reported to the caller for this error.
    pub fn status(&self) -> CounterStatus {
        match self {
            FfiError::NullArgument { .. } => CounterStatus::NullArg,
            FfiError::InvalidUtf8 { .. }
            | FfiError::BufferTooSmall { .. }
            | FfiError::InvalidPolicy { .. }
            | FfiError::Counter(CounterError::Overflow { .. }) => CounterStatus::InvalidArg,
            FfiError::Reentrant | FfiError::Panic { .. } => CounterStatus::InternalError,
        }
    }

    /// Returns true for faults that indicate a bug on one side of the
    /// boundary rather than a bad argument.
    pub fn is_internal(&self) -> bool {
        self.status() == CounterStatus::InternalError
    }
}
