//! Panic containment for exported functions.
//!
//! Unwinding across `extern "C"` is undefined behaviour, so every export
//! runs its body through [`guard`], which turns panics into
//! [`FfiError::Panic`] and errors into a [`CounterStatus`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{FfiError, FfiResult};
use crate::last_error;
use crate::status::CounterStatus;

/// Runs `f`, converting a panic into [`FfiError::Panic`].
pub fn run_caught<T, F>(f: F) -> FfiResult<T>
where
    F: FnOnce() -> FfiResult<T>,
{
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(FfiError::panic(panic_message(payload.as_ref()))))
}

/// Runs the body of the export named `operation`.
///
/// On failure the error is logged and written to the last-error slot, and
/// its status is returned.
pub fn guard<F>(operation: &'static str, f: F) -> CounterStatus
where
    F: FnOnce() -> FfiResult<()>,
{
    match run_caught(f) {
        Ok(()) => CounterStatus::Ok,
        Err(err) => {
            last_error::record(operation, &err);
            err.status()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
