//! C ABI for `counter_core::Counter`.
//!
//! This crate exposes a counter to C/C++ (or any language with a C FFI)
//! through a small, stable boundary:
//!
//! - Opaque handles created by `counter_ffi_new*` and released once by
//!   `counter_ffi_free`
//! - A [`CounterStatus`] return value on every fallible call, plus a
//!   process-wide last-error message
//! - Caller-owned buffers and a two-phase size query for variable-length
//!   text (`counter_ffi_get_label`, `counter_ffi_copy_last_error`)
//! - An optional change callback invoked synchronously after each
//!   successful `increment` / `reset`
//!
//! The matching header, `include/counter_ffi.h`, is generated by cbindgen
//! from these exports when the crate is built.
//!
//! # Example (C++)
//!
//! ```text
//! CounterHandle* h = nullptr;
//! counter_ffi_new(42, &h);
//! counter_ffi_increment(h, 5);
//!
//! size_t needed = 0;
//! counter_ffi_get_label(h, nullptr, 0, &needed);
//! std::vector<char> buf(needed);
//! counter_ffi_get_label(h, buf.data(), buf.size(), &needed);
//!
//! counter_ffi_free(h);
//! ```
//!
//! # Safety
//!
//! All exports use the `extern "C"` ABI and follow these rules:
//!
//! 1. Every pointer argument is checked for NULL before use
//! 2. Strings cross the boundary as NUL-terminated UTF-8
//! 3. The library never frees memory it did not allocate, and the caller
//!    never frees memory returned by the library
//! 4. Panics are caught and reported as `InternalError`; nothing unwinds
//!    into the caller
//! 5. A handle must not be used from several threads at once; the
//!    last-error slot is shared by all threads

mod buffer;
mod counter_exports;
mod error;
mod guard;
mod handle;
mod last_error;
mod logging;
mod status;

use std::ffi::c_char;

pub use counter_exports::*;
pub use error::{FfiError, FfiResult};
pub use handle::{
    counter_ffi_free, counter_ffi_new, counter_ffi_new_with_policy, CounterHandle,
    COUNTER_OVERFLOW_REJECT, COUNTER_OVERFLOW_SATURATE, COUNTER_OVERFLOW_WRAP,
};
pub use last_error::{
    counter_ffi_clear_last_error, counter_ffi_copy_last_error, counter_ffi_last_error_message,
    last_error,
};
pub use logging::{counter_ffi_init_logging, init_logging, LOG_ENV};
pub use status::{counter_ffi_status_name, CounterStatus};

/// `"<crate name> <version>"`, NUL-terminated.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " ",
    env!("CARGO_PKG_VERSION"),
    "\0"
);

/// Returns the library name and version as a static C string. Never freed.
#[no_mangle]
pub extern "C" fn counter_ffi_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}
