//! Status codes returned across the C ABI.

use std::ffi::{c_char, CStr};
use std::fmt;

const UNKNOWN_STATUS: &CStr = c"unknown status";

/// Status / error codes returned by every fallible export.
///
/// The set is closed: callers may switch over it exhaustively.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterStatus {
    /// The call succeeded.
    Ok = 0,
    /// A required pointer or handle argument was NULL.
    NullArg = 1,
    /// An argument was present but violated a precondition (malformed
    /// UTF-8, undersized buffer, rejected overflow, unknown policy).
    InvalidArg = 2,
    /// Allocation failure, re-entrant call or a fault caught inside the
    /// library.
    InternalError = 3,
}

impl CounterStatus {
    /// Maps a raw status code coming from C. Out-of-range values yield `None`.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(CounterStatus::Ok),
            1 => Some(CounterStatus::NullArg),
            2 => Some(CounterStatus::InvalidArg),
            3 => Some(CounterStatus::InternalError),
            _ => None,
        }
    }

    /// Static, NUL-terminated name of the status.
    pub fn name(self) -> &'static CStr {
        match self {
            CounterStatus::Ok => c"ok",
            CounterStatus::NullArg => c"null argument",
            CounterStatus::InvalidArg => c"invalid argument",
            CounterStatus::InternalError => c"internal error",
        }
    }
}

impl fmt::Display for CounterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_string_lossy())
    }
}

/// Returns a static, NUL-terminated name for a status code.
///
/// Takes the raw integer so that out-of-range values coming from C are
/// handled; those yield `"unknown status"`. The returned pointer must not
/// be freed.
#[no_mangle]
pub extern "C" fn counter_ffi_status_name(status: i32) -> *const c_char {
    CounterStatus::from_raw(status)
        .map_or(UNKNOWN_STATUS, CounterStatus::name)
        .as_ptr()
}
