//! Process-wide last-error slot.
//!
//! Every failing export overwrites the slot with a human-readable
//! message. Successful calls leave it untouched.
//!
//! # Threading
//!
//! The slot is shared by all handles on all threads and guarded by a
//! mutex, so writes never tear. The pointer handed out by
//! [`counter_ffi_last_error_message`] is borrowed from the slot: a failing
//! call on another thread frees it. Callers that fail concurrently should
//! use [`counter_ffi_copy_last_error`], which copies under the lock.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::buffer::write_nul_terminated;
use crate::error::FfiError;
use crate::guard::run_caught;
use crate::status::CounterStatus;

static LAST_ERROR: Mutex<Option<CString>> = Mutex::new(None);

/// Stores `msg` in the slot, replacing the previous message.
pub fn set_last_error(msg: &str) {
    // Interior NULs would truncate the message on the C side.
    let cstr = CString::new(msg.replace('\0', "\\0")).ok();
    *LAST_ERROR.lock() = cstr;
}

/// Records a failed export: logs it and stores `"<operation>: <error>"`.
pub fn record(operation: &str, err: &FfiError) {
    let msg = format!("{}: {}", operation, err);
    if err.is_internal() {
        warn!("{}", msg);
    } else {
        debug!("{}", msg);
    }
    set_last_error(&msg);
}

/// Returns a copy of the current message, if any.
pub fn last_error() -> Option<String> {
    LAST_ERROR
        .lock()
        .as_deref()
        .map(|c| c.to_string_lossy().into_owned())
}

pub fn clear_last_error() {
    *LAST_ERROR.lock() = None;
}

/// Returns the message of the most recent failure, or NULL if nothing has
/// failed since start-up or the last [`counter_ffi_clear_last_error`].
///
/// The string is owned by the library. Do not free it; it stays valid
/// until the next failing call on any thread.
#[no_mangle]
pub extern "C" fn counter_ffi_last_error_message() -> *const c_char {
    LAST_ERROR
        .lock()
        .as_deref()
        .map_or(ptr::null(), CStr::as_ptr)
}

/// Copies the last error message into a caller-owned buffer using the
/// two-phase convention of [`crate::buffer`]. With no message recorded the
/// result is the empty string (`*out_needed == 1`).
///
/// Failures of this call are not recorded in the slot, so the message being
/// read is never replaced by one about reading it.
///
/// # Safety
///
/// - `out_needed` must be valid for a `usize` write
/// - `buf`, when non-NULL, must be valid for `buf_len` bytes of writes
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_copy_last_error(
    buf: *mut c_char,
    buf_len: usize,
    out_needed: *mut usize,
) -> CounterStatus {
    let outcome = run_caught(|| {
        let slot = LAST_ERROR.lock();
        let text = slot.as_deref().map_or(&b""[..], CStr::to_bytes);
        unsafe { write_nul_terminated(text, buf, buf_len, out_needed) }
    });
    match outcome {
        Ok(()) => CounterStatus::Ok,
        Err(err) => err.status(),
    }
}

/// Empties the last-error slot.
#[no_mangle]
pub extern "C" fn counter_ffi_clear_last_error() {
    clear_last_error();
}
