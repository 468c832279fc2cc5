//! Counter operations exported for C/C++ callers.
//!
//! Each function validates its pointers, borrows the counter behind the
//! handle and returns a [`CounterStatus`]. Failures also update the
//! last-error slot.

use std::ffi::{c_char, CStr};

use counter_core::ChangeCallback;

use crate::buffer::write_nul_terminated;
use crate::error::FfiError;
use crate::guard::guard;
use crate::handle::{counter_mut, counter_ref, CounterHandle};
use crate::status::CounterStatus;

/// Change-notification callback. Receives the new value.
///
/// Runs synchronously inside `counter_ffi_increment` / `counter_ffi_reset`.
/// Calling back into the same handle from the callback fails with
/// `InternalError`, and `counter_ffi_free` on it is refused.
pub type CounterCallback = Option<unsafe extern "C" fn(value: i64)>;

/// Adds `delta` to the counter and notifies the callback, if any.
///
/// Overflow follows the handle's policy: saturate (default), wrap, or
/// fail with `InvalidArg` leaving the value unchanged.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_increment(
    handle: *mut CounterHandle,
    delta: i64,
) -> CounterStatus {
    guard("counter_ffi_increment", || {
        unsafe { counter_mut(handle) }?.increment(delta)?;
        Ok(())
    })
}

/// Reads the current value into `*out_value`.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle
/// - `out_value` must be NULL or valid for an `i64` write
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_value(
    handle: *const CounterHandle,
    out_value: *mut i64,
) -> CounterStatus {
    guard("counter_ffi_value", || {
        let counter = unsafe { counter_ref(handle) }?;
        if out_value.is_null() {
            return Err(FfiError::null_argument("out_value"));
        }
        unsafe { *out_value = counter.value() };
        Ok(())
    })
}

/// Sets the value to 0 and notifies the callback, if any.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_reset(handle: *mut CounterHandle) -> CounterStatus {
    guard("counter_ffi_reset", || {
        unsafe { counter_mut(handle) }?.reset();
        Ok(())
    })
}

/// Replaces the label with a NUL-terminated UTF-8 string. The empty string
/// clears it. On `InvalidArg` the previous label is kept.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle
/// - `label_utf8` must be NULL or a valid NUL-terminated C string
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_set_label(
    handle: *mut CounterHandle,
    label_utf8: *const c_char,
) -> CounterStatus {
    guard("counter_ffi_set_label", || {
        let mut counter = unsafe { counter_mut(handle) }?;
        if label_utf8.is_null() {
            return Err(FfiError::null_argument("label_utf8"));
        }

        let label = unsafe { CStr::from_ptr(label_utf8) }
            .to_str()
            .map_err(|_| FfiError::invalid_utf8("label_utf8"))?;
        counter.set_label(label);
        Ok(())
    })
}

/// Copies the label into a caller-owned buffer.
///
/// Call once with `out_buf == NULL` (or `buf_len == 0`) to learn the size
/// including the NUL terminator, then again with a buffer of at least that
/// size. A too-small buffer is left untouched and the call fails with
/// `InvalidArg`; `*out_needed` still reports the required size. An unset
/// label reads as the empty string.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle
/// - `out_needed` must be NULL or valid for a `usize` write
/// - `out_buf`, when non-NULL, must be valid for `buf_len` bytes of writes
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_get_label(
    handle: *const CounterHandle,
    out_buf: *mut c_char,
    buf_len: usize,
    out_needed: *mut usize,
) -> CounterStatus {
    guard("counter_ffi_get_label", || {
        let counter = unsafe { counter_ref(handle) }?;
        let label = counter.label().unwrap_or("");
        unsafe { write_nul_terminated(label.as_bytes(), out_buf, buf_len, out_needed) }
    })
}

/// Installs `callback`, replacing any previous one. NULL clears the slot.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle
/// - `callback`, when set, must stay callable until it is replaced or the
///   handle is freed
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_set_callback(
    handle: *mut CounterHandle,
    callback: CounterCallback,
) -> CounterStatus {
    guard("counter_ffi_set_callback", || {
        let mut counter = unsafe { counter_mut(handle) }?;
        let on_change = callback.map(|func| -> ChangeCallback {
            Box::new(move |value| unsafe { func(value) })
        });
        counter.set_on_change(on_change);
        Ok(())
    })
}

/// Writes whether a callback is installed into `*out_has_callback`.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle
/// - `out_has_callback` must be NULL or valid for a `bool` write
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_has_callback(
    handle: *const CounterHandle,
    out_has_callback: *mut bool,
) -> CounterStatus {
    guard("counter_ffi_has_callback", || {
        let counter = unsafe { counter_ref(handle) }?;
        if out_has_callback.is_null() {
            return Err(FfiError::null_argument("out_has_callback"));
        }
        unsafe { *out_has_callback = counter.has_on_change() };
        Ok(())
    })
}
