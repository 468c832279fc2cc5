//! Opaque counter handles and their lifecycle.
//!
//! A handle is a `Box<RefCell<Counter>>` turned into a raw pointer. The
//! caller owns it from `counter_ffi_new*` until `counter_ffi_free`. The
//! `RefCell` is what detects a change callback calling back into its own
//! handle while the triggering call still holds the counter.

use std::cell::{Ref, RefCell, RefMut};

use counter_core::{Counter, CounterConfig, OverflowPolicy};
use log::trace;

use crate::error::{FfiError, FfiResult};
use crate::guard::guard;
use crate::last_error;
use crate::status::CounterStatus;

/// Overflow policy discriminants accepted by [`counter_ffi_new_with_policy`].
pub const COUNTER_OVERFLOW_SATURATE: u32 = 0;
pub const COUNTER_OVERFLOW_WRAP: u32 = 1;
pub const COUNTER_OVERFLOW_REJECT: u32 = 2;

/// Opaque handle for C/C++.
#[repr(C)]
pub struct CounterHandle {
    _private: [u8; 0],
}

type CounterCell = RefCell<Counter>;

/// Maps a raw policy discriminant coming from C.
pub fn overflow_policy_from_raw(raw: u32) -> FfiResult<OverflowPolicy> {
    match raw {
        COUNTER_OVERFLOW_SATURATE => Ok(OverflowPolicy::Saturate),
        COUNTER_OVERFLOW_WRAP => Ok(OverflowPolicy::Wrap),
        COUNTER_OVERFLOW_REJECT => Ok(OverflowPolicy::Reject),
        _ => Err(FfiError::InvalidPolicy { raw }),
    }
}

/// Dereferences a handle.
///
/// # Safety
///
/// `handle` must be NULL or a live pointer returned by `counter_ffi_new*`.
unsafe fn cell<'a>(handle: *const CounterHandle) -> FfiResult<&'a CounterCell> {
    if handle.is_null() {
        return Err(FfiError::null_argument("handle"));
    }
    Ok(&*(handle as *const CounterCell))
}

/// Borrows the counter behind `handle` for reading.
///
/// # Safety
///
/// See [`cell`].
pub unsafe fn counter_ref<'a>(handle: *const CounterHandle) -> FfiResult<Ref<'a, Counter>> {
    cell(handle)?.try_borrow().map_err(|_| FfiError::Reentrant)
}

/// Borrows the counter behind `handle` for mutation.
///
/// # Safety
///
/// See [`cell`].
pub unsafe fn counter_mut<'a>(handle: *mut CounterHandle) -> FfiResult<RefMut<'a, Counter>> {
    cell(handle)?.try_borrow_mut().map_err(|_| FfiError::Reentrant)
}

fn into_handle(counter: Counter) -> *mut CounterHandle {
    Box::into_raw(Box::new(RefCell::new(counter))) as *mut CounterHandle
}

unsafe fn create(
    config: CounterConfig,
    initial: i64,
    out_counter: *mut *mut CounterHandle,
) -> FfiResult<()> {
    if out_counter.is_null() {
        return Err(FfiError::null_argument("out_counter"));
    }
    let handle = into_handle(Counter::with_config(initial, config));
    trace!(
        "Created counter {:p} (initial {}, overflow {})",
        handle,
        initial,
        config.overflow
    );
    *out_counter = handle;
    Ok(())
}

/// Creates a counter with the default (saturating) overflow policy.
///
/// On success `*out_counter` receives an owning handle that must be
/// released exactly once with [`counter_ffi_free`].
///
/// # Safety
///
/// - `out_counter` must be NULL or valid for a pointer write
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_new(
    initial: i64,
    out_counter: *mut *mut CounterHandle,
) -> CounterStatus {
    guard("counter_ffi_new", || unsafe {
        create(CounterConfig::default(), initial, out_counter)
    })
}

/// Creates a counter with an explicit overflow policy
/// (`COUNTER_OVERFLOW_SATURATE`, `COUNTER_OVERFLOW_WRAP` or
/// `COUNTER_OVERFLOW_REJECT`). Unknown values fail with `InvalidArg`.
///
/// # Safety
///
/// - `out_counter` must be NULL or valid for a pointer write
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_new_with_policy(
    initial: i64,
    policy: u32,
    out_counter: *mut *mut CounterHandle,
) -> CounterStatus {
    guard("counter_ffi_new_with_policy", || {
        let overflow = overflow_policy_from_raw(policy)?;
        unsafe { create(CounterConfig::with_overflow(overflow), initial, out_counter) }
    })
}

/// Releases a counter. NULL is accepted and ignored.
///
/// Called from inside the handle's own change callback, the counter is
/// still in use: nothing is released, the handle stays valid and the
/// last-error slot records a re-entrant call. Free it again once the
/// triggering call has returned.
///
/// # Safety
///
/// - `handle` must be NULL or a live handle; it is invalid afterwards
#[no_mangle]
pub unsafe extern "C" fn counter_ffi_free(handle: *mut CounterHandle) {
    if handle.is_null() {
        return;
    }
    let in_use = (*(handle as *const CounterCell)).try_borrow_mut().is_err();
    if in_use {
        last_error::record("counter_ffi_free", &FfiError::Reentrant);
        return;
    }
    trace!("Freeing counter {:p}", handle);
    drop(Box::from_raw(handle as *mut CounterCell));
}
