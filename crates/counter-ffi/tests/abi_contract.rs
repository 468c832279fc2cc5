//! Contract tests for the exported C ABI.
//!
//! These tests only call `extern "C"` functions, the way a C/C++ host
//! would.

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::ptr;

use counter_ffi::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serial_test::serial;

thread_local! {
    static NOTIFIED: RefCell<Vec<i64>> = const { RefCell::new(Vec::new()) };
}

unsafe extern "C" fn on_change(value: i64) {
    NOTIFIED.with(|n| n.borrow_mut().push(value));
}

fn drain_notified() -> Vec<i64> {
    NOTIFIED.with(|n| std::mem::take(&mut *n.borrow_mut()))
}

/// Owns a handle and frees it on drop, like the `unique_ptr` a C++ host
/// would wrap it in.
struct Owned(*mut CounterHandle);

impl Owned {
    fn new(initial: i64) -> Self {
        let mut h = ptr::null_mut();
        assert_eq!(unsafe { counter_ffi_new(initial, &mut h) }, CounterStatus::Ok);
        Owned(h)
    }

    fn with_policy(initial: i64, policy: u32) -> Self {
        let mut h = ptr::null_mut();
        assert_eq!(
            unsafe { counter_ffi_new_with_policy(initial, policy, &mut h) },
            CounterStatus::Ok
        );
        Owned(h)
    }

    fn value(&self) -> i64 {
        let mut v = i64::MIN;
        assert_eq!(unsafe { counter_ffi_value(self.0, &mut v) }, CounterStatus::Ok);
        v
    }

    fn set_label_bytes(&self, bytes: &[u8]) -> CounterStatus {
        let text = CString::new(bytes).expect("test label without NUL");
        unsafe { counter_ffi_set_label(self.0, text.as_ptr()) }
    }

    fn needed(&self) -> usize {
        let mut needed = 0usize;
        let st = unsafe { counter_ffi_get_label(self.0, ptr::null_mut(), 0, &mut needed) };
        assert_eq!(st, CounterStatus::Ok);
        needed
    }
}

impl Drop for Owned {
    fn drop(&mut self) {
        unsafe { counter_ffi_free(self.0) };
    }
}

fn last_error_text() -> Option<String> {
    let p = counter_ffi_last_error_message();
    if p.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned())
    }
}

#[test]
fn test_demo_scenario() {
    drain_notified();
    let version = unsafe { CStr::from_ptr(counter_ffi_version()) };
    assert!(version.to_str().unwrap().starts_with("counter-ffi "));

    let counter = Owned::new(42);
    let st = unsafe { counter_ffi_set_callback(counter.0, Some(on_change)) };
    assert_eq!(st, CounterStatus::Ok);

    assert_eq!(unsafe { counter_ffi_increment(counter.0, 5) }, CounterStatus::Ok);
    assert_eq!(unsafe { counter_ffi_increment(counter.0, -2) }, CounterStatus::Ok);
    assert_eq!(counter.value(), 45);

    assert_eq!(counter.set_label_bytes(b"demo-label"), CounterStatus::Ok);
    let needed = counter.needed();
    assert_eq!(needed, "demo-label".len() + 1);
    let mut buf = vec![0 as c_char; needed];
    let mut written = 0usize;
    let st = unsafe { counter_ffi_get_label(counter.0, buf.as_mut_ptr(), needed, &mut written) };
    assert_eq!(st, CounterStatus::Ok);
    assert_eq!(written, needed);
    assert_eq!(unsafe { CStr::from_ptr(buf.as_ptr()) }.to_str().unwrap(), "demo-label");

    assert_eq!(unsafe { counter_ffi_reset(counter.0) }, CounterStatus::Ok);
    assert_eq!(counter.value(), 0);

    assert_eq!(drain_notified(), vec![47, 45, 0]);
}

#[test]
fn test_free_null_is_noop() {
    unsafe { counter_ffi_free(ptr::null_mut()) };
    unsafe { counter_ffi_free(ptr::null_mut()) };
}

#[test]
#[serial]
fn test_failures_set_last_error() {
    counter_ffi_clear_last_error();
    assert_eq!(last_error_text(), None);

    assert_eq!(unsafe { counter_ffi_increment(ptr::null_mut(), 1) }, CounterStatus::NullArg);
    assert_eq!(
        last_error_text().as_deref(),
        Some("counter_ffi_increment: handle is NULL")
    );

    // Successful calls leave the message in place.
    let counter = Owned::new(0);
    assert_eq!(unsafe { counter_ffi_increment(counter.0, 1) }, CounterStatus::Ok);
    assert_eq!(
        last_error_text().as_deref(),
        Some("counter_ffi_increment: handle is NULL")
    );

    // Copy-out gives the same text.
    let mut needed = 0usize;
    unsafe { counter_ffi_copy_last_error(ptr::null_mut(), 0, &mut needed) };
    let mut buf = vec![0 as c_char; needed];
    let st = unsafe { counter_ffi_copy_last_error(buf.as_mut_ptr(), buf.len(), &mut needed) };
    assert_eq!(st, CounterStatus::Ok);
    assert_eq!(
        unsafe { CStr::from_ptr(buf.as_ptr()) }.to_str().unwrap(),
        "counter_ffi_increment: handle is NULL"
    );
}

#[test]
#[serial]
fn test_invalid_utf8_label_rejected() {
    let counter = Owned::new(0);
    assert_eq!(counter.set_label_bytes(b"before"), CounterStatus::Ok);

    assert_eq!(counter.set_label_bytes(&[0xc3, 0x28]), CounterStatus::InvalidArg);
    assert_eq!(counter.needed(), "before".len() + 1);

    let raw = CounterStatus::InvalidArg as i32;
    let name = unsafe { CStr::from_ptr(counter_ffi_status_name(raw)) };
    assert_eq!(name.to_str().unwrap(), "invalid argument");
}

#[test]
#[serial]
fn test_overflow_policies() {
    let saturating = Owned::new(i64::MAX);
    assert_eq!(unsafe { counter_ffi_increment(saturating.0, 1) }, CounterStatus::Ok);
    assert_eq!(saturating.value(), i64::MAX);

    let wrapping = Owned::with_policy(i64::MAX, COUNTER_OVERFLOW_WRAP);
    assert_eq!(unsafe { counter_ffi_increment(wrapping.0, 1) }, CounterStatus::Ok);
    assert_eq!(wrapping.value(), i64::MIN);

    let rejecting = Owned::with_policy(i64::MIN, COUNTER_OVERFLOW_REJECT);
    assert_eq!(unsafe { counter_ffi_increment(rejecting.0, -1) }, CounterStatus::InvalidArg);
    assert_eq!(rejecting.value(), i64::MIN);
    assert_eq!(
        last_error_text().as_deref(),
        Some(
            "counter_ffi_increment: increment overflow: \
             -9223372036854775808 + -1 does not fit in i64"
        )
    );
}

#[test]
fn test_clearing_callback_stops_notifications() {
    drain_notified();
    let counter = Owned::new(0);
    unsafe { counter_ffi_set_callback(counter.0, Some(on_change)) };
    unsafe { counter_ffi_increment(counter.0, 1) };
    unsafe { counter_ffi_set_callback(counter.0, None) };
    unsafe { counter_ffi_increment(counter.0, 1) };
    unsafe { counter_ffi_reset(counter.0) };
    assert_eq!(drain_notified(), vec![1]);
}

proptest! {
    #[test]
    fn prop_create_then_value(initial in any::<i64>()) {
        let counter = Owned::new(initial);
        prop_assert_eq!(counter.value(), initial);
    }

    #[test]
    fn prop_increments_accumulate(
        initial in -1_000_000i64..1_000_000,
        deltas in prop::collection::vec(-1_000_000i64..1_000_000, 0..32),
    ) {
        let counter = Owned::new(initial);
        for d in &deltas {
            prop_assert_eq!(unsafe { counter_ffi_increment(counter.0, *d) }, CounterStatus::Ok);
        }
        prop_assert_eq!(counter.value(), initial + deltas.iter().sum::<i64>());
    }

    #[test]
    fn prop_reset_yields_zero(initial in any::<i64>(), delta in any::<i64>()) {
        let counter = Owned::new(initial);
        unsafe { counter_ffi_increment(counter.0, delta) };
        prop_assert_eq!(unsafe { counter_ffi_reset(counter.0) }, CounterStatus::Ok);
        prop_assert_eq!(counter.value(), 0);
    }

    #[test]
    #[serial]
    fn prop_label_two_phase(label in "\\PC{1,40}") {
        let counter = Owned::new(0);
        prop_assert_eq!(counter.set_label_bytes(label.as_bytes()), CounterStatus::Ok);

        // Size query leaves a zero-length buffer untouched.
        let mut sentinel = [0x5a as c_char; 1];
        let mut needed = 0usize;
        let sentinel_ptr = sentinel.as_mut_ptr();
        let st = unsafe { counter_ffi_get_label(counter.0, sentinel_ptr, 0, &mut needed) };
        prop_assert_eq!(st, CounterStatus::Ok);
        prop_assert_eq!(needed, label.len() + 1);
        prop_assert_eq!(sentinel[0], 0x5a as c_char);

        // Exact size round-trips.
        let mut buf = vec![0 as c_char; needed];
        let mut written = 0usize;
        let buf_ptr = buf.as_mut_ptr();
        let st = unsafe { counter_ffi_get_label(counter.0, buf_ptr, needed, &mut written) };
        prop_assert_eq!(st, CounterStatus::Ok);
        prop_assert_eq!(written, needed);
        let read = unsafe { CStr::from_ptr(buf.as_ptr()) }.to_str().unwrap().to_string();
        prop_assert_eq!(read, label.clone());

        // One byte short fails and reports the same size.
        let mut short = vec![0x5a as c_char; needed - 1];
        let mut again = 0usize;
        let (short_ptr, short_len) = (short.as_mut_ptr(), short.len());
        let st = unsafe { counter_ffi_get_label(counter.0, short_ptr, short_len, &mut again) };
        prop_assert_eq!(st, CounterStatus::InvalidArg);
        prop_assert_eq!(again, needed);
        prop_assert!(short.iter().all(|b| *b == 0x5a as c_char));
    }
}
