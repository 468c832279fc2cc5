//! Two-phase output of variable-length text into caller-owned buffers.
//!
//! ```text
//! 1. f(handle, NULL, 0, &needed)      -> Ok, needed = len + 1, nothing written
//! 2. buf = malloc(needed)
//! 3. f(handle, buf, needed, &needed)  -> Ok, buf = text + NUL
//! ```
//!
//! An undersized buffer is never written to: the call fails with
//! `InvalidArg` and `out_needed` still reports the required size.

use std::ffi::c_char;
use std::ptr;

use crate::error::{FfiError, FfiResult};

/// Bytes required to hold `text` plus its NUL terminator.
pub fn required_len(text: &[u8]) -> usize {
    text.len() + 1
}

/// Writes `text` followed by a NUL byte into `buf`.
///
/// A NULL `buf` or a zero `buf_len` is a size query. `*out_needed` is
/// always set when `out_needed` is non-NULL, on success and on
/// `BufferTooSmall` alike.
///
/// # Safety
///
/// - `out_needed` must be NULL or valid for a `usize` write
/// - when `buf` is non-NULL it must be valid for `buf_len` bytes of writes
/// - `text` must not contain a NUL byte
pub unsafe fn write_nul_terminated(
    text: &[u8],
    buf: *mut c_char,
    buf_len: usize,
    out_needed: *mut usize,
) -> FfiResult<()> {
    if out_needed.is_null() {
        return Err(FfiError::null_argument("out_needed"));
    }

    let needed = required_len(text);
    *out_needed = needed;

    if buf.is_null() || buf_len == 0 {
        return Ok(());
    }
    if buf_len < needed {
        return Err(FfiError::BufferTooSmall {
            needed,
            provided: buf_len,
        });
    }

    ptr::copy_nonoverlapping(text.as_ptr() as *const c_char, buf, text.len());
    *buf.add(text.len()) = 0;
    Ok(())
}
