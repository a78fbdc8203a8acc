//! C ABI export.
//!
//! A single symbol, `diff`, taking raw hash arrays and caller-allocated index
//! buffers. There is no error channel: contract violations are undefined
//! behavior, and an internal failure leaves both buffers filled with `-1`.
//!
//! Tracing: span `hashdiff_ffi` with fields old_count, new_count.

use std::slice;

use crate::algo::{shortest_edit_script, write_or_fallback};
use crate::hash::ContentHash;

/// Diff two content-hash sequences.
///
/// Writes exactly `old_count` entries to `removed_out` and `new_count`
/// entries to `added_out`: the 0-based indices of removed old items and
/// added new items in script order, then `-1` padding.
///
/// # Safety
///
/// - `old_count` and `new_count` must be non-negative.
/// - `old_hashes` must be valid for reads of `old_count` hashes (32 bytes
///   each) and `new_hashes` for `new_count` hashes.
/// - `removed_out` must be valid for writes of `old_count` `i64`s and
///   `added_out` for `new_count` `i64`s.
/// - Output buffers must not overlap each other or the inputs.
/// - A pointer may be null only if its count is zero.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diff(
    old_hashes: *const ContentHash,
    new_hashes: *const ContentHash,
    old_count: i64,
    new_count: i64,
    removed_out: *mut i64,
    added_out: *mut i64,
) {
    let _span = tracing::info_span!("hashdiff_ffi", old_count, new_count).entered();

    let old_len = old_count as usize;
    let new_len = new_count as usize;

    // SAFETY: lengths and validity are the caller's contract (see above).
    let (old, new, removed, added) = unsafe {
        (
            raw_slice(old_hashes, old_len),
            raw_slice(new_hashes, new_len),
            raw_slice_mut(removed_out, old_len),
            raw_slice_mut(added_out, new_len),
        )
    };

    // The engine already logged the failure; buffers hold the sentinel fill.
    let _ = write_or_fallback(shortest_edit_script(old, new), removed, added);
}

/// Build a slice from a C pointer, tolerating null when `len` is zero.
unsafe fn raw_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len) }
    }
}

unsafe fn raw_slice_mut<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] {
    if len == 0 {
        &mut []
    } else {
        unsafe { slice::from_raw_parts_mut(ptr, len) }
    }
}
