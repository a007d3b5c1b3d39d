//! C-style exports driven by the WASM host.
//!
//! Everything the host can call lives here (buffer exchange excepted, see
//! [`crate::memory`]):
//! - Session lifecycle (`reflow_init`)
//! - Style configuration (`reflow_set_style`, `reflow_set_fallback_style`)
//! - Formatting in two shapes (`reflow_format`, `reflow_format_record`)
//! - Result access (`reflow_result_status`, `reflow_result_ptr`,
//!   `reflow_result_len`, `reflow_free_result`)
//! - Version reporting (`reflow_version`, `reflow_version_len`)
//!
//! ## One result, two calling conventions
//!
//! Both format exports run the same session operation and publish into the
//! same result slot. `reflow_format` returns the status and leaves the
//! buffer to the discrete accessors; `reflow_format_record` returns the
//! address of the result record, `{ status: i32, content_ptr: ptr,
//! content_len: i32 }`, for hosts that prefer one call and three loads.
//! Mixing the two is fine: they can never disagree.
//!
//! ## Threading
//!
//! The exports assume a single logical caller (one WASM instance driven
//! from one host thread) and perform no internal locking. Every call runs
//! to completion; there is no re-entry.

use std::cell::UnsafeCell;
use std::sync::LazyLock;

use crate::backend;
use crate::record::{FormatRecord, ResultStatus};
use crate::session::FormatSession;

/// Global session cell.
///
/// Safety: the boundary contract is single-threaded (see the module docs),
/// so unsynchronized access to the cell is safe as long as the exports are
/// not re-entered.
///
/// We use `UnsafeCell` to avoid `static mut` (denied in Rust 2024 edition).
struct SessionCell {
    session: UnsafeCell<Option<FormatSession>>,
}

unsafe impl Sync for SessionCell {}

static SESSION: SessionCell = SessionCell {
    session: UnsafeCell::new(None),
};

unsafe fn session() -> Option<&'static mut FormatSession> {
    unsafe { (*SESSION.session.get()).as_mut() }
}

/// Version bytes reported by `reflow_version`.
///
/// Materialized from the engine on first use and kept for the process
/// lifetime, so the pointer handed to the host is never freed and the
/// bytes never move.
static VERSION: LazyLock<Box<[u8]>> = LazyLock::new(|| {
    backend::open_engine()
        .version()
        .into_bytes()
        .into_boxed_slice()
});

/// View a caller buffer as a byte slice. Null pointers read as empty.
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `len` bytes.
unsafe fn byte_view<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(ptr, len) }
    }
}

/// Initialize the global formatting session.
///
/// Idempotent: the first call constructs the engine, later calls leave the
/// existing session and its configuration untouched. Nothing else works
/// before this has run, except the version exports.
///
/// Signature: `() -> ()`
#[unsafe(no_mangle)]
pub extern "C" fn reflow_init() {
    let cell = unsafe { &mut *SESSION.session.get() };
    if cell.is_none() {
        *cell = Some(FormatSession::new(backend::open_engine()));
    }
}

/// Replace the active style configuration.
///
/// The bytes are opaque to the boundary and copied before this returns, so
/// the caller may release `ptr` immediately. The last write wins and
/// persists across format calls.
///
/// Returns 0 on success, -1 when `reflow_init` has not run yet.
///
/// Signature: `(ptr: ptr, len: usize) -> i32`
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reflow_set_style(ptr: *const u8, len: usize) -> i32 {
    let Some(session) = (unsafe { session() }) else {
        return -1;
    };
    session.set_style(unsafe { byte_view(ptr, len) });
    0
}

/// Replace the fallback style used when the active style cannot be
/// resolved for an input. Same contract as [`reflow_set_style`].
///
/// Signature: `(ptr: ptr, len: usize) -> i32`
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reflow_set_fallback_style(ptr: *const u8, len: usize) -> i32 {
    let Some(session) = (unsafe { session() }) else {
        return -1;
    };
    session.set_fallback_style(unsafe { byte_view(ptr, len) });
    0
}

/// Format a source buffer and publish the outcome into the result slot.
///
/// The previous result buffer is released before the engine runs, so
/// pointers from earlier calls are invalid afterwards regardless of the
/// new status. Returns the status code, also readable through
/// [`reflow_result_status`]: 0 success, 1 error, 2 unchanged.
///
/// Before `reflow_init` this reports the error status without touching
/// the engine or allocating.
///
/// Signature: `(code: ptr, code_len: usize, file_name: ptr, file_name_len: usize) -> i32`
///
/// # Safety
///
/// `code` and `file_name` must each be null or valid for reads of their
/// stated length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reflow_format(
    code: *const u8,
    code_len: usize,
    file_name: *const u8,
    file_name_len: usize,
) -> i32 {
    let Some(session) = (unsafe { session() }) else {
        return ResultStatus::Error as i32;
    };
    let source = unsafe { byte_view(code, code_len) };
    let name = unsafe { byte_view(file_name, file_name_len) };
    session.format(source, name) as i32
}

/// Format a source buffer and return the address of the result record.
///
/// The same operation as [`reflow_format`] over the same single result
/// slot; only the return shape differs. The record address is stable for
/// the session's lifetime, so hosts may cache it. Returns null before
/// `reflow_init`.
///
/// Signature: `(code: ptr, code_len: usize, file_name: ptr, file_name_len: usize) -> ptr`
///
/// # Safety
///
/// `code` and `file_name` must each be null or valid for reads of their
/// stated length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reflow_format_record(
    code: *const u8,
    code_len: usize,
    file_name: *const u8,
    file_name_len: usize,
) -> *const FormatRecord {
    let Some(session) = (unsafe { session() }) else {
        return std::ptr::null();
    };
    let source = unsafe { byte_view(code, code_len) };
    let name = unsafe { byte_view(file_name, file_name_len) };
    session.format(source, name);
    session.record_ptr()
}

/// Status code of the most recent format call: 0 success, 1 error,
/// 2 unchanged. Reads as the error status before `reflow_init`.
///
/// Signature: `() -> i32`
#[unsafe(no_mangle)]
pub extern "C" fn reflow_result_status() -> i32 {
    match unsafe { session() } {
        Some(session) => session.result_status() as i32,
        None => ResultStatus::Error as i32,
    }
}

/// Start of the result buffer, or null when the last outcome carried no
/// content. Valid until the next format call or [`reflow_free_result`].
///
/// Signature: `() -> ptr`
#[unsafe(no_mangle)]
pub extern "C" fn reflow_result_ptr() -> *const u8 {
    match unsafe { session() } {
        Some(session) => session.result_ptr(),
        None => std::ptr::null(),
    }
}

/// Length of the result buffer in bytes.
///
/// Signature: `() -> i32`
#[unsafe(no_mangle)]
pub extern "C" fn reflow_result_len() -> i32 {
    match unsafe { session() } {
        Some(session) => session.result_len(),
        None => 0,
    }
}

/// Release the current result buffer.
///
/// Idempotent. Only the buffer fields are reset: the pointer reads as
/// null and the length as zero afterwards, while the status keeps its last
/// value. A no-op before `reflow_init`.
///
/// Signature: `() -> ()`
#[unsafe(no_mangle)]
pub extern "C" fn reflow_free_result() {
    if let Some(session) = unsafe { session() } {
        session.free_result();
    }
}

/// Pointer to the engine version string (not NUL-terminated).
///
/// The bytes live for the whole process: they are never freed, survive
/// [`reflow_free_result`], and do not require `reflow_init`. Byte-identical
/// on every call.
///
/// Signature: `() -> ptr`
#[unsafe(no_mangle)]
pub extern "C" fn reflow_version() -> *const u8 {
    VERSION.as_ptr()
}

/// Length of the version string in bytes.
///
/// Signature: `() -> usize`
#[unsafe(no_mangle)]
pub extern "C" fn reflow_version_len() -> usize {
    VERSION.len()
}
