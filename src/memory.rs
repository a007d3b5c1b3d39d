//! Caller-side buffer management.
//!
//! Hosts obtain input buffers through `reflow_alloc`, fill them in linear
//! memory, and hand them back through `reflow_dealloc` once the module has
//! consumed them. `reflow_dealloc` takes no size argument, so every block
//! carries its allocation size in an 8-byte header ahead of the payload;
//! the payload itself stays 8-aligned.
//!
//! Result buffers are not managed here: they belong to the result slot and
//! are released through `reflow_free_result` or the next format call.
//! Passing one to `reflow_dealloc` is caller misuse.
//!
//! ## Debug ledger
//!
//! In builds with debug assertions (or the `alloc-ledger` feature) every
//! live block is tracked in a global table. A double free or a pointer
//! that never came from `reflow_alloc` is then reported and the process
//! aborts, instead of corrupting the heap. Release builds keep the
//! zero-bookkeeping contract and such misuse is undefined behavior.

use std::alloc::Layout;

/// Size of the header prepended to every caller-visible block.
/// Layout: `[total_size: u64][payload...]`.
const HEADER_SIZE: usize = 8;

/// Alignment for all boundary allocations.
const ALLOC_ALIGN: usize = 8;

/// Allocate `size` bytes for the caller to fill.
///
/// Returns null when `size` is zero, when the block would overflow, or
/// when the process allocator fails; callers must check.
///
/// Signature: `(size: usize) -> ptr`
///
/// # Safety
///
/// The returned pointer must be released exactly once via
/// [`reflow_dealloc`] and not used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reflow_alloc(size: usize) -> *mut u8 {
    if size == 0 {
        return std::ptr::null_mut();
    }
    let Some(total) = HEADER_SIZE.checked_add(size) else {
        return std::ptr::null_mut();
    };
    let Ok(layout) = Layout::from_size_align(total, ALLOC_ALIGN) else {
        return std::ptr::null_mut();
    };

    let base = unsafe { std::alloc::alloc(layout) };
    if base.is_null() {
        return std::ptr::null_mut();
    }
    unsafe { (base as *mut u64).write(total as u64) };

    let payload = unsafe { base.add(HEADER_SIZE) };
    ledger::note_alloc(payload, size);
    payload
}

/// Release a block obtained from [`reflow_alloc`]. Null is a no-op.
///
/// Signature: `(ptr: ptr) -> ()`
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by `reflow_alloc` that has not
/// been released yet. Anything else is undefined behavior in release
/// builds; the debug ledger turns it into an abort with a diagnostic.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reflow_dealloc(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    ledger::note_dealloc(ptr);

    let base = unsafe { ptr.sub(HEADER_SIZE) };
    let total = unsafe { (base as *const u64).read() } as usize;
    let Ok(layout) = Layout::from_size_align(total, ALLOC_ALIGN) else {
        return;
    };
    unsafe { std::alloc::dealloc(base, layout) };
}

#[cfg(any(debug_assertions, feature = "alloc-ledger"))]
mod ledger {
    use std::sync::{LazyLock, Mutex};

    use dashmap::DashMap;

    /// Live caller blocks keyed by payload address, mapped to the
    /// requested size.
    static LIVE: LazyLock<DashMap<usize, usize>> = LazyLock::new(DashMap::new);

    static STATS: Mutex<AllocStats> = Mutex::new(AllocStats::new());

    /// Ledger counters for caller allocations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AllocStats {
        /// Blocks handed out by `reflow_alloc` so far.
        pub allocated: u64,
        /// Blocks returned through `reflow_dealloc` so far.
        pub deallocated: u64,
        /// Highest number of blocks live at once.
        pub peak_count: u64,
    }

    impl AllocStats {
        const fn new() -> Self {
            Self {
                allocated: 0,
                deallocated: 0,
                peak_count: 0,
            }
        }
    }

    pub(super) fn note_alloc(ptr: *mut u8, size: usize) {
        LIVE.insert(ptr as usize, size);

        let mut stats = STATS.lock().unwrap();
        stats.allocated += 1;
        let current = stats.allocated - stats.deallocated;
        if current > stats.peak_count {
            stats.peak_count = current;
        }
    }

    /// Cross a block off the ledger ahead of the actual free.
    ///
    /// Panics on pointers that are not live `reflow_alloc` blocks, turning
    /// a double free or a foreign pointer into a reported error instead of
    /// heap corruption.
    pub(super) fn note_dealloc(ptr: *mut u8) {
        if LIVE.remove(&(ptr as usize)).is_none() {
            panic!(
                "reflow_dealloc: {ptr:p} is not a live reflow_alloc block \
                 (double free or foreign pointer)"
            );
        }
        STATS.lock().unwrap().deallocated += 1;
    }

    /// Number of caller blocks currently outstanding.
    pub fn outstanding() -> usize {
        LIVE.len()
    }

    /// Snapshot of the ledger counters.
    pub fn stats() -> AllocStats {
        *STATS.lock().unwrap()
    }
}

#[cfg(not(any(debug_assertions, feature = "alloc-ledger")))]
mod ledger {
    #[inline]
    pub(super) fn note_alloc(_ptr: *mut u8, _size: usize) {}

    #[inline]
    pub(super) fn note_dealloc(_ptr: *mut u8) {}
}

#[cfg(any(debug_assertions, feature = "alloc-ledger"))]
pub use ledger::{AllocStats, outstanding, stats};
