//! Per-thread allocation counting.
//!
//! Install in a test binary with
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: ndslab_test_utils::CountingAllocator = ndslab_test_utils::CountingAllocator;
//! ```
//!
//! Counters are thread-local so that tests running in parallel do not see
//! each other's allocations. Without the allocator installed every count
//! stays at zero.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn record_alloc() {
    // try_with: the slot may already be gone during thread teardown.
    let _ = LIVE.try_with(|live| live.set(live.get() + 1));
}

fn record_dealloc() {
    let _ = LIVE.try_with(|live| live.set(live.get() - 1));
}

/// [`System`] wrapper counting heap blocks allocated on the current thread.
pub struct CountingAllocator;

#[allow(unsafe_code)]
// SAFETY: every call forwards to `System` unchanged; counting only touches
// const-initialised thread-locals, which never allocate.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded with the caller's layout contract.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc();
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded with the caller's layout contract.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc();
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        record_dealloc();
        // SAFETY: `ptr` was returned by this allocator with `layout`.
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: forwarded with the caller's layout contract. A successful
        // realloc moves one live block, so the live count is unchanged.
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

/// Heap blocks currently live on this thread, net of frees.
///
/// Can go negative when a block allocated on another thread is freed here.
pub fn live_allocations() -> isize {
    LIVE.try_with(Cell::get).unwrap_or(0)
}

/// Live block count at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocSnapshot {
    live: isize,
}

impl AllocSnapshot {
    /// Capture the current thread's counters.
    pub fn now() -> Self {
        Self {
            live: live_allocations(),
        }
    }

    /// Change in live blocks since the snapshot. Zero means everything
    /// allocated since was freed exactly once.
    pub fn live_delta(&self) -> isize {
        live_allocations() - self.live
    }
}
