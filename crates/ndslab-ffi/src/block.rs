//! Length-prefixed heap blocks.
//!
//! Every buffer handed across the C boundary, arrays and deep-fill values
//! alike, is a block: one word holding the byte length, followed by the
//! bytes themselves. Callers only ever see the pointer past the prefix, so
//! a block can be freed without knowing what it holds.
//!
//! ```text
//! base             len          (one word, hidden)
//! base + WORD      bytes[len]   <- pointer given to C
//! ```

use std::alloc::{self, Layout};

use ndslab_core::WORD;

fn block_layout(len: usize) -> Option<Layout> {
    let size = len.checked_add(WORD)?;
    Layout::from_size_align(size, std::mem::align_of::<usize>()).ok()
}

/// Allocate a zeroed block of `len` bytes. Aborts on allocation failure.
#[allow(unsafe_code)]
pub(crate) fn alloc_block(len: usize) -> *mut u8 {
    let Some(layout) = block_layout(len) else {
        eprintln!("ndslab: block of {len} bytes overflows the address space");
        std::process::abort();
    };
    // SAFETY: layout is at least one word, so its size is non-zero.
    let base = unsafe { alloc::alloc_zeroed(layout) };
    if base.is_null() {
        alloc::handle_alloc_error(layout);
    }
    // SAFETY: base is word aligned and valid for WORD + len bytes.
    unsafe {
        base.cast::<usize>().write(len);
        base.add(WORD)
    }
}

/// Allocate a block holding a copy of `bytes`.
pub(crate) fn block_from_slice(bytes: &[u8]) -> *mut u8 {
    let ptr = alloc_block(bytes.len());
    block_bytes_mut(ptr).copy_from_slice(bytes);
    ptr
}

/// Byte length of the block at `ptr`.
///
/// `ptr` must come from [`alloc_block`] and not have been freed.
#[allow(unsafe_code)]
pub(crate) fn block_len(ptr: *const u8) -> usize {
    // SAFETY: the length word sits directly before ptr and is aligned.
    unsafe { ptr.sub(WORD).cast::<usize>().read() }
}

/// The bytes of the block at `ptr`.
///
/// `ptr` must come from [`alloc_block`], not have been freed, and not be
/// mutably borrowed elsewhere for `'a`.
#[allow(unsafe_code)]
pub(crate) fn block_bytes<'a>(ptr: *const u8) -> &'a [u8] {
    // SAFETY: per the contract above, ptr is valid for block_len bytes.
    unsafe { std::slice::from_raw_parts(ptr, block_len(ptr)) }
}

/// The bytes of the block at `ptr`, mutably.
///
/// Same contract as [`block_bytes`], with exclusive access.
#[allow(unsafe_code)]
pub(crate) fn block_bytes_mut<'a>(ptr: *mut u8) -> &'a mut [u8] {
    // SAFETY: per the contract above, ptr is valid and unaliased for block_len bytes.
    unsafe { std::slice::from_raw_parts_mut(ptr, block_len(ptr)) }
}

/// Release the block at `ptr`.
///
/// `ptr` must come from [`alloc_block`] and not have been freed.
#[allow(unsafe_code)]
pub(crate) fn free_block(ptr: *mut u8) {
    let len = block_len(ptr);
    let Some(layout) = block_layout(len) else {
        // Only reachable with a corrupted prefix.
        std::process::abort();
    };
    // SAFETY: base and layout are exactly those used by alloc_block.
    unsafe { alloc::dealloc(ptr.sub(WORD), layout) }
}
