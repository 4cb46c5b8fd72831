//! C ABI for ndslab arrays.
//!
//! Arrays cross the boundary as raw pointers to the bit-exact encoded
//! layout (dimensionality word, shape words, payload). Every buffer is a
//! length-prefixed block, so the engine's safe operations run over it
//! through a borrowed view and one deallocator releases arrays and deep
//! values alike.
//!
//! Every entry point catches panics and returns [`NdslabStatus::Panicked`]
//! instead of unwinding into C; the message is kept per thread for
//! [`ndslab_last_panic_message`]. This is the only crate in the workspace
//! that contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Store the message of a caught panic for [`ndslab_last_panic_message`].
pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Run `$body`, converting a panic into `$default`.
macro_rules! ffi_guard_or {
    ($default:expr, $body:block) => {{
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $default
            }
        }
    }};
}

/// Run a status-returning `$body`, converting a panic into `Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::NdslabStatus::Panicked as i32, $body)
    };
}

pub mod array;
mod block;
pub mod status;

pub use status::NdslabStatus;

/// Copy the last caught panic message into `buf`.
///
/// Returns the full message length in bytes, excluding the terminator. At
/// most `cap - 1` bytes are written, followed by a NUL. Pass a null `buf`
/// to query the length.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_last_panic_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        if !buf.is_null() && cap > 0 {
            let n = msg.len().min(cap - 1);
            // SAFETY: caller guarantees buf is valid for cap bytes.
            unsafe {
                std::ptr::copy_nonoverlapping(msg.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        i32::try_from(msg.len()).unwrap_or(i32::MAX)
    })
}
