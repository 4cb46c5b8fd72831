//! Test utilities for ndslab development.
//!
//! - [`CountingAllocator`]: a global allocator that counts live heap
//!   blocks per thread, for proving that deep deallocation neither leaks
//!   nor double-frees.
//! - [`fixtures`]: arrays whose every element encodes its own position.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod counting;
pub mod fixtures;

pub use counting::{live_allocations, AllocSnapshot, CountingAllocator};
pub use fixtures::{iota_array, iota_bytes, iota_element, iota_offset};
