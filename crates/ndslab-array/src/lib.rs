//! Flat-buffer N-dimensional arrays.
//!
//! An array is a single allocation holding its dimensionality, its shape
//! and its payload (see [`ndslab_core::layout`]). The element size is never
//! stored: every operation takes it from the caller and checks it against
//! the payload length.
//!
//! # Architecture
//!
//! ```text
//! EncodedArray / EncodedArrayMut (provided operations)
//! ├── FlatArray      owned Box<[u8]>, one allocation per array
//! ├── ArrayRef<'a>   borrowed encoded bytes (interop, FFI)
//! └── ArrayMut<'a>   mutably borrowed encoded bytes
//!
//! fill    sequential | exponential | hybrid      (payload bytes)
//! access  multi-index -> element bytes           (column-major)
//! slice   1-D linear copy | N-D chunked odometer copy
//! nested  Owned = Value | Array | Nested         (typed ownership depth)
//! ```
//!
//! This crate contains no `unsafe` code. Raw-pointer interop lives in
//! `ndslab-ffi`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod access;
pub mod fill;
pub mod flat;
pub mod nested;
pub mod slice;
pub mod traits;
pub mod view;

pub use flat::FlatArray;
pub use nested::{NestedArray, Owned, SlotMut};
pub use slice::SlicePlan;
pub use traits::{EncodedArray, EncodedArrayMut};
pub use view::{ArrayMut, ArrayRef};

pub use ndslab_core::{ArrayConfig, ArrayError, ClampPolicy, SliceError};
