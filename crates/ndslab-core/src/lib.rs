//! Core types for the ndslab array engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the binary layout of an encoded array, the column-major shape and
//! stride arithmetic, the engine configuration, and the error types
//! shared by every other crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod layout;
pub mod shape;

pub use config::{ArrayConfig, ClampPolicy};
pub use error::{ArrayError, SliceError};
pub use layout::{Header, WORD};
pub use shape::{col_major_strides, flat_offset, total_elements, unflatten, Index, Shape, Strides};
