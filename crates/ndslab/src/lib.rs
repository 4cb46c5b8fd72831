//! ndslab: fixed-shape N-dimensional arrays stored in one flat buffer.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the ndslab sub-crates. The C ABI lives in `ndslab-ffi` and is not
//! re-exported.
//!
//! # Quick start
//!
//! ```rust
//! use ndslab::prelude::*;
//!
//! // A 4x4 array of u16, row index (axis 0) fastest.
//! let mut grid = FlatArray::create(2, 2, &[4, 4]).unwrap();
//! for col in 0..4 {
//!     for row in 0..4 {
//!         grid.assign_val_at(2, &[row, col], row + 10 * col).unwrap();
//!     }
//! }
//!
//! // Rows 1..3 of column 2: a 1-D array of two elements.
//! let column = grid.slice(2, &[1, 3, 2, 2]).unwrap();
//! assert_eq!(column.shape(), &[2]);
//! assert_eq!(column.access_val(2, &[0]).unwrap(), 21);
//! assert_eq!(column.access_val(2, &[1]).unwrap(), 22);
//!
//! // Every slot owning its own heap copy of the seed.
//! let deep = NestedArray::fill_deep(&[3], 4, &[1, 2, 3, 4]).unwrap();
//! assert_eq!(deep.complexity(), 1);
//! deep.free();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ndslab-core` | Binary layout, shape arithmetic, config, errors |
//! | [`array`] | `ndslab-array` | Arrays, views, fill, access, slicing, nested ownership |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Binary layout, shape arithmetic, configuration and errors (`ndslab-core`).
pub use ndslab_core as types;

/// The array engine (`ndslab-array`).
///
/// [`array::FlatArray`] for owned arrays, [`array::ArrayRef`] and
/// [`array::ArrayMut`] for encoded bytes owned elsewhere, and
/// [`array::NestedArray`] for arrays whose slots own heap values.
pub use ndslab_array as array;

/// Common imports for typical ndslab usage.
///
/// ```rust
/// use ndslab::prelude::*;
/// ```
pub mod prelude {
    // Arrays and the operations on them
    pub use ndslab_array::{
        ArrayMut, ArrayRef, EncodedArray, EncodedArrayMut, FlatArray, NestedArray, Owned, SlotMut,
    };

    // Fill strategy selection
    pub use ndslab_array::fill::FillStrategy;

    // Configuration
    pub use ndslab_core::{ArrayConfig, ClampPolicy};

    // Errors
    pub use ndslab_core::{ArrayError, SliceError};
}
