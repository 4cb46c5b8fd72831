//! Shape and stride arithmetic.
//!
//! Arrays are laid out with axis 0 varying fastest:
//! `stride[0] = 1`, `stride[i] = stride[i - 1] * shape[i - 1]`.
//! Every address computation in the workspace goes through this module.

use smallvec::SmallVec;

use crate::error::ArrayError;

/// Per-axis lengths. Inline for up to four axes.
pub type Shape = SmallVec<[usize; 4]>;

/// Per-axis element strides, in elements rather than bytes.
pub type Strides = SmallVec<[usize; 4]>;

/// A multi-index with one entry per axis.
pub type Index = SmallVec<[usize; 4]>;

/// Number of elements described by `shape`.
///
/// An empty axis yields zero elements. Returns `SizeOverflow` if the
/// product does not fit in `usize`.
pub fn total_elements(shape: &[usize]) -> Result<usize, ArrayError> {
    shape.iter().try_fold(1usize, |acc, &len| {
        acc.checked_mul(len).ok_or(ArrayError::SizeOverflow)
    })
}

/// Column-major strides for `shape`.
///
/// Strides are computed with wrapping arithmetic; callers only use them
/// for shapes whose element count was already checked by [`total_elements`].
pub fn col_major_strides(shape: &[usize]) -> Strides {
    let mut strides = Strides::with_capacity(shape.len());
    let mut stride = 1usize;
    for &len in shape {
        strides.push(stride);
        stride = stride.wrapping_mul(len);
    }
    strides
}

/// Flat element offset of `indices` within an array of `shape`.
///
/// Every index is bounds-checked; no offset is produced for an
/// out-of-range multi-index.
pub fn flat_offset(shape: &[usize], indices: &[usize]) -> Result<usize, ArrayError> {
    if indices.len() != shape.len() {
        return Err(ArrayError::IndexCount {
            expected: shape.len(),
            got: indices.len(),
        });
    }
    let mut offset = 0usize;
    let mut stride = 1usize;
    for (axis, (&index, &len)) in indices.iter().zip(shape).enumerate() {
        if index >= len {
            return Err(ArrayError::IndexOutOfBounds { axis, index, len });
        }
        offset += index * stride;
        stride *= len;
    }
    Ok(offset)
}

/// Multi-index of the element at flat `offset`. Inverse of [`flat_offset`].
pub fn unflatten(shape: &[usize], mut offset: usize) -> Index {
    let mut index = Index::with_capacity(shape.len());
    for &len in shape {
        if len == 0 {
            index.push(0);
            continue;
        }
        index.push(offset % len);
        offset /= len;
    }
    index
}
