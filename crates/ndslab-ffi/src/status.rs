//! C-compatible status codes.
//!
//! [`NdslabStatus`] is a `repr(i32)` enum returned by every `ndslab_*`
//! function. Conversions from [`ArrayError`] and [`SliceError`] are
//! provided.

use ndslab_core::{ArrayError, SliceError};

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NdslabStatus {
    /// Success.
    Ok = 0,
    /// A pointer is null, or a dimensionality or shape is invalid.
    InvalidArgument = -1,
    /// An index is past the end of its axis, or has the wrong arity.
    IndexOutOfBounds = -2,
    /// The payload was not built for the supplied element size.
    ElementSizeMismatch = -3,
    /// A slice range is invalid.
    InvalidRange = -4,
    /// The element does not fit the machine-word value container.
    ValueTooWide = -5,
    /// The buffer does not decode as an array.
    InvalidEncoding = -6,
    /// Element count or byte size overflows `size_t`.
    SizeOverflow = -7,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ArrayError> for NdslabStatus {
    fn from(e: &ArrayError) -> Self {
        match e {
            ArrayError::ZeroDimensionality
            | ArrayError::ShapeLength { .. }
            | ArrayError::ValueTooShort { .. }
            | ArrayError::NonUniformDepth { .. }
            | ArrayError::SlotCount { .. } => NdslabStatus::InvalidArgument,
            ArrayError::IndexCount { .. } | ArrayError::IndexOutOfBounds { .. } => {
                NdslabStatus::IndexOutOfBounds
            }
            ArrayError::ElementSizeMismatch { .. } => NdslabStatus::ElementSizeMismatch,
            ArrayError::ValueTooWide { .. } => NdslabStatus::ValueTooWide,
            ArrayError::Truncated { .. } => NdslabStatus::InvalidEncoding,
            ArrayError::SizeOverflow => NdslabStatus::SizeOverflow,
        }
    }
}

impl From<&SliceError> for NdslabStatus {
    fn from(e: &SliceError) -> Self {
        match e {
            SliceError::Array(inner) => NdslabStatus::from(inner),
            SliceError::NotOneDimensional { .. } => NdslabStatus::InvalidArgument,
            _ => NdslabStatus::InvalidRange,
        }
    }
}

impl From<ArrayError> for NdslabStatus {
    fn from(e: ArrayError) -> Self {
        NdslabStatus::from(&e)
    }
}

impl From<SliceError> for NdslabStatus {
    fn from(e: SliceError) -> Self {
        NdslabStatus::from(&e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(NdslabStatus::Ok as i32, 0);
        assert_eq!(NdslabStatus::InvalidArgument as i32, -1);
        assert_eq!(NdslabStatus::IndexOutOfBounds as i32, -2);
        assert_eq!(NdslabStatus::ElementSizeMismatch as i32, -3);
        assert_eq!(NdslabStatus::InvalidRange as i32, -4);
        assert_eq!(NdslabStatus::ValueTooWide as i32, -5);
        assert_eq!(NdslabStatus::InvalidEncoding as i32, -6);
        assert_eq!(NdslabStatus::SizeOverflow as i32, -7);
        assert_eq!(NdslabStatus::Panicked as i32, -128);
    }

    #[test]
    fn array_error_to_status() {
        assert_eq!(
            NdslabStatus::from(&ArrayError::ZeroDimensionality),
            NdslabStatus::InvalidArgument
        );
        assert_eq!(
            NdslabStatus::from(&ArrayError::IndexOutOfBounds {
                axis: 0,
                index: 3,
                len: 3
            }),
            NdslabStatus::IndexOutOfBounds
        );
        assert_eq!(
            NdslabStatus::from(&ArrayError::Truncated { needed: 8, got: 0 }),
            NdslabStatus::InvalidEncoding
        );
        assert_eq!(
            NdslabStatus::from(&ArrayError::SizeOverflow),
            NdslabStatus::SizeOverflow
        );
    }

    #[test]
    fn slice_error_to_status() {
        assert_eq!(
            NdslabStatus::from(&SliceError::NoRangedAxis),
            NdslabStatus::InvalidRange
        );
        assert_eq!(
            NdslabStatus::from(&SliceError::NotOneDimensional { dimensionality: 2 }),
            NdslabStatus::InvalidArgument
        );
        assert_eq!(
            NdslabStatus::from(&SliceError::Array(ArrayError::ElementSizeMismatch {
                element_size: 4,
                total_elements: 3,
                payload_bytes: 6
            })),
            NdslabStatus::ElementSizeMismatch
        );
    }
}
