//! Error types for array construction, access and slicing.
//!
//! Every reported failure leaves its inputs untouched. Allocation failure
//! is not represented here: it aborts the process.

use thiserror::Error;

/// Errors from construction, layout decoding, element access and assignment.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// An array must have at least one axis.
    #[error("dimensionality must be at least 1")]
    ZeroDimensionality,

    /// The shape does not have one entry per axis.
    #[error("shape has {got} entries, expected {expected}")]
    ShapeLength {
        /// Declared dimensionality.
        expected: usize,
        /// Number of shape entries supplied.
        got: usize,
    },

    /// A multi-index does not have one entry per axis.
    #[error("index has {got} entries, array has {expected} axes")]
    IndexCount {
        /// Dimensionality of the array.
        expected: usize,
        /// Number of indices supplied.
        got: usize,
    },

    /// An index is past the end of its axis.
    #[error("index {index} out of bounds for axis {axis} of length {len}")]
    IndexOutOfBounds {
        /// Offending axis.
        axis: usize,
        /// Index supplied for that axis.
        index: usize,
        /// Length of that axis.
        len: usize,
    },

    /// The payload was not built for this element size.
    #[error(
        "element size {element_size} does not match payload: {total_elements} elements in {payload_bytes} bytes"
    )]
    ElementSizeMismatch {
        /// Element size passed by the caller.
        element_size: usize,
        /// Number of slots described by the shape.
        total_elements: usize,
        /// Actual payload length in bytes.
        payload_bytes: usize,
    },

    /// A seed or assigned value holds fewer bytes than one element.
    #[error("value holds {got} bytes, element needs {needed}")]
    ValueTooShort {
        /// Element size in bytes.
        needed: usize,
        /// Bytes supplied.
        got: usize,
    },

    /// The element does not fit the machine-word value container.
    #[error("element size {element_size} exceeds the {max}-byte value container")]
    ValueTooWide {
        /// Element size in bytes.
        element_size: usize,
        /// Width of the value container.
        max: usize,
    },

    /// The buffer ends before its header, shape or payload does.
    #[error("encoded array truncated: need {needed} bytes, have {got}")]
    Truncated {
        /// Bytes required by the header.
        needed: usize,
        /// Bytes available.
        got: usize,
    },

    /// Element count or byte size does not fit in `usize`.
    #[error("array size overflows usize")]
    SizeOverflow,

    /// Slots of a nested array own structures of different depth.
    #[error("slot owns depth {got}, siblings own depth {expected}")]
    NonUniformDepth {
        /// Depth of the other slots.
        expected: usize,
        /// Depth of the offending slot.
        got: usize,
    },

    /// Number of slots supplied does not match the shape.
    #[error("{got} slots supplied for a shape of {expected} elements")]
    SlotCount {
        /// Elements described by the shape.
        expected: usize,
        /// Slots supplied.
        got: usize,
    },
}

/// Errors from the 1-D and N-D slicers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SliceError {
    /// `ranges` must hold one `(from, to)` pair per axis.
    #[error("{got} range bounds supplied, expected {expected}")]
    RangeCount {
        /// `2 * dimensionality`.
        expected: usize,
        /// Bounds supplied.
        got: usize,
    },

    /// A fixed index is past the end of its axis.
    #[error("fixed index {index} out of bounds for axis {axis} of length {len}")]
    IndexOutOfBounds {
        /// Offending axis.
        axis: usize,
        /// Fixed index.
        index: usize,
        /// Axis length.
        len: usize,
    },

    /// A range ends past the end of its axis.
    #[error("range end {to} out of bounds for axis {axis} of length {len}")]
    RangeOutOfBounds {
        /// Offending axis.
        axis: usize,
        /// Exclusive end of the range.
        to: usize,
        /// Axis length.
        len: usize,
    },

    /// A range covering a single element; it must be written as a fixed index.
    #[error("range {from}..{to} on axis {axis} holds one element; use a fixed index")]
    RangeTooShort {
        /// Offending axis.
        axis: usize,
        /// Start of the range.
        from: usize,
        /// End of the range.
        to: usize,
    },

    /// A range whose start lies after its end.
    #[error("range {from}..{to} on axis {axis} is reversed")]
    ReversedRange {
        /// Offending axis.
        axis: usize,
        /// Start of the range.
        from: usize,
        /// End of the range.
        to: usize,
    },

    /// Every axis was fixed, which would select a single element.
    #[error("slice keeps no ranged axis")]
    NoRangedAxis,

    /// A 1-D range that selects nothing.
    #[error("empty range {at}..{at}")]
    EmptyRange {
        /// Both bounds of the range.
        at: usize,
    },

    /// A 1-D range that would need a start below zero.
    #[error("range starting at {from} ends at 0 and cannot be clamped")]
    NegativeRange {
        /// Start of the range.
        from: usize,
    },

    /// The 1-D slicer was given an array with more axes.
    #[error("1-D slice of a {dimensionality}-D array")]
    NotOneDimensional {
        /// Dimensionality of the source.
        dimensionality: usize,
    },

    /// The source or result array could not be handled.
    #[error(transparent)]
    Array(#[from] ArrayError),
}
