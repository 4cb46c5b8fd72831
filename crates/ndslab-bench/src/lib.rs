//! Benchmark profiles for the ndslab array engine.
//!
//! - [`FILL_ELEMENT_SIZES`]: element sizes straddling the hybrid fill
//!   threshold, so the crossover can be read off the results.
//! - [`reference_shape`] / [`stress_shape`]: 3-D shapes for slicing.
//! - [`slice_cases`]: named range sets exercising the chunked and
//!   element-wise copy paths.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ndslab_core::ArrayConfig;

/// Element sizes in bytes, below and above the hybrid threshold.
pub const FILL_ELEMENT_SIZES: [usize; 6] = [
    1,
    8,
    64,
    ArrayConfig::DEFAULT_HYBRID_THRESHOLD,
    2 * ArrayConfig::DEFAULT_HYBRID_THRESHOLD,
    1024,
];

/// Payload size in bytes targeted by the fill benchmarks.
pub const FILL_PAYLOAD_BYTES: usize = 1 << 20;

/// 1-D shape holding roughly [`FILL_PAYLOAD_BYTES`] of `element_size` slots.
pub fn fill_shape(element_size: usize) -> [usize; 1] {
    [(FILL_PAYLOAD_BYTES / element_size.max(1)).max(1)]
}

/// 64x64x64 cube (262K elements).
pub fn reference_shape() -> [usize; 3] {
    [64, 64, 64]
}

/// 128x128x64 box (1M elements).
pub fn stress_shape() -> [usize; 3] {
    [128, 128, 64]
}

/// A named slice of a 3-D source.
#[derive(Clone, Debug)]
pub struct SliceCase {
    /// Benchmark id.
    pub name: &'static str,
    /// One `(from, to)` pair per axis.
    pub ranges: [usize; 6],
}

/// Range sets over `shape`: a contiguous-chunk box, a fixed first axis
/// (element-wise copies) and a 2-D plane.
pub fn slice_cases(shape: [usize; 3]) -> Vec<SliceCase> {
    let [a, b, c] = shape;
    vec![
        SliceCase {
            name: "inner_box",
            ranges: [a / 4, 3 * a / 4, b / 4, 3 * b / 4, c / 4, 3 * c / 4],
        },
        SliceCase {
            name: "fixed_axis0",
            ranges: [a / 2, a / 2, 0, b, 0, c],
        },
        SliceCase {
            name: "plane_axis2",
            ranges: [0, a, 0, b, c / 2, c / 2],
        },
    ]
}
