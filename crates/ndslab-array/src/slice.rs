//! Slicing: independent copies of a sub-region.
//!
//! Two algorithms:
//!
//! - **1-D** ([`resolve_1d`]): one bounds-checked linear copy. `to == 0`
//!   means "end of source"; an end past the source and a start past the end
//!   are clamped according to [`ClampPolicy`]; empty and negative ranges are
//!   refused.
//! - **N-D** ([`SlicePlan`]): each axis is either a fixed index (`from == to`,
//!   dropped from the result) or a range of at least two elements (kept).
//!   Elements are copied in result order by an odometer over the source
//!   indices. When axis 0 is a kept range it is copied as one contiguous
//!   chunk per step instead of element by element.

use std::ops::Range;

use smallvec::SmallVec;

use ndslab_core::{col_major_strides, ClampPolicy, Header, Index, Shape, SliceError, Strides};

/// Resolve `from..to` against a 1-D source of length `len`.
///
/// Returns the element range to copy. The returned range is never empty.
pub fn resolve_1d(
    len: usize,
    from: usize,
    to: usize,
    policy: ClampPolicy,
) -> Result<Range<usize>, SliceError> {
    let mut end = if to == 0 { len } else { to };
    if end > len {
        match policy {
            ClampPolicy::Strict => {
                return Err(SliceError::RangeOutOfBounds { axis: 0, to, len });
            }
            ClampPolicy::Verbose => eprintln!("{}", end_clamp_note(end, len)),
            ClampPolicy::Silent => {}
        }
        end = len;
    }
    if from == end {
        return Err(SliceError::EmptyRange { at: from });
    }
    let mut start = from;
    if from > end {
        if end == 0 {
            return Err(SliceError::NegativeRange { from });
        }
        match policy {
            ClampPolicy::Strict => {
                return Err(SliceError::ReversedRange {
                    axis: 0,
                    from,
                    to: end,
                });
            }
            ClampPolicy::Verbose => eprintln!("{}", start_clamp_note(from, end)),
            ClampPolicy::Silent => {}
        }
        start = end - 1;
    }
    Ok(start..end)
}

fn end_clamp_note(end: usize, len: usize) -> String {
    format!("ndslab: 1-D slice end {end} past length {len}, clamped to {len}")
}

fn start_clamp_note(from: usize, end: usize) -> String {
    format!(
        "ndslab: 1-D slice start {from} past end {end}, clamped to {}",
        end - 1
    )
}

/// Copy `range` of a 1-D payload into `dst`, which must hold exactly
/// `range.len()` elements.
pub fn copy_1d(src: &[u8], dst: &mut [u8], element_size: usize, range: Range<usize>) {
    dst.copy_from_slice(&src[range.start * element_size..range.end * element_size]);
}

/// Per-axis selection of an N-D slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisSelect {
    /// Single index; the axis is dropped from the result.
    Fixed(usize),
    /// Half-open range; the axis is kept.
    Range { from: usize, to: usize },
}

impl AxisSelect {
    fn start(self) -> usize {
        match self {
            Self::Fixed(index) => index,
            Self::Range { from, .. } => from,
        }
    }
}

/// Validated N-D slice of a source shape.
///
/// Built once from the source header and the `(from, to)` pairs, then
/// used to size the result and to copy the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlicePlan {
    axes: SmallVec<[AxisSelect; 4]>,
    src_strides: Strides,
    result: Header,
    chunk: usize,
}

impl SlicePlan {
    /// Validate `ranges` against `source`.
    ///
    /// `ranges` holds `2 * dimensionality` bounds, one `(from, to)` pair per
    /// axis. The whole plan is refused if any axis is invalid.
    pub fn new(source: &Header, ranges: &[usize]) -> Result<Self, SliceError> {
        let shape = source.shape();
        if ranges.len() != 2 * shape.len() {
            return Err(SliceError::RangeCount {
                expected: 2 * shape.len(),
                got: ranges.len(),
            });
        }

        let mut axes = SmallVec::with_capacity(shape.len());
        let mut kept = Shape::new();
        for (axis, (pair, &len)) in ranges.chunks_exact(2).zip(shape).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            if from == to {
                if from >= len {
                    return Err(SliceError::IndexOutOfBounds {
                        axis,
                        index: from,
                        len,
                    });
                }
                axes.push(AxisSelect::Fixed(from));
                continue;
            }
            if from > to {
                return Err(SliceError::ReversedRange { axis, from, to });
            }
            if to > len {
                return Err(SliceError::RangeOutOfBounds { axis, to, len });
            }
            if to - from < 2 {
                return Err(SliceError::RangeTooShort { axis, from, to });
            }
            axes.push(AxisSelect::Range { from, to });
            kept.push(to - from);
        }
        if kept.is_empty() {
            return Err(SliceError::NoRangedAxis);
        }

        let chunk = match axes[0] {
            AxisSelect::Range { from, to } => to - from,
            AxisSelect::Fixed(_) => 1,
        };
        Ok(Self {
            axes,
            src_strides: col_major_strides(shape),
            result: Header::new(&kept)?,
            chunk,
        })
    }

    /// Header of the array this plan produces.
    pub fn result(&self) -> &Header {
        &self.result
    }

    /// Elements copied per contiguous run.
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    /// The source range of a linear plan.
    pub fn linear_range(&self) -> Option<Range<usize>> {
        match self.axes.as_slice() {
            [AxisSelect::Range { from, to }] => Some(*from..*to),
            _ => None,
        }
    }

    /// Copy the selected elements of `src` into `dst`.
    ///
    /// `src` is the source payload and `dst` the result payload, both
    /// already checked for `element_size`.
    pub fn copy(&self, src: &[u8], dst: &mut [u8], element_size: usize) {
        let chunk_bytes = self.chunk * element_size;
        if chunk_bytes == 0 {
            return;
        }
        let first_axis_chunked = matches!(self.axes[0], AxisSelect::Range { .. });
        let mut cursor: Index = self.axes.iter().map(|a| a.start()).collect();

        for (step, run) in dst.chunks_exact_mut(chunk_bytes).enumerate() {
            if step > 0 {
                self.advance(&mut cursor, first_axis_chunked);
            }
            let offset: usize = cursor
                .iter()
                .zip(&self.src_strides)
                .map(|(index, stride)| index * stride)
                .sum();
            let start = offset * element_size;
            run.copy_from_slice(&src[start..start + chunk_bytes]);
        }
    }

    /// Step the odometer to the next run, lowest ranged axis fastest so
    /// runs land in column-major result order.
    fn advance(&self, cursor: &mut Index, skip_first: bool) {
        let first = usize::from(skip_first);
        for (axis, select) in self.axes.iter().enumerate().skip(first) {
            if let AxisSelect::Range { from, to } = *select {
                cursor[axis] += 1;
                if cursor[axis] < to {
                    return;
                }
                cursor[axis] = from;
            }
        }
    }
}

/// Error for an array that must be 1-D.
pub(crate) fn require_1d(header: &Header) -> Result<usize, SliceError> {
    match header.shape() {
        [len] => Ok(*len),
        _ => Err(SliceError::NotOneDimensional {
            dimensionality: header.dimensionality(),
        }),
    }
}
