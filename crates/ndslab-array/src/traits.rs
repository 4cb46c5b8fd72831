//! Operations shared by every encoded array representation.
//!
//! [`EncodedArray`] and [`EncodedArrayMut`] only require access to the
//! decoded header and the encoded bytes. Everything else (element access,
//! the fill strategies, both slicers) is provided on top of those two
//! methods, so owned arrays, borrowed views and raw FFI buffers share one
//! implementation.

use ndslab_core::{ArrayConfig, ArrayError, Header, SliceError, WORD};

use crate::access;
use crate::fill::{self, FillStrategy};
use crate::flat::FlatArray;
use crate::slice::{self, SlicePlan};

/// Read access to an encoded array.
pub trait EncodedArray {
    /// The decoded header.
    fn header(&self) -> &Header;

    /// The full encoded buffer: header, shape and payload.
    fn encoded(&self) -> &[u8];

    /// Number of axes.
    fn dimensionality(&self) -> usize {
        self.header().dimensionality()
    }

    /// Per-axis lengths, axis 0 first.
    fn shape(&self) -> &[usize] {
        self.header().shape()
    }

    /// Product of all axis lengths.
    fn total_elements(&self) -> usize {
        self.header().total_elements()
    }

    /// Payload bytes, unchecked against any element size.
    fn payload(&self) -> &[u8] {
        &self.encoded()[self.header().payload_offset()..]
    }

    /// Payload bytes, checked to hold `total_elements` slots of `element_size` bytes.
    fn elements(&self, element_size: usize) -> Result<&[u8], ArrayError> {
        let payload = self.payload();
        self.header().check_payload(payload.len(), element_size)?;
        Ok(payload)
    }

    /// Bytes of the element at `indices`.
    fn access(&self, element_size: usize, indices: &[usize]) -> Result<&[u8], ArrayError> {
        let payload = self.elements(element_size)?;
        access::element(self.shape(), payload, element_size, indices)
    }

    /// The element at `indices`, packed into a machine word.
    ///
    /// `element_size` must not exceed [`WORD`].
    fn access_val(&self, element_size: usize, indices: &[usize]) -> Result<usize, ArrayError> {
        if element_size > WORD {
            return Err(ArrayError::ValueTooWide {
                element_size,
                max: WORD,
            });
        }
        access::pack_word(self.access(element_size, indices)?)
    }

    /// Copy `from..to` of a 1-D array into a new array.
    ///
    /// `to == 0` means the end of the source, an end past the source is
    /// clamped, and a start past the end is clamped to the last element.
    ///
    /// # Panics
    ///
    /// Panics if the resolved range is empty (`from == to`) or would start
    /// below zero, if the array is not 1-D, or if `element_size` does not
    /// match the payload. Use [`try_slice_1d`](Self::try_slice_1d) to get
    /// these as errors instead.
    fn slice_1d(&self, element_size: usize, from: usize, to: usize) -> FlatArray {
        match self.try_slice_1d(element_size, from, to) {
            Ok(array) => array,
            Err(e) => panic!("ndslab: fatal 1-D slice {from}..{to}: {e}"),
        }
    }

    /// Copy `from..to` of a 1-D array, reporting every refusal as an error.
    fn try_slice_1d(
        &self,
        element_size: usize,
        from: usize,
        to: usize,
    ) -> Result<FlatArray, SliceError> {
        self.try_slice_1d_with(&ArrayConfig::default(), element_size, from, to)
    }

    /// [`try_slice_1d`](Self::try_slice_1d) with an explicit clamp policy.
    fn try_slice_1d_with(
        &self,
        config: &ArrayConfig,
        element_size: usize,
        from: usize,
        to: usize,
    ) -> Result<FlatArray, SliceError> {
        let len = slice::require_1d(self.header())?;
        let src = self.elements(element_size)?;
        let range = slice::resolve_1d(len, from, to, config.clamp_policy)?;
        let mut out = FlatArray::new(&[range.len()], element_size)?;
        slice::copy_1d(src, out.elements_mut(element_size)?, element_size, range);
        Ok(out)
    }

    /// Copy a sub-region into a new array.
    ///
    /// `ranges` holds one `(from, to)` pair per axis. `from == to` fixes the
    /// axis at that index and drops it from the result; otherwise the axis is
    /// kept with length `to - from`, which must be at least 2. At least one
    /// axis must be kept. Nothing is allocated if any axis is invalid.
    fn slice(&self, element_size: usize, ranges: &[usize]) -> Result<FlatArray, SliceError> {
        let plan = SlicePlan::new(self.header(), ranges)?;
        if let Some(range) = plan.linear_range() {
            return self.try_slice_1d(element_size, range.start, range.end);
        }
        let src = self.elements(element_size)?;
        let mut out = FlatArray::from_header(plan.result().clone(), element_size)?;
        plan.copy(src, out.elements_mut(element_size)?, element_size);
        Ok(out)
    }
}

/// Write access to an encoded array.
pub trait EncodedArrayMut: EncodedArray {
    /// The full encoded buffer, mutably.
    fn encoded_mut(&mut self) -> &mut [u8];

    /// Payload bytes, checked against `element_size`, mutably.
    fn elements_mut(&mut self, element_size: usize) -> Result<&mut [u8], ArrayError> {
        let offset = self.header().payload_offset();
        let payload_len = self.encoded().len() - offset;
        self.header().check_payload(payload_len, element_size)?;
        Ok(&mut self.encoded_mut()[offset..])
    }

    /// Fill every slot with the first `element_size` bytes of `value`.
    fn fill_with(
        &mut self,
        strategy: FillStrategy,
        config: &ArrayConfig,
        element_size: usize,
        value: &[u8],
    ) -> Result<(), ArrayError> {
        let payload = self.elements_mut(element_size)?;
        fill::fill(strategy, config, payload, element_size, value)
    }

    /// Sequential fill.
    fn fill_seq(&mut self, element_size: usize, value: &[u8]) -> Result<(), ArrayError> {
        fill::sequential(self.elements_mut(element_size)?, element_size, value)
    }

    /// Exponential (doubling) fill.
    fn fill_exp(&mut self, element_size: usize, value: &[u8]) -> Result<(), ArrayError> {
        fill::exponential(self.elements_mut(element_size)?, element_size, value)
    }

    /// Hybrid fill with the default threshold.
    fn fill_inline(&mut self, element_size: usize, value: &[u8]) -> Result<(), ArrayError> {
        self.fill_with(
            FillStrategy::Hybrid,
            &ArrayConfig::default(),
            element_size,
            value,
        )
    }

    /// Hybrid fill from the machine-word value container.
    fn fill_val(&mut self, element_size: usize, value: usize) -> Result<(), ArrayError> {
        let seed = fill::word_seed(value, element_size)?;
        self.fill_inline(element_size, &seed)
    }

    /// Mutable bytes of the element at `indices`.
    fn access_mut(
        &mut self,
        element_size: usize,
        indices: &[usize],
    ) -> Result<&mut [u8], ArrayError> {
        let header = self.header().clone();
        let payload = self.elements_mut(element_size)?;
        access::element_mut(header.shape(), payload, element_size, indices)
    }

    /// Overwrite the element at `indices` with the first `element_size` bytes of `value`.
    fn assign_at(
        &mut self,
        element_size: usize,
        indices: &[usize],
        value: &[u8],
    ) -> Result<(), ArrayError> {
        if value.len() < element_size {
            return Err(ArrayError::ValueTooShort {
                needed: element_size,
                got: value.len(),
            });
        }
        access::store(self.access_mut(element_size, indices)?, value)
    }

    /// Overwrite the element at `indices` from the machine-word value container.
    fn assign_val_at(
        &mut self,
        element_size: usize,
        indices: &[usize],
        value: usize,
    ) -> Result<(), ArrayError> {
        access::store_word(self.access_mut(element_size, indices)?, value)
    }
}
