//! Binary layout of an encoded array.
//!
//! An array is one contiguous byte region:
//!
//! ```text
//! offset 0            dimensionality              (one native word)
//! offset W            shape[0] .. shape[d-1]      (d native words)
//! offset W + d*W      payload                     (total_elements * slot_size bytes)
//! ```
//!
//! `W` is [`WORD`]. Words are stored in native byte order. Nothing here
//! assumes the region is aligned: words and elements are always moved with
//! byte copies, never through typed references.

use crate::error::ArrayError;
use crate::shape::{total_elements, Shape};

/// Width in bytes of the native unsigned word used for lengths.
pub const WORD: usize = std::mem::size_of::<usize>();

/// Byte offset of the payload for an array with `dimensionality` axes.
pub const fn payload_offset(dimensionality: usize) -> usize {
    WORD + dimensionality * WORD
}

/// Read the native word starting at byte `at`.
///
/// Returns `None` if fewer than [`WORD`] bytes remain.
pub fn read_word(bytes: &[u8], at: usize) -> Option<usize> {
    let end = at.checked_add(WORD)?;
    let raw: [u8; WORD] = bytes.get(at..end)?.try_into().ok()?;
    Some(usize::from_ne_bytes(raw))
}

/// Write `value` as a native word starting at byte `at`.
///
/// # Panics
///
/// Panics if fewer than [`WORD`] bytes remain after `at`.
pub fn write_word(bytes: &mut [u8], at: usize, value: usize) {
    bytes[at..at + WORD].copy_from_slice(&value.to_ne_bytes());
}

/// Decoded header of an encoded array: its shape and element count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    shape: Shape,
    total_elements: usize,
}

impl Header {
    /// Build a header for `shape`, which must have at least one axis.
    pub fn new(shape: &[usize]) -> Result<Self, ArrayError> {
        if shape.is_empty() {
            return Err(ArrayError::ZeroDimensionality);
        }
        Ok(Self {
            total_elements: total_elements(shape)?,
            shape: Shape::from_slice(shape),
        })
    }

    /// Decode the header at the start of `bytes`.
    ///
    /// Only the header and shape are validated; the payload length depends
    /// on the caller's element size and is checked by [`check_payload`](Self::check_payload).
    pub fn decode(bytes: &[u8]) -> Result<Self, ArrayError> {
        let dimensionality = read_word(bytes, 0).ok_or(ArrayError::Truncated {
            needed: WORD,
            got: bytes.len(),
        })?;
        if dimensionality == 0 {
            return Err(ArrayError::ZeroDimensionality);
        }
        let needed = dimensionality
            .checked_add(1)
            .and_then(|words| words.checked_mul(WORD))
            .ok_or(ArrayError::SizeOverflow)?;
        if bytes.len() < needed {
            return Err(ArrayError::Truncated {
                needed,
                got: bytes.len(),
            });
        }
        let shape: Shape = (0..dimensionality)
            .map(|axis| read_word(bytes, WORD + axis * WORD).unwrap_or_default())
            .collect();
        Self::new(&shape)
    }

    /// Number of axes.
    pub fn dimensionality(&self) -> usize {
        self.shape.len()
    }

    /// Per-axis lengths, axis 0 first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Product of all axis lengths.
    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    /// Byte offset of the payload.
    pub fn payload_offset(&self) -> usize {
        payload_offset(self.dimensionality())
    }

    /// Total encoded length for slots of `slot_size` bytes.
    pub fn encoded_len(&self, slot_size: usize) -> Result<usize, ArrayError> {
        self.total_elements
            .checked_mul(slot_size)
            .and_then(|payload| payload.checked_add(self.payload_offset()))
            .ok_or(ArrayError::SizeOverflow)
    }

    /// Write the dimensionality and shape words into the start of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than [`payload_offset`](Self::payload_offset).
    pub fn encode(&self, bytes: &mut [u8]) {
        write_word(bytes, 0, self.dimensionality());
        for (axis, &len) in self.shape.iter().enumerate() {
            write_word(bytes, WORD + axis * WORD, len);
        }
    }

    /// Check that `payload_bytes` holds exactly `total_elements` slots of
    /// `element_size` bytes.
    pub fn check_payload(
        &self,
        payload_bytes: usize,
        element_size: usize,
    ) -> Result<(), ArrayError> {
        let expected = self.total_elements.checked_mul(element_size);
        if expected == Some(payload_bytes) {
            return Ok(());
        }
        Err(ArrayError::ElementSizeMismatch {
            element_size,
            total_elements: self.total_elements,
            payload_bytes,
        })
    }
}
