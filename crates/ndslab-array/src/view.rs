//! Borrowed views over encoded bytes.
//!
//! Views let code that did not build an array (a foreign producer, a
//! memory-mapped region, an FFI caller) use the array operations on its
//! bytes in place. The header is decoded and validated once, on
//! construction.

use ndslab_core::{ArrayError, Header};

use crate::traits::{EncodedArray, EncodedArrayMut};

/// Read-only view over an encoded array.
#[derive(Clone, Debug)]
pub struct ArrayRef<'a> {
    header: Header,
    bytes: &'a [u8],
}

impl<'a> ArrayRef<'a> {
    /// Decode the header at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ArrayError> {
        Ok(Self {
            header: Header::decode(bytes)?,
            bytes,
        })
    }

    /// Wrap bytes whose header is already decoded.
    pub(crate) fn from_parts(header: Header, bytes: &'a [u8]) -> Self {
        Self { header, bytes }
    }

    /// The underlying bytes, with the view's lifetime.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl EncodedArray for ArrayRef<'_> {
    fn header(&self) -> &Header {
        &self.header
    }

    fn encoded(&self) -> &[u8] {
        self.bytes
    }
}

/// Mutable view over an encoded array.
#[derive(Debug)]
pub struct ArrayMut<'a> {
    header: Header,
    bytes: &'a mut [u8],
}

impl<'a> ArrayMut<'a> {
    /// Decode the header at the start of `bytes`.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self, ArrayError> {
        Ok(Self {
            header: Header::decode(bytes)?,
            bytes,
        })
    }

    /// Wrap bytes whose header is already decoded.
    pub(crate) fn from_parts(header: Header, bytes: &'a mut [u8]) -> Self {
        Self { header, bytes }
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> ArrayRef<'_> {
        ArrayRef {
            header: self.header.clone(),
            bytes: self.bytes,
        }
    }
}

impl EncodedArray for ArrayMut<'_> {
    fn header(&self) -> &Header {
        &self.header
    }

    fn encoded(&self) -> &[u8] {
        self.bytes
    }
}

impl EncodedArrayMut for ArrayMut<'_> {
    fn encoded_mut(&mut self) -> &mut [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndslab_core::layout::write_word;
    use ndslab_core::WORD;

    /// Hand-encode a 1-D array of `len` elements of `element_size` bytes,
    /// as a foreign producer would. Payload byte `i` holds `i`.
    fn foreign_1d(len: usize, element_size: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; 2 * WORD + len * element_size];
        write_word(&mut bytes, 0, 1);
        write_word(&mut bytes, WORD, len);
        for (i, b) in bytes[2 * WORD..].iter_mut().enumerate() {
            *b = i as u8;
        }
        bytes
    }

    #[test]
    fn view_reads_foreign_encoding() {
        let bytes = foreign_1d(6, 1);
        let view = ArrayRef::new(&bytes).unwrap();
        assert_eq!(view.dimensionality(), 1);
        assert_eq!(view.shape(), &[6]);
        assert_eq!(view.access(1, &[4]).unwrap(), &[4]);
    }

    #[test]
    fn view_rejects_wrong_element_size() {
        let bytes = foreign_1d(6, 1);
        let view = ArrayRef::new(&bytes).unwrap();
        assert!(matches!(
            view.access(4, &[0]),
            Err(ArrayError::ElementSizeMismatch { .. })
        ));
    }

    #[test]
    fn mutable_view_writes_in_place() {
        let mut bytes = foreign_1d(2, 2);
        {
            let mut view = ArrayMut::new(&mut bytes).unwrap();
            view.fill_seq(2, &[0xAA, 0xBB]).unwrap();
            assert_eq!(view.as_view().access(2, &[1]).unwrap(), &[0xAA, 0xBB]);
        }
        assert_eq!(&bytes[2 * WORD..], &[0xAA, 0xBB, 0xAA, 0xBB]);
    }

    #[test]
    fn slicing_a_view_yields_an_owned_copy() {
        let bytes = foreign_1d(8, 1);
        let view = ArrayRef::new(&bytes).unwrap();
        let sliced = view.try_slice_1d(1, 2, 5).unwrap();
        assert_eq!(sliced.payload(), &[2, 3, 4]);
    }
}
