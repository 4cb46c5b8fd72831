//! Owned arrays: one allocation holding header, shape and payload.

use ndslab_core::{ArrayError, Header};

use crate::traits::{EncodedArray, EncodedArrayMut};
use crate::view::{ArrayMut, ArrayRef};

/// An owned N-dimensional array in the flat encoding.
///
/// The buffer is allocated once at exactly the encoded size and never
/// grows. Sliced arrays are independent `FlatArray`s; nothing is shared.
///
/// # Examples
///
/// ```
/// use ndslab_array::{EncodedArray, EncodedArrayMut, FlatArray};
///
/// let mut a = FlatArray::create(1, 4, &[5]).unwrap();
/// a.fill_val(4, 7).unwrap();
/// for i in 0..5 {
///     assert_eq!(a.access_val(4, &[i]).unwrap(), 7);
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatArray {
    header: Header,
    bytes: Box<[u8]>,
}

impl FlatArray {
    /// Allocate an array of `dimensionality` axes with lengths `shape` and
    /// slots of `element_size` bytes.
    ///
    /// `shape` must have exactly `dimensionality` entries. An axis of length
    /// zero is allowed and yields an empty payload. The payload is zeroed.
    pub fn create(
        dimensionality: usize,
        element_size: usize,
        shape: &[usize],
    ) -> Result<Self, ArrayError> {
        if dimensionality == 0 {
            return Err(ArrayError::ZeroDimensionality);
        }
        if shape.len() != dimensionality {
            return Err(ArrayError::ShapeLength {
                expected: dimensionality,
                got: shape.len(),
            });
        }
        Self::new(shape, element_size)
    }

    /// Allocate an array with lengths `shape` and slots of `element_size` bytes.
    pub fn new(shape: &[usize], element_size: usize) -> Result<Self, ArrayError> {
        Self::from_header(Header::new(shape)?, element_size)
    }

    /// Allocate an array described by `header`.
    pub fn from_header(header: Header, element_size: usize) -> Result<Self, ArrayError> {
        let mut bytes = vec![0u8; header.encoded_len(element_size)?].into_boxed_slice();
        header.encode(&mut bytes);
        Ok(Self { header, bytes })
    }

    /// Take ownership of an externally encoded buffer.
    ///
    /// The header is validated here; the payload is validated against the
    /// element size by every operation.
    pub fn from_encoded(bytes: Box<[u8]>) -> Result<Self, ArrayError> {
        Ok(Self {
            header: Header::decode(&bytes)?,
            bytes,
        })
    }

    /// Release the encoded buffer.
    pub fn into_encoded(self) -> Box<[u8]> {
        self.bytes
    }

    /// Total size of the encoded buffer in bytes.
    pub fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> ArrayRef<'_> {
        ArrayRef::from_parts(self.header.clone(), &self.bytes)
    }

    /// Borrow as a mutable view.
    pub fn view_mut(&mut self) -> ArrayMut<'_> {
        ArrayMut::from_parts(self.header.clone(), &mut self.bytes)
    }
}

impl EncodedArray for FlatArray {
    fn header(&self) -> &Header {
        &self.header
    }

    fn encoded(&self) -> &[u8] {
        &self.bytes
    }
}

impl EncodedArrayMut for FlatArray {
    fn encoded_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndslab_core::layout::read_word;
    use ndslab_core::WORD;

    #[test]
    fn create_writes_header_and_shape() {
        let a = FlatArray::create(3, 2, &[4, 3, 2]).unwrap();
        assert_eq!(a.dimensionality(), 3);
        assert_eq!(a.shape(), &[4, 3, 2]);
        assert_eq!(a.total_elements(), 24);
        assert_eq!(read_word(a.encoded(), 0), Some(3));
        assert_eq!(read_word(a.encoded(), WORD), Some(4));
        assert_eq!(read_word(a.encoded(), 2 * WORD), Some(3));
        assert_eq!(read_word(a.encoded(), 3 * WORD), Some(2));
    }

    #[test]
    fn buffer_size_is_header_plus_shape_plus_payload() {
        let a = FlatArray::create(2, 8, &[3, 5]).unwrap();
        assert_eq!(a.encoded_len(), WORD + 2 * WORD + 15 * 8);
        assert_eq!(a.payload().len(), 15 * 8);
    }

    #[test]
    fn empty_axis_yields_empty_payload() {
        let mut a = FlatArray::create(2, 4, &[3, 0]).unwrap();
        assert_eq!(a.total_elements(), 0);
        assert!(a.payload().is_empty());
        a.fill_val(4, 1).unwrap();
    }

    #[test]
    fn create_rejects_bad_dimensionality() {
        assert_eq!(
            FlatArray::create(0, 4, &[]),
            Err(ArrayError::ZeroDimensionality)
        );
        assert_eq!(
            FlatArray::create(2, 4, &[3]),
            Err(ArrayError::ShapeLength {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn create_rejects_overflowing_size() {
        assert_eq!(
            FlatArray::create(2, 8, &[usize::MAX / 2, 4]),
            Err(ArrayError::SizeOverflow)
        );
    }

    #[test]
    fn encoded_round_trip_preserves_array() {
        let mut a = FlatArray::create(2, 1, &[2, 2]).unwrap();
        a.fill_seq(1, &[3]).unwrap();
        let b = FlatArray::from_encoded(a.clone().into_encoded()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn views_share_the_buffer() {
        let mut a = FlatArray::create(1, 1, &[3]).unwrap();
        a.view_mut().assign_at(1, &[2], &[9]).unwrap();
        assert_eq!(a.view().access(1, &[2]).unwrap(), &[9]);
    }
}
