//! Arrays whose elements encode their own flat offset.
//!
//! Element `k` (column-major) of an iota array holds the little-endian
//! bytes of `k`, truncated or zero-padded to the element size. Results of
//! fills, accesses and slices can then be checked by decoding positions.

use ndslab_array::{EncodedArray, EncodedArrayMut, FlatArray};

/// Bytes of element `offset` for the given element size.
pub fn iota_element(offset: usize, element_size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; element_size];
    let le = (offset as u64).to_le_bytes();
    let n = element_size.min(le.len());
    bytes[..n].copy_from_slice(&le[..n]);
    bytes
}

/// Payload bytes of an iota array with `total` elements.
pub fn iota_bytes(total: usize, element_size: usize) -> Vec<u8> {
    (0..total)
        .flat_map(|k| iota_element(k, element_size))
        .collect()
}

/// A freshly built iota array of the given shape.
pub fn iota_array(shape: &[usize], element_size: usize) -> FlatArray {
    let mut array = FlatArray::new(shape, element_size).expect("fixture shape must be valid");
    let payload = iota_bytes(array.total_elements(), element_size);
    array
        .elements_mut(element_size)
        .expect("fixture element size must match")
        .copy_from_slice(&payload);
    array
}

/// Decode an element written by [`iota_element`] back to its offset.
pub fn iota_offset(element: &[u8]) -> usize {
    let mut le = [0u8; 8];
    let n = element.len().min(le.len());
    le[..n].copy_from_slice(&element[..n]);
    u64::from_le_bytes(le) as usize
}
