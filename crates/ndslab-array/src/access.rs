//! Element addressing from a multi-index.
//!
//! The byte offset of an element is `flat_offset(shape, indices) * element_size`
//! within the payload. Out-of-range indices are reported and never turned
//! into an address.

use ndslab_core::{flat_offset, ArrayError, WORD};

use crate::fill::word_seed;

/// Byte range of the element at `indices`.
fn element_range(
    shape: &[usize],
    element_size: usize,
    indices: &[usize],
) -> Result<std::ops::Range<usize>, ArrayError> {
    let start = flat_offset(shape, indices)? * element_size;
    Ok(start..start + element_size)
}

/// Bytes of the element at `indices`.
pub fn element<'a>(
    shape: &[usize],
    payload: &'a [u8],
    element_size: usize,
    indices: &[usize],
) -> Result<&'a [u8], ArrayError> {
    let range = element_range(shape, element_size, indices)?;
    Ok(&payload[range])
}

/// Mutable bytes of the element at `indices`.
pub fn element_mut<'a>(
    shape: &[usize],
    payload: &'a mut [u8],
    element_size: usize,
    indices: &[usize],
) -> Result<&'a mut [u8], ArrayError> {
    let range = element_range(shape, element_size, indices)?;
    Ok(&mut payload[range])
}

/// Pack element bytes into the machine-word value container.
///
/// The bytes become the low-order bytes of the word; the high-order bytes
/// are zero.
pub fn pack_word(bytes: &[u8]) -> Result<usize, ArrayError> {
    if bytes.len() > WORD {
        return Err(ArrayError::ValueTooWide {
            element_size: bytes.len(),
            max: WORD,
        });
    }
    let mut word = [0u8; WORD];
    if cfg!(target_endian = "big") {
        word[WORD - bytes.len()..].copy_from_slice(bytes);
    } else {
        word[..bytes.len()].copy_from_slice(bytes);
    }
    Ok(usize::from_ne_bytes(word))
}

/// Overwrite `slot` with the first `slot.len()` bytes of `value`.
pub fn store(slot: &mut [u8], value: &[u8]) -> Result<(), ArrayError> {
    if value.len() < slot.len() {
        return Err(ArrayError::ValueTooShort {
            needed: slot.len(),
            got: value.len(),
        });
    }
    let n = slot.len();
    slot.copy_from_slice(&value[..n]);
    Ok(())
}

/// Overwrite `slot` from the machine-word value container.
pub fn store_word(slot: &mut [u8], value: usize) -> Result<(), ArrayError> {
    let word = word_seed(value, slot.len())?;
    store(slot, &word)
}
