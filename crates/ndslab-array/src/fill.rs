//! Fill strategies: initialise every payload slot from one seed value.
//!
//! All strategies operate on an already-validated payload of
//! `total_elements * element_size` bytes and produce byte-identical
//! results for the same seed; they differ only in copy pattern.
//!
//! - [`sequential`]: seed slot 0, then copy slot `i - 1` into slot `i`.
//! - [`exponential`]: seed slot 0, then double the filled prefix each round.
//! - [`hybrid`]: exponential below [`ArrayConfig::hybrid_threshold`], else sequential.
//!
//! The deep strategy, where every slot owns its own heap copy, is
//! [`NestedArray::fill_deep`](crate::NestedArray::fill_deep).

use ndslab_core::{ArrayConfig, ArrayError, WORD};

/// Which fill strategy to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillStrategy {
    /// Slot-by-slot copy from the previous slot.
    Sequential,
    /// Prefix doubling with one bulk copy per round.
    Exponential,
    /// Exponential for small elements, sequential otherwise.
    Hybrid,
}

/// Fill `payload` using `strategy`.
pub fn fill(
    strategy: FillStrategy,
    config: &ArrayConfig,
    payload: &mut [u8],
    element_size: usize,
    value: &[u8],
) -> Result<(), ArrayError> {
    match strategy {
        FillStrategy::Sequential => sequential(payload, element_size, value),
        FillStrategy::Exponential => exponential(payload, element_size, value),
        FillStrategy::Hybrid => hybrid(config, payload, element_size, value),
    }
}

/// Copy the seed into slot 0. Returns the slot count.
fn seed_first(
    payload: &mut [u8],
    element_size: usize,
    value: &[u8],
) -> Result<usize, ArrayError> {
    if value.len() < element_size {
        return Err(ArrayError::ValueTooShort {
            needed: element_size,
            got: value.len(),
        });
    }
    if element_size == 0 || payload.is_empty() {
        return Ok(0);
    }
    payload[..element_size].copy_from_slice(&value[..element_size]);
    Ok(payload.len() / element_size)
}

/// Sequential fill: O(n) element copies, O(1) extra memory.
pub fn sequential(
    payload: &mut [u8],
    element_size: usize,
    value: &[u8],
) -> Result<(), ArrayError> {
    let total = seed_first(payload, element_size, value)?;
    for i in 1..total {
        let prev = (i - 1) * element_size;
        payload.copy_within(prev..prev + element_size, i * element_size);
    }
    Ok(())
}

/// Exponential fill: O(log n) bulk copies of the already-filled prefix.
pub fn exponential(
    payload: &mut [u8],
    element_size: usize,
    value: &[u8],
) -> Result<(), ArrayError> {
    let total = seed_first(payload, element_size, value)?;
    let mut filled = 1;
    while filled < total {
        let to_copy = filled.min(total - filled);
        payload.copy_within(..to_copy * element_size, filled * element_size);
        filled += to_copy;
    }
    Ok(())
}

/// Hybrid fill: picks the strategy by element size.
pub fn hybrid(
    config: &ArrayConfig,
    payload: &mut [u8],
    element_size: usize,
    value: &[u8],
) -> Result<(), ArrayError> {
    if config.prefers_doubling(element_size) {
        exponential(payload, element_size, value)
    } else {
        sequential(payload, element_size, value)
    }
}

/// The low-order `element_size` bytes of `value`, in native byte order,
/// at the start of a word-sized seed.
///
/// This is the machine-word value container used by `fill_val`,
/// `access_val` and `assign_val_at`. On little-endian targets it is simply
/// the first `element_size` bytes of `value.to_ne_bytes()`.
pub fn word_seed(value: usize, element_size: usize) -> Result<[u8; WORD], ArrayError> {
    if element_size > WORD {
        return Err(ArrayError::ValueTooWide {
            element_size,
            max: WORD,
        });
    }
    let native = value.to_ne_bytes();
    let low = if cfg!(target_endian = "big") {
        &native[WORD - element_size..]
    } else {
        &native[..element_size]
    };
    let mut seed = [0u8; WORD];
    seed[..element_size].copy_from_slice(low);
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sequential_fills_every_slot() {
        let mut payload = vec![0u8; 5 * 4];
        sequential(&mut payload, 4, &7u32.to_ne_bytes()).unwrap();
        for slot in payload.chunks_exact(4) {
            assert_eq!(u32::from_ne_bytes(slot.try_into().unwrap()), 7);
        }
    }

    #[test]
    fn exponential_handles_non_power_of_two() {
        let mut payload = vec![0u8; 13 * 3];
        exponential(&mut payload, 3, &[1, 2, 3]).unwrap();
        assert!(payload.chunks_exact(3).all(|s| s == [1, 2, 3]));
    }

    #[test]
    fn hybrid_large_elements_take_sequential_branch() {
        let config = ArrayConfig::new();
        let seed: Vec<u8> = (0..200).map(|b| b as u8).collect();
        let mut payload = vec![0u8; 3 * 200];
        hybrid(&config, &mut payload, 200, &seed).unwrap();
        assert!(payload.chunks_exact(200).all(|s| s == seed.as_slice()));
    }

    #[test]
    fn short_seed_rejected_before_writing() {
        let mut payload = vec![9u8; 8];
        let err = sequential(&mut payload, 4, &[1, 2]).unwrap_err();
        assert_eq!(err, ArrayError::ValueTooShort { needed: 4, got: 2 });
        assert!(payload.iter().all(|&b| b == 9));
    }

    #[test]
    fn empty_payload_is_a_no_op() {
        let mut payload: Vec<u8> = Vec::new();
        exponential(&mut payload, 4, &[1, 2, 3, 4]).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn word_seed_rejects_wide_elements() {
        assert_eq!(
            word_seed(1, WORD + 1),
            Err(ArrayError::ValueTooWide {
                element_size: WORD + 1,
                max: WORD
            })
        );
    }

    proptest! {
        #[test]
        fn strategies_are_byte_identical(
            element_size in 1usize..40,
            total in 0usize..300,
            seed in proptest::collection::vec(any::<u8>(), 40),
        ) {
            let len = element_size * total;
            let mut seq = vec![0u8; len];
            let mut exp = vec![0u8; len];
            let mut hyb = vec![0u8; len];
            sequential(&mut seq, element_size, &seed).unwrap();
            exponential(&mut exp, element_size, &seed).unwrap();
            hybrid(&ArrayConfig::new(), &mut hyb, element_size, &seed).unwrap();
            prop_assert_eq!(&seq, &exp);
            prop_assert_eq!(&seq, &hyb);
        }
    }
}
