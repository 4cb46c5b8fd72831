//! Integration tests: end-to-end array scenarios and cross-module properties.
//!
//! Arrays are built with the iota fixtures, so every element holds its
//! own column-major flat offset and slicing results can be checked by
//! position.

use ndslab_array::fill::FillStrategy;
use ndslab_array::{
    ArrayConfig, ArrayRef, ClampPolicy, EncodedArray, EncodedArrayMut, FlatArray, SliceError,
};
use ndslab_test_utils::{iota_array, iota_bytes, iota_element, iota_offset};
use proptest::prelude::*;

fn offsets(array: &FlatArray, element_size: usize) -> Vec<usize> {
    array
        .elements(element_size)
        .unwrap()
        .chunks_exact(element_size)
        .map(iota_offset)
        .collect()
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn scenario_a_fill_val_reads_back_everywhere() {
    let mut a = FlatArray::create(1, 4, &[5]).unwrap();
    a.fill_val(4, 0x0000_0007).unwrap();
    for i in 0..5 {
        assert_eq!(a.access_val(4, &[i]).unwrap(), 7);
    }
}

#[test]
fn scenario_b_fixed_column_keeps_row_range() {
    let src = iota_array(&[4, 4], 2);
    let out = src.slice(2, &[1, 3, 2, 2]).unwrap();
    assert_eq!(out.dimensionality(), 1);
    assert_eq!(out.shape(), &[2]);
    // (row 1, col 2) and (row 2, col 2) with row fastest.
    assert_eq!(offsets(&out, 2), vec![1 + 4 * 2, 2 + 4 * 2]);
}

#[test]
#[should_panic(expected = "fatal 1-D slice")]
fn scenario_c_empty_1d_slice_is_fatal() {
    let src = iota_array(&[10], 1);
    let _ = src.slice_1d(1, 3, 3);
}

#[test]
fn scenario_c_empty_1d_slice_reported_by_try() {
    let src = iota_array(&[10], 1);
    assert_eq!(
        src.try_slice_1d(1, 3, 3),
        Err(SliceError::EmptyRange { at: 3 })
    );
}

#[test]
fn scenario_d_fixed_column_selects_whole_column() {
    let src = iota_array(&[4, 4], 1);
    let out = src.slice(1, &[0, 4, 1, 1]).unwrap();
    assert_eq!(out.shape(), &[4]);
    assert_eq!(offsets(&out, 1), vec![4, 5, 6, 7]);
}

#[test]
fn scenario_d_single_element_range_must_be_fixed_index() {
    let src = iota_array(&[4, 4], 1);
    assert_eq!(
        src.slice(1, &[0, 4, 1, 2]),
        Err(SliceError::RangeTooShort {
            axis: 1,
            from: 1,
            to: 2
        })
    );
}

// ── Slicing behaviour ───────────────────────────────────────────

#[test]
fn slice_1d_clamps_silently_by_default() {
    let src = iota_array(&[10], 1);
    assert_eq!(offsets(&src.slice_1d(1, 7, 100), 1), vec![7, 8, 9]);
    assert_eq!(offsets(&src.slice_1d(1, 9, 4), 1), vec![3]);
    assert_eq!(src.slice_1d(1, 0, 0), src);
}

#[test]
fn strict_policy_reports_clamps() {
    let src = iota_array(&[10], 1);
    let strict = ArrayConfig::new().with_clamp_policy(ClampPolicy::Strict);
    assert_eq!(
        src.try_slice_1d_with(&strict, 1, 0, 11),
        Err(SliceError::RangeOutOfBounds {
            axis: 0,
            to: 11,
            len: 10
        })
    );
    assert!(src.try_slice_1d_with(&strict, 1, 2, 5).is_ok());
}

#[test]
fn slice_1d_requires_one_dimension() {
    let src = iota_array(&[2, 2], 1);
    assert_eq!(
        src.try_slice_1d(1, 0, 2),
        Err(SliceError::NotOneDimensional { dimensionality: 2 })
    );
}

#[test]
fn nd_slice_on_1d_source_delegates_to_linear_copy() {
    let src = iota_array(&[6], 4);
    let out = src.slice(4, &[1, 4]).unwrap();
    assert_eq!(offsets(&out, 4), vec![1, 2, 3]);
}

#[test]
fn slice_3d_sub_box_preserves_column_major_order() {
    let src = iota_array(&[3, 4, 2], 2);
    let out = src.slice(2, &[1, 3, 1, 4, 0, 2]).unwrap();
    assert_eq!(out.shape(), &[2, 3, 2]);
    let mut expected = Vec::new();
    for k in 0..2 {
        for j in 1..4 {
            for i in 1..3 {
                expected.push(i + 3 * j + 12 * k);
            }
        }
    }
    assert_eq!(offsets(&out, 2), expected);
}

#[test]
fn slice_is_an_independent_copy() {
    let mut src = iota_array(&[4, 4], 1);
    let out = src.slice(1, &[0, 4, 0, 0]).unwrap();
    src.fill_val(1, 0xFF).unwrap();
    assert_eq!(offsets(&out, 1), vec![0, 1, 2, 3]);
}

#[test]
fn invalid_slice_leaves_source_untouched() {
    let src = iota_array(&[4, 4], 1);
    let before = src.clone();
    assert!(src.slice(1, &[0, 5, 0, 0]).is_err());
    assert_eq!(src, before);
}

#[test]
fn wrong_element_size_is_reported() {
    let src = iota_array(&[4], 2);
    assert!(matches!(src.slice(4, &[0, 3]), Err(SliceError::Array(_))));
}

// ── Interop ─────────────────────────────────────────────────────

#[test]
fn foreign_buffer_is_sliced_through_a_view() {
    let owned = iota_array(&[3, 3], 1);
    let bytes = owned.clone().into_encoded();
    let view = ArrayRef::new(&bytes).unwrap();
    let out = view.slice(1, &[0, 3, 2, 2]).unwrap();
    assert_eq!(offsets(&out, 1), vec![6, 7, 8]);
    assert_eq!(out, owned.slice(1, &[0, 3, 2, 2]).unwrap());
}

// ── Properties ──────────────────────────────────────────────────

fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..5, 1..4)
}

proptest! {
    #[test]
    fn payload_size_is_product_of_shape(shape in shape_strategy(), es in 1usize..9) {
        let a = FlatArray::new(&shape, es).unwrap();
        let total: usize = shape.iter().product();
        prop_assert_eq!(a.total_elements(), total);
        prop_assert_eq!(a.payload().len(), total * es);
    }

    #[test]
    fn fill_strategies_agree(shape in shape_strategy(), seed in prop::collection::vec(any::<u8>(), 1..200)) {
        let es = seed.len();
        let config = ArrayConfig::default();
        let mut results = Vec::new();
        for strategy in [FillStrategy::Sequential, FillStrategy::Exponential, FillStrategy::Hybrid] {
            let mut a = FlatArray::new(&shape, es).unwrap();
            a.fill_with(strategy, &config, es, &seed).unwrap();
            results.push(a);
        }
        prop_assert_eq!(&results[0], &results[1]);
        prop_assert_eq!(&results[1], &results[2]);
    }

    #[test]
    fn assign_then_access_round_trips(
        shape in shape_strategy(),
        pick in any::<prop::sample::Index>(),
        value in any::<u32>(),
    ) {
        let mut a = FlatArray::new(&shape, 4).unwrap();
        let flat = pick.index(a.total_elements());
        let idx = ndslab_core::unflatten(&shape, flat);
        a.assign_val_at(4, &idx, value as usize).unwrap();
        prop_assert_eq!(a.access_val(4, &idx).unwrap(), value as usize);
        prop_assert_eq!(a.access(4, &idx).unwrap(), &a.payload()[flat * 4..flat * 4 + 4]);
    }

    #[test]
    fn full_1d_slice_is_identity(len in 1usize..64, es in 1usize..9) {
        let src = iota_array(&[len], es);
        let out = src.slice_1d(es, 0, len);
        prop_assert_eq!(out.payload(), src.payload());
        prop_assert_eq!(out.payload(), &iota_bytes(len, es)[..]);
    }

    #[test]
    fn fixed_axis_selects_hyperplane(
        shape in prop::collection::vec(2usize..5, 2..4),
        axis_pick in any::<prop::sample::Index>(),
        fixed_pick in any::<prop::sample::Index>(),
    ) {
        let axis = axis_pick.index(shape.len());
        let fixed = fixed_pick.index(shape[axis]);
        let src = iota_array(&shape, 2);

        let mut ranges = Vec::new();
        for (i, &len) in shape.iter().enumerate() {
            if i == axis {
                ranges.extend([fixed, fixed]);
            } else {
                ranges.extend([0, len]);
            }
        }
        let out = src.slice(2, &ranges).unwrap();
        prop_assert_eq!(out.dimensionality(), shape.len() - 1);

        let expected: Vec<u8> = (0..src.total_elements())
            .filter(|&k| ndslab_core::unflatten(&shape, k)[axis] == fixed)
            .flat_map(|k| iota_element(k, 2))
            .collect();
        prop_assert_eq!(out.payload(), &expected[..]);
    }
}
