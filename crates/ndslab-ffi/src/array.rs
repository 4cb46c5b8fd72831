//! Array FFI: create, fill, access, assign, slice and depth-aware free.
//!
//! An array pointer points at the dimensionality word of a block holding
//! the encoded layout. The element size is never stored and must be
//! passed to every call exactly as it was passed to create.
//!
//! Deep arrays hold one pointer-sized slot per element; each slot points
//! to an independently allocated block. [`ndslab_arr_free`] releases such
//! structures given their `complexity`, the number of owned levels below
//! the array. A wrong complexity leaks (too low) or frees foreign memory
//! (too high); the typed `NestedArray` in `ndslab-array` removes that
//! hazard for Rust callers.

use ndslab_array::{ArrayMut, ArrayRef, EncodedArray, EncodedArrayMut};
use ndslab_core::layout::{read_word, write_word};
use ndslab_core::{Header, SliceError, WORD};

use crate::block::{alloc_block, block_bytes, block_bytes_mut, block_from_slice, free_block};
use crate::status::NdslabStatus;

fn status(result: Result<(), NdslabStatus>) -> i32 {
    match result {
        Ok(()) => NdslabStatus::Ok as i32,
        Err(status) => status as i32,
    }
}

#[allow(unsafe_code)]
fn raw_slice<'a, T>(ptr: *const T, len: usize) -> Result<&'a [T], NdslabStatus> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(NdslabStatus::InvalidArgument);
    }
    // SAFETY: caller guarantees ptr points to len valid values.
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

#[allow(unsafe_code)]
fn write_out<T>(out: *mut T, value: T) {
    // SAFETY: out was checked non-null and is valid per caller contract.
    unsafe { out.write(value) }
}

fn check_out<T>(out: *mut T) -> Result<(), NdslabStatus> {
    if out.is_null() {
        Err(NdslabStatus::InvalidArgument)
    } else {
        Ok(())
    }
}

fn view<'a>(arr: *const u8) -> Result<ArrayRef<'a>, NdslabStatus> {
    if arr.is_null() {
        return Err(NdslabStatus::InvalidArgument);
    }
    Ok(ArrayRef::new(block_bytes(arr))?)
}

fn view_mut<'a>(arr: *mut u8) -> Result<ArrayMut<'a>, NdslabStatus> {
    if arr.is_null() {
        return Err(NdslabStatus::InvalidArgument);
    }
    Ok(ArrayMut::new(block_bytes_mut(arr))?)
}

// ── Constructor ─────────────────────────────────────────────────

fn create(
    dimensionality: usize,
    element_size: usize,
    shape: *const usize,
    out: *mut *mut u8,
) -> Result<(), NdslabStatus> {
    check_out(out)?;
    if dimensionality == 0 {
        return Err(NdslabStatus::InvalidArgument);
    }
    let header = Header::new(raw_slice(shape, dimensionality)?)?;
    let arr = alloc_block(header.encoded_len(element_size)?);
    header.encode(block_bytes_mut(arr));
    write_out(out, arr);
    Ok(())
}

/// Allocate an array of `dimensionality` axes with lengths `shape[0..dimensionality)`
/// and slots of `element_size` bytes. The payload is zeroed.
///
/// Writes the array to `*out`. Release it with [`ndslab_arr_free`].
/// Allocation failure aborts the process.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_create(
    dimensionality: usize,
    element_size: usize,
    shape: *const usize,
    out: *mut *mut u8,
) -> i32 {
    ffi_guard!({ status(create(dimensionality, element_size, shape, out)) })
}

// ── Fill strategies ─────────────────────────────────────────────

fn fill_from<F>(
    arr: *mut u8,
    element_size: usize,
    value: *const u8,
    fill: F,
) -> Result<(), NdslabStatus>
where
    F: FnOnce(&mut ArrayMut<'_>, &[u8]) -> Result<(), ndslab_core::ArrayError>,
{
    let mut array = view_mut(arr)?;
    let seed = raw_slice(value, element_size)?;
    fill(&mut array, seed)?;
    Ok(())
}

/// Sequential fill from the `element_size` bytes at `value`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_fill_seq(arr: *mut u8, element_size: usize, value: *const u8) -> i32 {
    ffi_guard!({
        status(fill_from(arr, element_size, value, |a, seed| {
            a.fill_seq(element_size, seed)
        }))
    })
}

/// Exponential (doubling) fill from the `element_size` bytes at `value`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_fill_exp(arr: *mut u8, element_size: usize, value: *const u8) -> i32 {
    ffi_guard!({
        status(fill_from(arr, element_size, value, |a, seed| {
            a.fill_exp(element_size, seed)
        }))
    })
}

/// Hybrid fill from the `element_size` bytes at `value`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_fill_inline(
    arr: *mut u8,
    element_size: usize,
    value: *const u8,
) -> i32 {
    ffi_guard!({
        status(fill_from(arr, element_size, value, |a, seed| {
            a.fill_inline(element_size, seed)
        }))
    })
}

fn fill_val(arr: *mut u8, element_size: usize, value: usize) -> Result<(), NdslabStatus> {
    view_mut(arr)?.fill_val(element_size, value)?;
    Ok(())
}

/// Hybrid fill from a word value container (`element_size <= sizeof(size_t)`).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_fill_val(arr: *mut u8, element_size: usize, value: usize) -> i32 {
    ffi_guard!({ status(fill_val(arr, element_size, value)) })
}

fn fill_deep(arr: *mut u8, value_size: usize, value: *const u8) -> Result<(), NdslabStatus> {
    let mut array = view_mut(arr)?;
    let seed = raw_slice(value, value_size)?;
    for slot in array.elements_mut(WORD)?.chunks_exact_mut(WORD) {
        write_word(slot, 0, block_from_slice(seed) as usize);
    }
    Ok(())
}

/// Deep fill: every slot gets a pointer to its own copy of the
/// `value_size` bytes at `value`.
///
/// The array must have been created with `element_size = sizeof(void *)`.
/// Slots are overwritten without being freed. Release with
/// `ndslab_arr_free(arr, 1)`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_fill_deep(arr: *mut u8, value_size: usize, value: *const u8) -> i32 {
    ffi_guard!({ status(fill_deep(arr, value_size, value)) })
}

// ── Accessor / mutator ──────────────────────────────────────────

fn access(
    arr: *mut u8,
    element_size: usize,
    indices: *const usize,
    out: *mut *mut u8,
) -> Result<(), NdslabStatus> {
    check_out(out)?;
    let mut array = view_mut(arr)?;
    let indices = raw_slice(indices, array.dimensionality())?;
    let slot = array.access_mut(element_size, indices)?;
    write_out(out, slot.as_mut_ptr());
    Ok(())
}

/// Address of the element at `indices[0..dimensionality)`.
///
/// Writes the address to `*out`. Returns `IndexOutOfBounds` without
/// writing if any index is past its axis. The address may be unaligned.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_access(
    arr: *mut u8,
    element_size: usize,
    indices: *const usize,
    out: *mut *mut u8,
) -> i32 {
    ffi_guard!({ status(access(arr, element_size, indices, out)) })
}

fn access_val(
    arr: *const u8,
    element_size: usize,
    indices: *const usize,
    out: *mut usize,
) -> Result<(), NdslabStatus> {
    check_out(out)?;
    let array = view(arr)?;
    let indices = raw_slice(indices, array.dimensionality())?;
    write_out(out, array.access_val(element_size, indices)?);
    Ok(())
}

/// Read the element at `indices` into the word value container `*out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_access_val(
    arr: *const u8,
    element_size: usize,
    indices: *const usize,
    out: *mut usize,
) -> i32 {
    ffi_guard!({ status(access_val(arr, element_size, indices, out)) })
}

fn assign_at(
    arr: *mut u8,
    element_size: usize,
    indices: *const usize,
    value: *const u8,
) -> Result<(), NdslabStatus> {
    let mut array = view_mut(arr)?;
    let indices = raw_slice(indices, array.dimensionality())?;
    let value = raw_slice(value, element_size)?;
    array.assign_at(element_size, indices, value)?;
    Ok(())
}

/// Overwrite the element at `indices` with the `element_size` bytes at `value`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_assign_at(
    arr: *mut u8,
    element_size: usize,
    indices: *const usize,
    value: *const u8,
) -> i32 {
    ffi_guard!({ status(assign_at(arr, element_size, indices, value)) })
}

fn assign_val_at(
    arr: *mut u8,
    element_size: usize,
    indices: *const usize,
    value: usize,
) -> Result<(), NdslabStatus> {
    let mut array = view_mut(arr)?;
    let indices = raw_slice(indices, array.dimensionality())?;
    array.assign_val_at(element_size, indices, value)?;
    Ok(())
}

/// Overwrite the element at `indices` from the word value container `value`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_assign_val_at(
    arr: *mut u8,
    element_size: usize,
    indices: *const usize,
    value: usize,
) -> i32 {
    ffi_guard!({ status(assign_val_at(arr, element_size, indices, value)) })
}

// ── Slicers ─────────────────────────────────────────────────────

fn slice_1d(
    src: *const u8,
    element_size: usize,
    from: usize,
    to: usize,
    out: *mut *mut u8,
) -> Result<(), NdslabStatus> {
    check_out(out)?;
    let array = view(src)?;
    match array.try_slice_1d(element_size, from, to) {
        Ok(sliced) => {
            write_out(out, block_from_slice(sliced.encoded()));
            Ok(())
        }
        Err(e @ (SliceError::EmptyRange { .. } | SliceError::NegativeRange { .. })) => {
            eprintln!("ndslab: fatal 1-D slice {from}..{to}: {e}");
            std::process::abort();
        }
        Err(e) => Err(e.into()),
    }
}

/// Copy `from..to` of a 1-D array into a new array written to `*out`.
///
/// `to == 0` means the end of the source. An end past the source and a
/// start past the end are clamped. An empty range (`from == to`) or a
/// range that would start below zero aborts the process.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_slice_1d(
    src: *const u8,
    element_size: usize,
    from: usize,
    to: usize,
    out: *mut *mut u8,
) -> i32 {
    ffi_guard!({ status(slice_1d(src, element_size, from, to, out)) })
}

fn slice(
    src: *const u8,
    element_size: usize,
    ranges: *const usize,
    out: *mut *mut u8,
) -> Result<(), NdslabStatus> {
    check_out(out)?;
    let array = view(src)?;
    let ranges = raw_slice(ranges, 2 * array.dimensionality())?;
    let sliced = array.slice(element_size, ranges)?;
    write_out(out, block_from_slice(sliced.encoded()));
    Ok(())
}

/// Copy a sub-region into a new array written to `*out`.
///
/// `ranges[0..2*dimensionality)` holds one `(from, to)` pair per axis.
/// `from == to` fixes the axis at that index; otherwise the axis is kept
/// with length `to - from >= 2`. Returns `InvalidRange` and writes nothing
/// if any axis is invalid.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_slice(
    src: *const u8,
    element_size: usize,
    ranges: *const usize,
    out: *mut *mut u8,
) -> i32 {
    ffi_guard!({ status(slice(src, element_size, ranges, out)) })
}

// ── Deallocator ─────────────────────────────────────────────────

/// Gather every block of the structure, children before parents.
///
/// Read-only: an error here leaves the whole structure allocated.
fn collect_blocks(
    arr: *mut u8,
    complexity: usize,
    blocks: &mut Vec<*mut u8>,
) -> Result<(), NdslabStatus> {
    if arr.is_null() {
        return Ok(());
    }
    if complexity > 0 {
        let array = view(arr)?;
        for slot in array.elements(WORD)?.chunks_exact(WORD) {
            let child = read_word(slot, 0).ok_or(NdslabStatus::InvalidEncoding)?;
            collect_blocks(child as *mut u8, complexity - 1, blocks)?;
        }
    }
    blocks.push(arr);
    Ok(())
}

fn free(arr: *mut u8, complexity: usize) -> Result<(), NdslabStatus> {
    let mut blocks = Vec::new();
    collect_blocks(arr, complexity, &mut blocks)?;
    for block in blocks {
        free_block(block);
    }
    Ok(())
}

/// Release `arr` and, `complexity` levels deep, every block it owns.
///
/// `complexity == 0` frees only `arr`. Otherwise every slot is read as a
/// pointer to a block, freed recursively with `complexity - 1`, before
/// `arr` itself. `complexity` must match how the structure was built.
/// The structure is checked before anything is released: if any level
/// fails to decode, nothing is freed and the error is returned.
/// A null `arr` is a no-op.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ndslab_arr_free(arr: *mut u8, complexity: usize) -> i32 {
    ffi_guard!({ status(free(arr, complexity)) })
}
