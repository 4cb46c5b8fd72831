//! Integration test: `ndslab_arr_slice_1d` terminates the process on an
//! empty or negative range.
//!
//! Each case re-runs this test binary filtered to itself with
//! `NDSLAB_FATAL_CASE` set. The child makes the call, which must not
//! return; the parent checks how the child died.

use std::env;
use std::process::{Command, Output};
use std::ptr;

use ndslab_ffi::array::{ndslab_arr_create, ndslab_arr_free, ndslab_arr_slice_1d};
use ndslab_ffi::NdslabStatus;

const CASE_VAR: &str = "NDSLAB_FATAL_CASE";

fn in_child() -> bool {
    env::var_os(CASE_VAR).is_some()
}

fn run_child(test: &str) -> Output {
    Command::new(env::current_exe().expect("test binary path"))
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CASE_VAR, "1")
        .output()
        .expect("spawn test binary")
}

/// Slice `from..to` of a 1-byte array of length `len`.
fn slice_1d_of(len: usize, from: usize, to: usize) -> i32 {
    let mut src = ptr::null_mut();
    assert_eq!(
        ndslab_arr_create(1, 1, [len].as_ptr(), &mut src),
        NdslabStatus::Ok as i32
    );
    let mut out = ptr::null_mut();
    let status = ndslab_arr_slice_1d(src, 1, from, to, &mut out);
    ndslab_arr_free(out, 0);
    ndslab_arr_free(src, 0);
    status
}

fn assert_aborted(output: &Output) {
    assert!(!output.status.success(), "child returned: {output:?}");
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        // SIGABRT
        assert_eq!(output.status.signal(), Some(6), "{output:?}");
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ndslab: fatal 1-D slice"),
        "stderr: {stderr}"
    );
}

#[test]
fn empty_range_aborts() {
    if in_child() {
        slice_1d_of(10, 3, 3);
        return;
    }
    assert_aborted(&run_child("empty_range_aborts"));
}

#[test]
fn range_below_zero_aborts() {
    if in_child() {
        // `to == 0` resolves to the empty source's end, so the range
        // would start past it with nowhere to clamp to.
        slice_1d_of(0, 2, 0);
        return;
    }
    assert_aborted(&run_child("range_below_zero_aborts"));
}

#[test]
fn clamped_range_returns() {
    assert_eq!(slice_1d_of(10, 8, 50), NdslabStatus::Ok as i32);
}
