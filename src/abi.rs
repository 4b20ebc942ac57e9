//! Purpose: C ABI bridge for non-Rust hosts (libqueryjson).
//! Exports: `qj_query_deserialize` plus buffer/error free functions.
//! Role: Stable ABI surface so C/C++ callers can reuse the deserializer.
//! Invariants: JSON bytes in/out; explicit free functions for every allocation.
//! Invariants: Error kinds map 1:1 with core error kinds.
#![allow(non_camel_case_types)]

use crate::api::QueryDeserializer;
use crate::core::error::{Error, ErrorKind, to_exit_code};
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

#[repr(C)]
pub struct qj_buf {
    data: *mut u8,
    len: usize,
}

#[repr(C)]
pub struct qj_error {
    kind: i32,
    message: *mut c_char,
    field: *mut c_char,
}

/// Deserializes `len` bytes of JSON at `input` and writes the wire rendering
/// of the query into `out_query`. Returns 0 on success and -1 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn qj_query_deserialize(
    input: *const u8,
    len: usize,
    out_query: *mut qj_buf,
    out_err: *mut *mut qj_error,
) -> i32 {
    if input.is_null() && len != 0 {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("input is null"),
        );
    }
    if out_query.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_query is null"),
        );
    }
    let bytes: &[u8] = if len == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(input, len) }
    };
    let query = match QueryDeserializer::new().try_deserialize_slice(bytes) {
        Ok(query) => query,
        Err(err) => return fail(out_err, err),
    };
    let json_bytes = match serde_json::to_vec(&query) {
        Ok(json_bytes) => json_bytes,
        Err(err) => {
            return fail(
                out_err,
                Error::new(ErrorKind::Internal)
                    .with_message("failed to serialize query")
                    .with_source(err),
            );
        }
    };
    unsafe {
        let buf = &mut *out_query;
        let mut data = json_bytes.into_boxed_slice();
        buf.len = data.len();
        buf.data = data.as_mut_ptr();
        std::mem::forget(data);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn qj_buf_free(buf: *mut qj_buf) {
    if buf.is_null() {
        return;
    }
    unsafe {
        let buf = &mut *buf;
        if !buf.data.is_null() && buf.len != 0 {
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(buf.data, buf.len)));
        }
        buf.data = ptr::null_mut();
        buf.len = 0;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn qj_error_free(err: *mut qj_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
        if !err.field.is_null() {
            drop(CString::from_raw(err.field));
        }
    }
}

fn fail(out_err: *mut *mut qj_error, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(qj_error {
        kind: to_exit_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
        field: err.field().map(to_c_string).unwrap_or(ptr::null_mut()),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}
