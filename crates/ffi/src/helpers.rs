use crate::error::{with_last_error_mut, DefaultWildfireError, WildfireError, WildfireErrorCode};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl WildfireError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl WildfireError) -> WildfireErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultWildfireError>) -> Result<T, WildfireErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WildfireErrorCode::Ok;
    });
}

/// Borrow an optional C string as UTF-8. Null reads as `None`.
///
/// # Safety
///
/// `ptr` must be null or point to a null-terminated string that stays alive
/// for the returned borrow.
pub(crate) unsafe fn read_c_str<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<Option<&'a str>, DefaultWildfireError> {
    if ptr.is_null() {
        return Ok(None);
    }
    // SAFETY: non-null and null-terminated per the caller's contract.
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str()
        .map(Some)
        .map_err(|_| DefaultWildfireError::invalid_utf8(param_name))
}

/// Hand a Rust string to C. Interior NUL bytes are dropped.
pub(crate) fn string_into_raw(value: String) -> *mut c_char {
    let bytes: Vec<u8> = value.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).map_or(std::ptr::null_mut(), CString::into_raw)
}
