use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use wildfire_risk_core::ValidationError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code passed across the FFI boundary
/// - `msg()` - Returns the error message for diagnostics
pub(crate) trait WildfireError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> WildfireErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `WildfireError` for the FFI failure cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultWildfireError {
    code: WildfireErrorCode,
    msg: String,
}

impl DefaultWildfireError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_assessment"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: WildfireErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    ///
    /// # Arguments
    /// * `param_name` - The name of the offending string (e.g., `"humidity"`)
    pub fn invalid_utf8(param_name: &str) -> Self {
        Self {
            code: WildfireErrorCode::InvalidUtf8,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }
}

impl From<ValidationError> for DefaultWildfireError {
    fn from(error: ValidationError) -> Self {
        Self {
            code: WildfireErrorCode::ValidationFailed,
            msg: error.to_string(),
        }
    }
}

impl WildfireError for DefaultWildfireError {
    fn code(&self) -> WildfireErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by wildfire risk functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildfireErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A string argument was not valid UTF-8.
    InvalidUtf8 = 2,

    /// Input was rejected: a level is missing or unknown, or a numeric value
    /// is out of its domain. The message names every offending field.
    ValidationFailed = 3,
}

impl From<DefaultWildfireError> for WildfireErrorCode {
    fn from(error: DefaultWildfireError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, WildfireErrorCode)> = const { RefCell::new((None, WildfireErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, WildfireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, WildfireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// WildfireAssessment out;
/// if (wildfire_assess(&snapshot, &out) != Ok) {
///     const char* error = wildfire_get_last_error();
///     if (error) {
///         fprintf(stderr, "Assessment rejected: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn wildfire_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `WildfireErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn wildfire_get_last_error_code() -> WildfireErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
