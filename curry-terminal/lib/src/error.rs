//! Error codes and the error value returned by every fallible operation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound (in bytes) on the length of an error message.
pub const MAX_MESSAGE_LEN: usize = 512;

/// Classification of an operation's outcome.
///
/// `Success` is never carried by a [`TermError`]; it is the status reported
/// by [`ErrorCode::of`] for an `Ok` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// No failure
    Success,
    /// The native handle (or the context itself) could not be acquired
    InitFailed,
    /// The context is not initialized, or the request conflicts with its state
    InvalidState,
    /// A non-positive or out-of-bounds geometry was requested
    InvalidSize,
    /// A malformed or out-of-range color was requested
    InvalidColor,
    /// No supported backend exists for the compile target
    UnknownPlatform,
}

impl ErrorCode {
    /// The status of a result: `Success` for `Ok`, the error's code otherwise.
    ///
    /// ## Examples
    ///
    /// ```
    /// use curry_terminal::{Context, ErrorCode, get_size};
    ///
    /// let ctx = Context::default();
    /// assert_eq!(ErrorCode::of(&get_size(&ctx)), ErrorCode::InvalidState);
    /// ```
    pub fn of<T>(result: &Result<T>) -> ErrorCode {
        match result {
            Ok(_) => ErrorCode::Success,
            Err(e) => e.code(),
        }
    }

    /// A short human-readable description of the code.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::InitFailed => "terminal initialization failed",
            ErrorCode::InvalidState => "terminal context is in an invalid state",
            ErrorCode::InvalidSize => "invalid terminal size",
            ErrorCode::InvalidColor => "invalid color",
            ErrorCode::UnknownPlatform => "unknown platform",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::InitFailed => write!(f, "InitFailed"),
            ErrorCode::InvalidState => write!(f, "InvalidState"),
            ErrorCode::InvalidSize => write!(f, "InvalidSize"),
            ErrorCode::InvalidColor => write!(f, "InvalidColor"),
            ErrorCode::UnknownPlatform => write!(f, "UnknownPlatform"),
        }
    }
}

/// An error code paired with a diagnostic message meant for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct TermError {
    code: ErrorCode,
    message: String,
}

impl TermError {
    /// Creates an error, bounding the message to [`MAX_MESSAGE_LEN`] bytes.
    ///
    /// An empty message is replaced by the code's description.
    pub fn new<T: Into<String>>(code: ErrorCode, message: T) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = code.description().to_string();
        }
        truncate_at_char_boundary(&mut message, MAX_MESSAGE_LEN);
        Self { code, message }
    }

    pub fn init_failed<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorCode::InitFailed, message)
    }

    pub fn invalid_state<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    pub fn invalid_size<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorCode::InvalidSize, message)
    }

    pub fn invalid_color<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorCode::InvalidColor, message)
    }

    pub fn unknown_platform<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorCode::UnknownPlatform, message)
    }

    /// The error for an operation attempted on an Uninitialized context.
    pub(crate) fn not_initialized(operation: &str) -> Self {
        Self::invalid_state(format!(
            "{operation}: terminal context is not initialized (call init first)"
        ))
    }

    /// Wraps an I/O failure on the terminal stream.
    pub(crate) fn io(context: &str, err: std::io::Error) -> Self {
        Self::invalid_state(format!("{context}: {err}"))
    }

    /// The error's classification.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The diagnostic message; never empty.
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

/// Convenience Result type for terminal operations.
pub type Result<T> = std::result::Result<T, TermError>;
