//! Core error types for errstat's own fallible operations.
//!
//! These cover code lookup and configuration loading. They are distinct from
//! [`Status`], which is the value callers pass around; any [`Error`] converts
//! into a failed [`Status`] with a matching code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::code::ErrorCode;
use crate::status::Status;

/// Core error type for errstat operations.
#[derive(Debug, Error)]
pub enum Error {
    // Registry lookups
    #[error("unknown error code: '{name}'")]
    UnknownCode { name: String },

    #[error("no error code has value {value}")]
    InvalidCodeValue { value: i32 },

    #[error("unknown error category: '{name}'")]
    UnknownCategory { name: String },

    // Configuration files
    #[error("failed to read file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },

    #[error("TOML parse error: {reason}")]
    TomlParseFailed { reason: String },

    // Generic I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create an unknown code error.
    pub fn unknown_code(name: impl Into<String>) -> Self {
        Self::UnknownCode { name: name.into() }
    }

    /// Create an invalid code value error.
    pub const fn invalid_code_value(value: i32) -> Self {
        Self::InvalidCodeValue { value }
    }

    /// Create an unknown category error.
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory { name: name.into() }
    }

    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            reason: reason.into(),
        }
    }

    /// Create a TOML parse error.
    pub fn toml_parse_failed(reason: impl Into<String>) -> Self {
        Self::TomlParseFailed {
            reason: reason.into(),
        }
    }

    /// The status code this error maps to.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownCode { .. } | Self::UnknownCategory { .. } => ErrorCode::InvalidName,
            Self::InvalidCodeValue { .. } => ErrorCode::OutOfBounds,
            Self::FileReadFailed { .. } => ErrorCode::FileOperationFailed,
            Self::JsonParseFailed { .. } | Self::TomlParseFailed { .. } => ErrorCode::SyntaxError,
            Self::Io(err) => io_error_code(err),
        }
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Map an I/O error kind onto the closest status code.
#[must_use]
pub fn io_error_code(err: &io::Error) -> ErrorCode {
    match err.kind() {
        io::ErrorKind::NotFound => ErrorCode::FileNotFound,
        io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
        io::ErrorKind::AlreadyExists => ErrorCode::FileAlreadyExists,
        io::ErrorKind::TimedOut => ErrorCode::Timeout,
        io::ErrorKind::Interrupted => ErrorCode::OperationAborted,
        io::ErrorKind::OutOfMemory => ErrorCode::OutOfMemory,
        io::ErrorKind::InvalidInput => ErrorCode::InvalidArgument,
        io::ErrorKind::InvalidData => ErrorCode::InvalidFile,
        io::ErrorKind::Unsupported => ErrorCode::NotSupported,
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
            ErrorCode::ConnectionFailed
        }
        io::ErrorKind::ConnectionAborted | io::ErrorKind::BrokenPipe => ErrorCode::ConnectionClosed,
        _ => ErrorCode::FileOperationFailed,
    }
}
