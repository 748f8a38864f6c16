//! Result type definitions and extension traits bridging `Result` and [`Status`].
//!
//! Provides combinators that turn any `Result` into a status, or consume it
//! while logging the failure, without unwrap/expect/panic.

use std::error::Error as StdError;

use crate::bridge::StatusError;
use crate::error::Error;
use crate::status::Status;

/// The standard Result type for errstat's own operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result carrying a failed [`Status`] as its error.
///
/// Produced by [`Status::into_result`] and [`ResultExt::map_status`], and
/// the natural return type for code that wants `?` on statuses.
pub type StatusResult<T> = std::result::Result<T, StatusError>;

/// Extension trait converting a `Result` into the status world.
pub trait ResultExt<T> {
    /// Collapse into a [`Status`], discarding the success value.
    ///
    /// `Ok` becomes [`Status::OK`]; `Err` goes through [`Status::from_error`].
    fn into_status(self) -> Status;

    /// Convert the error side into a [`StatusError`].
    ///
    /// # Errors
    ///
    /// Returns the bridged status of the original error.
    fn map_status(self) -> StatusResult<T>;

    /// Convert a Result to an Option, logging the error if present.
    fn into_option_logged(self) -> Option<T>;

    /// Get the value or a default, logging the error if present.
    fn or_default_logged(self, default: T) -> T;
}

impl<T, E: StdError + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn into_status(self) -> Status {
        match self {
            Ok(_) => Status::OK,
            Err(e) => Status::from_error(&e),
        }
    }

    fn map_status(self) -> StatusResult<T> {
        self.map_err(|e| Status::from_error(&e).into_error())
    }

    fn into_option_logged(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Operation failed: {}", e);
                None
            }
        }
    }

    fn or_default_logged(self, default: T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Operation failed, using default: {}", e);
                default
            }
        }
    }
}
