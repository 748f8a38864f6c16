//! Conversions between [`Status`] and Rust's unwinding and error traits.
//!
//! The value world (`Status`) and the error world (`std::error::Error`,
//! panics) only meet at explicit conversion points:
//!
//! - [`StatusError`] wraps a status as a type implementing
//!   [`std::error::Error`], for `?`, `Box<dyn Error>` or
//!   [`std::panic::panic_any`].
//! - [`Status::from_panic`] and [`catch_unwind_status`] turn a caught panic
//!   back into a status.
//! - [`Status::from_error`] and [`Status::from_dyn_error`] classify an
//!   arbitrary error.
//!
//! A `StatusError` that crosses any of these boundaries comes back as the
//! status it was built from, sharing the original payload.

use std::any::{Any, type_name};
use std::error::Error as StdError;
use std::iter;
use std::panic::{self, AssertUnwindSafe};

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::code::ErrorCode;
use crate::status::Status;

/// Maximum number of `source()` levels folded into a bridged reason.
pub const MAX_SOURCE_DEPTH: usize = 8;

/// A [`Status`] in error form.
///
/// `Display` prints the status reason. Structured access is available
/// through [`StatusError::status`], [`StatusError::code`] and
/// [`StatusError::code_string`].
///
/// Wrapping an ok status is permitted but meaningless; nothing should ever
/// be raised for success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .status.reason())]
pub struct StatusError {
    status: Status,
}

impl StatusError {
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    pub fn into_status(self) -> Status {
        self.status
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        self.status.reason()
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.status.code()
    }

    #[must_use]
    pub fn code_string(&self) -> &'static str {
        self.status.code_string()
    }
}

impl From<Status> for StatusError {
    fn from(status: Status) -> Self {
        if status.is_ok() {
            debug!("wrapping an ok status as an error");
        }
        Self { status }
    }
}

impl From<StatusError> for Status {
    fn from(err: StatusError) -> Self {
        err.status
    }
}

impl Status {
    /// Wrap this status as a [`StatusError`].
    pub fn into_error(self) -> StatusError {
        StatusError::from(self)
    }

    /// Convert a caught panic payload into a status.
    ///
    /// Payloads that are a [`StatusError`] or a [`Status`] are returned
    /// unchanged. String payloads (from `panic!`) and boxed errors become
    /// [`ErrorCode::UnknownError`] with the message; any other payload
    /// becomes `UnknownError` with a generic description.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<StatusError>() {
            Ok(err) => return Self::from(*err),
            Err(other) => other,
        };
        let payload = match payload.downcast::<Self>() {
            Ok(status) => return *status,
            Err(other) => other,
        };

        if let Some(message) = payload.downcast_ref::<&'static str>() {
            return Self::new(ErrorCode::UnknownError, format!("panic: {message}"));
        }
        if let Some(message) = payload.downcast_ref::<String>() {
            return Self::new(ErrorCode::UnknownError, format!("panic: {message}"));
        }
        if let Some(err) = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
            let err: &(dyn StdError + 'static) = &**err;
            return Self::from_dyn_error(err);
        }

        debug!("panic payload has no recognizable type");
        Self::new(
            ErrorCode::UnknownError,
            "panic: payload of unrecognized type",
        )
    }

    /// Convert an error into a status.
    ///
    /// A [`StatusError`] yields its embedded status. Any other error yields
    /// [`ErrorCode::UnknownError`] with a reason of the form
    /// `"<type>: <message>: <source>: ..."`.
    pub fn from_error<E: StdError + 'static>(err: &E) -> Self {
        let err: &(dyn StdError + 'static) = err;
        match err.downcast_ref::<StatusError>() {
            Some(status_err) => status_err.status().clone(),
            None => describe(type_name::<E>(), err),
        }
    }

    /// Convert a type-erased error into a status.
    ///
    /// Same as [`Status::from_error`], except the concrete type name is not
    /// available and the reason is prefixed with `"error"`.
    pub fn from_dyn_error(err: &(dyn StdError + 'static)) -> Self {
        match err.downcast_ref::<StatusError>() {
            Some(status_err) => status_err.status().clone(),
            None => describe("error", err),
        }
    }
}

fn describe(label: &str, err: &(dyn StdError + 'static)) -> Status {
    let chain = iter::successors(Some(err), |&e| e.source())
        .take(MAX_SOURCE_DEPTH.saturating_add(1))
        .join(": ");
    debug!(error_type = label, "classifying foreign error as UnknownError");
    Status::new(ErrorCode::UnknownError, format!("{label}: {chain}"))
}

/// Run `f`, converting a panic into a failed [`Status`].
///
/// Meant for boundary points such as the top of a worker or a request
/// handler. The panic hook still runs before the payload is converted.
///
/// # Errors
///
/// Returns the status produced by [`Status::from_panic`] if `f` panics.
pub fn catch_unwind_status<F, T>(f: F) -> Result<T, Status>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Status::from_panic)
}
