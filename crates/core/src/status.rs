//! The [`Status`] value type.
//!
//! A `Status` is either ok or a failure carrying an [`ErrorCode`] and a
//! reason string. Success is represented by an empty handle, so creating,
//! copying and checking an ok status never allocates. A failure allocates its
//! payload once; every clone afterwards shares that payload through an
//! [`Arc`], and the payload is freed when the last clone is dropped.
//!
//! # Examples
//!
//! ```
//! use errstat_core::{ErrorCode, Status};
//!
//! fn open(name: &str) -> Status {
//!     if name.is_empty() {
//!         return Status::new(ErrorCode::InvalidArgument, "name must not be empty");
//!     }
//!     Status::OK
//! }
//!
//! assert!(open("db").is_ok());
//!
//! let status = open("");
//! assert_eq!(status, ErrorCode::InvalidArgument);
//! assert_eq!(status.to_string(), "InvalidArgument: name must not be empty");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::bridge::StatusError;
use crate::code::ErrorCode;
use crate::result::StatusResult;

/// Outcome of an operation: ok, or failed with a code and reason.
///
/// Cloning is O(1) and never allocates. Equality compares codes only; two
/// failures with the same code and different reasons are equal.
///
/// The type is `#[must_use]`: a status that is produced and dropped without
/// being examined triggers the `unused_must_use` lint. Call
/// [`Status::ignore`] to discard one on purpose.
#[must_use = "a Status must be checked with `is_ok()` or discarded with `ignore()`"]
#[derive(Clone, Default)]
pub struct Status {
    error: Option<Arc<ErrorInfo>>,
}

/// Shared, immutable failure payload.
#[derive(Debug)]
struct ErrorInfo {
    code: ErrorCode,
    reason: Box<str>,
}

impl Status {
    /// The ok status.
    pub const OK: Self = Self { error: None };

    /// Returns the ok status. Equivalent to [`Status::OK`].
    #[inline]
    pub const fn ok() -> Self {
        Self::OK
    }

    /// Create a failed status, copying `reason` into the shared payload.
    ///
    /// Passing [`ErrorCode::OK`] is a misuse: the result is the ok status and
    /// `reason` is dropped.
    pub fn new(code: ErrorCode, reason: impl Into<String>) -> Self {
        if code == ErrorCode::OK {
            debug!("status constructed with ErrorCode::OK; reason discarded");
            return Self::OK;
        }
        Self {
            error: Some(Arc::new(ErrorInfo {
                code,
                reason: reason.into().into_boxed_str(),
            })),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The failure reason, or `""` for the ok status.
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &str {
        self.error.as_deref().map_or("", |info| &info.reason)
    }

    /// The failure code, or [`ErrorCode::OK`] for the ok status.
    #[inline]
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.error
            .as_deref()
            .map_or(ErrorCode::OK, |info| info.code)
    }

    #[inline]
    #[must_use]
    pub fn code_string(&self) -> &'static str {
        self.code().as_str()
    }

    /// Explicitly discard this status.
    ///
    /// Does nothing. Exists so that deliberately dropping a failure reads as
    /// a decision rather than an oversight.
    #[inline]
    pub const fn ignore(&self) {}

    /// Whether both statuses are failures backed by the same payload.
    #[must_use]
    pub fn shares_payload(&self, other: &Self) -> bool {
        match (&self.error, &other.error) {
            (Some(lhs), Some(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }

    /// Convert into a `Result`, wrapping a failure as [`StatusError`].
    ///
    /// # Errors
    ///
    /// Returns the failure as a [`StatusError`] when the status is not ok.
    pub fn into_result(self) -> StatusResult<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(StatusError::from(self))
        }
    }

    /// Collapse a `Result` produced by [`Status::into_result`] back into a status.
    pub fn from_result(result: StatusResult<()>) -> Self {
        result.map_or_else(StatusError::into_status, |()| Self::OK)
    }

    /// Number of live handles to this status's payload; zero when ok.
    #[cfg(test)]
    pub(crate) fn payload_refs(&self) -> usize {
        self.error.as_ref().map_or(0, Arc::strong_count)
    }

    #[cfg(test)]
    pub(crate) fn payload_watch(&self) -> Option<std::sync::Weak<impl Sized + use<>>> {
        self.error.as_ref().map(Arc::downgrade)
    }
}

impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Status {}

impl PartialEq<ErrorCode> for Status {
    fn eq(&self, other: &ErrorCode) -> bool {
        self.code() == *other
    }
}

impl PartialEq<Status> for ErrorCode {
    fn eq(&self, other: &Status) -> bool {
        *self == other.code()
    }
}

impl Hash for Status {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<ErrorCode> for Status {
    /// A status with `code` and an empty reason.
    fn from(code: ErrorCode) -> Self {
        Self::new(code, String::new())
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error.as_deref() {
            None => f.write_str("Status::OK"),
            Some(info) => f
                .debug_struct("Status")
                .field("code", &info.code)
                .field("reason", &info.reason)
                .finish(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error.as_deref() {
            None => f.write_str(ErrorCode::OK.as_str()),
            Some(info) => write!(f, "{}: {}", info.code, info.reason),
        }
    }
}

#[derive(Serialize)]
struct StatusRef<'a> {
    code: ErrorCode,
    reason: &'a str,
}

#[derive(Deserialize)]
struct StatusRepr {
    code: ErrorCode,
    #[serde(default)]
    reason: String,
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StatusRef {
            code: self.code(),
            reason: self.reason(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = StatusRepr::deserialize(deserializer)?;
        Ok(Self::new(repr.code, repr.reason))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use std::collections::HashSet;
    use std::sync::Barrier;
    use std::thread;

    use super::*;

    #[test]
    fn test_ok_status() {
        let status = Status::OK;
        assert!(status.is_ok());
        assert_eq!(status.code(), ErrorCode::OK);
        assert_eq!(status.reason(), "");
        assert_eq!(status.code_string(), "OK");
        assert_eq!(status.payload_refs(), 0);
    }

    #[test]
    fn test_ok_fn_and_default_match_const() {
        assert!(Status::ok().is_ok());
        assert!(Status::default().is_ok());
        assert_eq!(Status::ok(), Status::OK);
    }

    #[test]
    fn test_failed_status() {
        let status = Status::new(ErrorCode::KeyNotFound, "no key 'id'");
        assert!(!status.is_ok());
        assert_eq!(status.code(), ErrorCode::KeyNotFound);
        assert_eq!(status.reason(), "no key 'id'");
        assert_eq!(status.code_string(), "KeyNotFound");
    }

    #[test]
    fn test_reason_accepts_owned_and_borrowed_text() {
        let owned = String::from("owned");
        let from_owned = Status::new(ErrorCode::RuntimeError, owned);

        let from_borrowed = {
            let buffer = String::from("borrowed");
            Status::new(ErrorCode::RuntimeError, buffer.as_str())
        };

        assert_eq!(from_owned.reason(), "owned");
        assert_eq!(from_borrowed.reason(), "borrowed");
    }

    #[test]
    fn test_new_with_ok_code_is_ok() {
        let status = Status::new(ErrorCode::OK, "ignored");
        assert!(status.is_ok());
        assert_eq!(status.reason(), "");
    }

    #[test]
    fn test_clone_shares_payload() {
        let status = Status::new(ErrorCode::Timeout, "deadline passed");
        let copy = status.clone();

        assert!(copy.shares_payload(&status));
        assert_eq!(status.payload_refs(), 2);
        assert_eq!(copy, status);
        assert_eq!(copy.reason(), status.reason());

        drop(copy);
        assert_eq!(status.payload_refs(), 1);
        assert_eq!(status.reason(), "deadline passed");
    }

    #[test]
    fn test_move_keeps_payload() {
        let status = Status::new(ErrorCode::Unavailable, "backend down");
        let watch = status.payload_watch().unwrap();

        let moved = status;
        assert_eq!(moved.payload_refs(), 1);
        assert_eq!(moved.reason(), "backend down");
        assert_eq!(watch.strong_count(), 1);
    }

    #[test]
    fn test_take_leaves_ok_behind() {
        let mut status = Status::new(ErrorCode::RangeError, "too big");
        let taken = std::mem::take(&mut status);
        assert!(status.is_ok());
        assert_eq!(taken, ErrorCode::RangeError);
    }

    #[test]
    fn test_independent_failures_do_not_share() {
        let a = Status::new(ErrorCode::Timeout, "a");
        let b = Status::new(ErrorCode::Timeout, "a");
        assert!(!a.shares_payload(&b));
        assert!(!Status::OK.shares_payload(&Status::OK));
    }

    #[test]
    fn test_equality_ignores_reason() {
        let a = Status::new(ErrorCode::InvalidArgument, "a");
        let b = Status::new(ErrorCode::InvalidArgument, "b");
        let c = Status::new(ErrorCode::SyntaxError, "a");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Status::OK);
    }

    #[test]
    fn test_equality_with_code() {
        let status = Status::new(ErrorCode::NotSupported, "later");
        assert_eq!(status, ErrorCode::NotSupported);
        assert_eq!(ErrorCode::NotSupported, status);
        assert_ne!(status, ErrorCode::OK);
        assert_eq!(Status::OK, ErrorCode::OK);
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let set: HashSet<Status> = [
            Status::new(ErrorCode::Timeout, "first"),
            Status::new(ErrorCode::Timeout, "second"),
            Status::OK,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_code_has_empty_reason() {
        let status = Status::from(ErrorCode::WrongState);
        assert!(!status.is_ok());
        assert_eq!(status.reason(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::OK.to_string(), "OK");
        assert_eq!(
            Status::new(ErrorCode::FileNotFound, "config.toml").to_string(),
            "FileNotFound: config.toml"
        );
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Status::OK), "Status::OK");
        assert_eq!(
            format!("{:?}", Status::new(ErrorCode::Timeout, "slow")),
            r#"Status { code: Timeout, reason: "slow" }"#
        );
    }

    #[test]
    fn test_into_result() {
        assert!(Status::OK.into_result().is_ok());

        let err = Status::new(ErrorCode::LimitExceeded, "quota")
            .into_result()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::LimitExceeded);
        assert_eq!(err.reason(), "quota");
    }

    #[test]
    fn test_from_result_round_trip() {
        let status = Status::new(ErrorCode::OperationAborted, "cancelled");
        let back = Status::from_result(status.clone().into_result());
        assert!(back.shares_payload(&status));
        assert!(Status::from_result(Ok(())).is_ok());
    }

    #[test]
    fn test_ignore_is_noop() {
        let status = Status::new(ErrorCode::RuntimeError, "best effort");
        status.ignore();
        assert_eq!(status.payload_refs(), 1);
    }

    #[test]
    fn test_serialize_failure() {
        let status = Status::new(ErrorCode::KeyNotFound, "missing 'id'");
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "KeyNotFound", "reason": "missing 'id'" })
        );
    }

    #[test]
    fn test_serialize_ok() {
        let json = serde_json::to_value(Status::OK).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "OK", "reason": "" }));
    }

    #[test]
    fn test_deserialize() {
        let status: Status =
            serde_json::from_str(r#"{ "code": "Timeout", "reason": "took 30s" }"#).unwrap();
        assert_eq!(status, ErrorCode::Timeout);
        assert_eq!(status.reason(), "took 30s");

        let ok: Status = serde_json::from_str(r#"{ "code": "OK", "reason": "stale" }"#).unwrap();
        assert!(ok.is_ok());

        let no_reason: Status = serde_json::from_str(r#"{ "code": "WrongState" }"#).unwrap();
        assert_eq!(no_reason.reason(), "");
    }

    #[test]
    fn test_payload_freed_after_last_thread_drops() {
        const THREADS: usize = 8;

        let status = Status::new(ErrorCode::ConnectionFailed, "peer reset");
        let watch = status.payload_watch().unwrap();
        let barrier = Barrier::new(THREADS);

        thread::scope(|scope| {
            for _ in 0..THREADS {
                let copy = status.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    let inner = copy.clone();
                    assert_eq!(inner.reason(), "peer reset");
                    barrier.wait();
                    drop(inner);
                    drop(copy);
                });
            }
        });

        assert_eq!(watch.strong_count(), 1);
        assert!(watch.upgrade().is_some());

        drop(status);
        assert_eq!(watch.strong_count(), 0);
        assert!(watch.upgrade().is_none());
    }

    #[test]
    fn test_status_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Status>();
    }
}
