//! # errstat-core
//!
//! A cheap, thread-safe error status value.
//!
//! [`Status`] is either ok or a failure carrying an [`ErrorCode`] and a
//! reason. The ok status is an empty handle and never allocates; a failure
//! allocates one shared, immutable payload that every clone reuses.
//!
//! # Modules
//!
//! - [`code`]: the built-in error code registry
//! - [`status`]: the `Status` value type
//! - [`bridge`]: conversions to and from `std::error::Error` and panics
//! - [`error`]: error type for errstat's own fallible operations
//! - [`result`]: `Result` aliases and the `ResultExt` trait

pub mod bridge;
pub mod code;
pub mod error;
pub mod result;
pub mod status;

pub use bridge::{MAX_SOURCE_DEPTH, StatusError, catch_unwind_status};
pub use code::{ErrorCategories, ErrorCategory, ErrorCode};
pub use error::Error;
pub use result::{Result, ResultExt, StatusResult};
pub use status::Status;
