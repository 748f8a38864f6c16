//! Built-in error code registry.
//!
//! Every [`Status`](crate::Status) carries one [`ErrorCode`]. Codes are a
//! closed set with stable names and numeric values, grouped into numeric
//! ranges by their primary category:
//!
//! | Range | Category |
//! |---|---|
//! | `0` | success |
//! | `-1` | unknown |
//! | `1000-1999` | runtime (file access `12xx`, network `11xx`, system `1999`) |
//! | `2000-2999` | logic |
//! | `3000-3999` | invalid argument (also logic) |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr, VariantArray};

use crate::error::Error;

/// Error codes carried by a [`Status`](crate::Status).
///
/// The name returned by [`ErrorCode::as_str`] is identical to the variant
/// name and never changes once published.
#[repr(i32)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    IntoStaticStr,
    VariantArray,
    Serialize,
    Deserialize,
)]
pub enum ErrorCode {
    /// Failure that could not be classified, e.g. a caught panic.
    UnknownError = -1,
    /// No error.
    OK = 0,

    // === Runtime (1000-1099) ===
    RuntimeError = 1000,
    RangeError = 1001,
    BrokenInvariant = 1002,
    OutOfMemory = 1003,
    OutOfDiskSpace = 1004,
    OperationAborted = 1005,
    LimitExceeded = 1006,
    Timeout = 1007,
    Unavailable = 1008,
    ObjectAlreadyExists = 1009,

    // === Network (1100-1199) ===
    ConnectionClosed = 1100,
    ConnectionFailed = 1101,
    TlsHandshakeFailed = 1102,

    // === File access (1200-1299) ===
    FileOperationFailed = 1200,
    PermissionDenied = 1201,
    FileNotFound = 1202,
    FileAlreadyExists = 1203,
    InvalidFile = 1204,

    /// Error reported by the operating system.
    SystemError = 1999,

    // === Logic (2000-2999) ===
    LogicError = 2000,
    NotSupported = 2001,
    IllegalOperation = 2002,
    WrongState = 2003,
    KeyNotFound = 2004,
    SerializationError = 2005,

    // === Invalid argument (3000-3999) ===
    InvalidArgument = 3000,
    OutOfBounds = 3001,
    SyntaxError = 3002,
    InvalidName = 3003,
    TypeMismatch = 3004,
    MissingValue = 3005,
    NoSuchObject = 3006,
}

impl ErrorCode {
    /// Every code, in ascending numeric order.
    pub const ALL: &'static [Self] = <Self as VariantArray>::VARIANTS;

    /// Stable string identifier of this code.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Numeric value of this code.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Look up a code by its numeric value.
    #[must_use]
    pub fn from_value(value: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.value() == value)
    }

    /// Categories this code belongs to.
    #[must_use]
    pub const fn categories(self) -> ErrorCategories {
        use ErrorCategory::{FileAccess, InvalidArgument, Logic, Network, Runtime, System};

        match self {
            Self::OK => ErrorCategories::NONE,
            Self::UnknownError
            | Self::RuntimeError
            | Self::RangeError
            | Self::BrokenInvariant
            | Self::OutOfMemory
            | Self::OutOfDiskSpace
            | Self::OperationAborted
            | Self::LimitExceeded
            | Self::Timeout
            | Self::Unavailable
            | Self::ObjectAlreadyExists => ErrorCategories::NONE.with(Runtime),
            Self::ConnectionClosed | Self::ConnectionFailed | Self::TlsHandshakeFailed => {
                ErrorCategories::NONE.with(Runtime).with(Network)
            }
            Self::FileOperationFailed
            | Self::PermissionDenied
            | Self::FileNotFound
            | Self::FileAlreadyExists
            | Self::InvalidFile => ErrorCategories::NONE.with(Runtime).with(FileAccess),
            Self::SystemError => ErrorCategories::NONE.with(Runtime).with(System),
            Self::LogicError
            | Self::NotSupported
            | Self::IllegalOperation
            | Self::WrongState
            | Self::KeyNotFound
            | Self::SerializationError => ErrorCategories::NONE.with(Logic),
            Self::InvalidArgument
            | Self::OutOfBounds
            | Self::SyntaxError
            | Self::InvalidName
            | Self::TypeMismatch
            | Self::MissingValue
            | Self::NoSuchObject => ErrorCategories::NONE.with(Logic).with(InvalidArgument),
        }
    }

    /// Whether this code belongs to `category`.
    #[inline]
    #[must_use]
    pub const fn is_a(self, category: ErrorCategory) -> bool {
        self.categories().contains(category)
    }
}

impl FromStr for ErrorCode {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == name)
            .ok_or_else(|| Error::unknown_code(name))
    }
}

/// Broad classification of error codes.
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    IntoStaticStr,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Logic = 0b0000_0001,
    Runtime = 0b0000_0010,
    InvalidArgument = 0b0000_0100,
    FileAccess = 0b0000_1000,
    System = 0b0001_0000,
    Network = 0b0010_0000,
}

impl ErrorCategory {
    pub const ALL: &'static [Self] = <Self as VariantArray>::VARIANTS;

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    const fn bit(self) -> u8 {
        self as u8
    }
}

impl FromStr for ErrorCategory {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| Error::unknown_category(name))
    }
}

/// Set of [`ErrorCategory`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ErrorCategories(u8);

impl ErrorCategories {
    pub const NONE: Self = Self(0);

    /// Returns this set with `category` added.
    #[must_use]
    pub const fn with(self, category: ErrorCategory) -> Self {
        Self(self.0 | category.bit())
    }

    #[must_use]
    pub const fn contains(self, category: ErrorCategory) -> bool {
        self.0 & category.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member categories in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ErrorCategory> {
        ErrorCategory::ALL
            .iter()
            .copied()
            .filter(move |category| self.contains(*category))
    }
}
