//! Unified error codes for the comanda workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Tab errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// No session for the request
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session idle past the timeout
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Tab ====================
    TabNotFound = 4001,
    TabAlreadyPaid = 4002,
    TabAlreadyReady = 4003,
    CartLineNotFound = 4006,
    /// Cart is empty, nothing to send
    TabEmpty = 4007,
    /// Status write does not follow novo -> pago -> pronto
    InvalidStatusTransition = 4008,
    /// No table number or client name chosen
    TabTargetMissing = 4009,

    // ==================== 6xxx: Catalog ====================
    ProductNotFound = 6001,
    ProductUnavailable = 6003,
    OptionNotFound = 6301,
    /// Option kind not allowed by the product flags
    OptionNotAllowed = 6302,
    TooManyOptions = 6303,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric value of the code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default message for the code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Tab
            ErrorCode::TabNotFound => "Tab not found",
            ErrorCode::TabAlreadyPaid => "Tab has already been paid",
            ErrorCode::TabAlreadyReady => "Tab is already ready",
            ErrorCode::CartLineNotFound => "Cart line not found",
            ErrorCode::TabEmpty => "Cart is empty",
            ErrorCode::InvalidStatusTransition => "Invalid tab status transition",
            ErrorCode::TabTargetMissing => "Table number or client name is required",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductUnavailable => "Product is not available",
            ErrorCode::OptionNotFound => "Option not found",
            ErrorCode::OptionNotAllowed => "Option not allowed for this product",
            ErrorCode::TooManyOptions => "Too many options selected",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Returned when a u16 does not name a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Tab
            4001 => Ok(ErrorCode::TabNotFound),
            4002 => Ok(ErrorCode::TabAlreadyPaid),
            4003 => Ok(ErrorCode::TabAlreadyReady),
            4006 => Ok(ErrorCode::CartLineNotFound),
            4007 => Ok(ErrorCode::TabEmpty),
            4008 => Ok(ErrorCode::InvalidStatusTransition),
            4009 => Ok(ErrorCode::TabTargetMissing),

            // Catalog
            6001 => Ok(ErrorCode::ProductNotFound),
            6003 => Ok(ErrorCode::ProductUnavailable),
            6301 => Ok(ErrorCode::OptionNotFound),
            6302 => Ok(ErrorCode::OptionNotAllowed),
            6303 => Ok(ErrorCode::TooManyOptions),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
