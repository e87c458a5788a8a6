//! Unified error codes for the dues ledger
//!
//! This module defines all error codes returned by the service and consumed by clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Team errors
//! - 4xxx: Member errors
//! - 5xxx: Fee event errors
//! - 6xxx: Payment errors
//! - 7xxx: Expense errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Caller identity could not be resolved
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Team ====================
    /// Caller is not associated with a team yet
    TeamNotSelected = 3001,
    /// Team not found
    TeamNotFound = 3002,

    // ==================== 4xxx: Member ====================
    /// Member not found
    MemberNotFound = 4001,

    // ==================== 5xxx: Fee event ====================
    /// Fee event not found
    FeeEventNotFound = 5001,
    /// Fee amount is negative
    FeeEventInvalidAmount = 5002,

    // ==================== 6xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 6001,
    /// Unknown payment status
    PaymentInvalidStatus = 6002,
    /// Unknown payment method
    PaymentInvalidMethod = 6003,

    // ==================== 7xxx: Expense ====================
    /// Expense not found
    ExpenseNotFound = 7001,
    /// Expense amount is negative
    ExpenseInvalidAmount = 7002,
    /// Expense category is empty
    ExpenseCategoryRequired = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Team
            ErrorCode::TeamNotSelected => "User does not belong to a team",
            ErrorCode::TeamNotFound => "Team not found",

            // Member
            ErrorCode::MemberNotFound => "Member not found",

            // Fee event
            ErrorCode::FeeEventNotFound => "Fee event not found",
            ErrorCode::FeeEventInvalidAmount => "Fee amount must not be negative",

            // Payment
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentInvalidStatus => "Invalid payment status",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",

            // Expense
            ErrorCode::ExpenseNotFound => "Expense not found",
            ErrorCode::ExpenseInvalidAmount => "Expense amount must not be negative",
            ErrorCode::ExpenseCategoryRequired => "Expense category is required",

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

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Team
            3001 => Ok(ErrorCode::TeamNotSelected),
            3002 => Ok(ErrorCode::TeamNotFound),

            // Member
            4001 => Ok(ErrorCode::MemberNotFound),

            // Fee event
            5001 => Ok(ErrorCode::FeeEventNotFound),
            5002 => Ok(ErrorCode::FeeEventInvalidAmount),

            // Payment
            6001 => Ok(ErrorCode::PaymentNotFound),
            6002 => Ok(ErrorCode::PaymentInvalidStatus),
            6003 => Ok(ErrorCode::PaymentInvalidMethod),

            // Expense
            7001 => Ok(ErrorCode::ExpenseNotFound),
            7002 => Ok(ErrorCode::ExpenseInvalidAmount),
            7003 => Ok(ErrorCode::ExpenseCategoryRequired),

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
