//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Team errors
/// - 4xxx: Member errors
/// - 5xxx: Fee event errors
/// - 6xxx: Payment errors
/// - 7xxx: Expense errors
/// - 8xxx and above: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Team errors (3xxx)
    Team,
    /// Member errors (4xxx)
    Member,
    /// Fee event errors (5xxx)
    FeeEvent,
    /// Payment errors (6xxx)
    Payment,
    /// Expense errors (7xxx)
    Expense,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Team,
            4000..5000 => Self::Member,
            5000..6000 => Self::FeeEvent,
            6000..7000 => Self::Payment,
            7000..8000 => Self::Expense,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Team => "team",
            Self::Member => "member",
            Self::FeeEvent => "fee_event",
            Self::Payment => "payment",
            Self::Expense => "expense",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2003), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Team);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Member);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::FeeEvent);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Expense);
        assert_eq!(ErrorCategory::from_code(8500), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::AdminRequired.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::TeamNotSelected.category(), ErrorCategory::Team);
        assert_eq!(ErrorCode::PaymentNotFound.category(), ErrorCategory::Payment);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::FeeEvent).unwrap();
        assert_eq!(json, "\"fee_event\"");

        let category: ErrorCategory = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(category, ErrorCategory::Expense);
    }
}
