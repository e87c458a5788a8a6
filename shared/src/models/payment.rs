//! Payment Model
//!
//! One row per (member, fee event) pair. Rows are created unpaid by bulk
//! generation and only ever flip between unpaid and paid afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{FeeEvent, Member};
use crate::error::{AppError, ErrorCode};

/// Payment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(AppError::with_message(
                ErrorCode::PaymentInvalidStatus,
                format!("unknown payment status: {other}"),
            )),
        }
    }
}

/// How a fee was settled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other => "other",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            "other" => Ok(PaymentMethod::Other),
            other => Err(AppError::with_message(
                ErrorCode::PaymentInvalidMethod,
                format!("unknown payment method: {other}"),
            )),
        }
    }
}

/// Payment entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub team_id: i64,
    pub member_id: i64,
    pub fee_event_id: i64,
    pub status: PaymentStatus,
    /// Set only while paid
    pub paid_at: Option<NaiveDate>,
    /// Set only while paid
    pub method: Option<PaymentMethod>,
    pub note: String,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

/// Status transition payload
///
/// `method`, `note` and `paid_at` are only meaningful for a transition to
/// paid; they are ignored (and cleared) on a transition to unpaid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentStatusUpdate {
    pub status: PaymentStatus,
    pub method: Option<PaymentMethod>,
    pub note: Option<String>,
    pub paid_at: Option<NaiveDate>,
}

impl PaymentStatusUpdate {
    pub fn paid() -> Self {
        Self {
            status: PaymentStatus::Paid,
            ..Default::default()
        }
    }

    pub fn unpaid() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_paid_at(mut self, paid_at: NaiveDate) -> Self {
        self.paid_at = Some(paid_at);
        self
    }
}

/// Payment joined with its member and fee event (for list/detail views)
///
/// Either side may be missing if the referenced row is gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: Payment,
    pub member: Option<Member>,
    pub fee_event: Option<FeeEvent>,
}
