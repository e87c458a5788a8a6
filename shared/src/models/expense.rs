//! Expense Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categories offered by the client when logging an expense.
///
/// The ledger itself accepts any non-empty category.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "練習場代",
    "遠征費",
    "備品購入",
    "懇親会",
    "大会参加費",
    "交通費",
    "その他",
];

/// Expense entity (outflow)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: i64,
    pub team_id: i64,
    pub date: NaiveDate,
    pub amount: i64,
    pub category: String,
    pub note: String,
    /// Free text naming whoever logged the expense
    pub registered_by: String,
    pub created_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub date: NaiveDate,
    pub amount: i64,
    pub category: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub registered_by: String,
}

/// Update expense payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<i64>,
    pub category: Option<String>,
    pub note: Option<String>,
    pub registered_by: Option<String>,
}
