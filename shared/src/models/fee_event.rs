//! Fee Event Model (collection campaign)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fee event entity
///
/// `amount` is looked up live when reporting, so editing it re-prices
/// every payment already collected against the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FeeEvent {
    pub id: i64,
    pub team_id: i64,
    pub title: String,
    /// Integer currency units
    pub amount: i64,
    pub due_date: NaiveDate,
    pub note: String,
    pub created_at: i64,
}

/// Create fee event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEventCreate {
    pub title: String,
    pub amount: i64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub note: String,
}

/// Update fee event payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeEventUpdate {
    pub title: Option<String>,
    pub amount: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub note: Option<String>,
}
