//! Report Models
//!
//! Plain tabular rows produced by the aggregation engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bucket width for financial summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    /// Bucket key for a date: `YYYY-MM` or `YYYY`
    pub fn bucket(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Monthly => date.format("%Y-%m").to_string(),
            Granularity::Yearly => date.format("%Y").to_string(),
        }
    }
}

/// Income/expense/balance of one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub bucket: String,
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

/// Sum of summary rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

/// Summary report: rows plus totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub granularity: Granularity,
    pub rows: Vec<SummaryRow>,
    pub totals: ReportTotals,
}

/// Expense total of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub amount: i64,
    /// Share of total expense, 0..=100
    pub percentage: f64,
}

/// Activity feed entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Income,
    Expense,
}

/// Dashboard activity feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub title: String,
    pub date: NaiveDate,
    pub amount: i64,
}

/// Dashboard overview of a team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub active_members: usize,
    pub total_income: i64,
    pub total_expense: i64,
    pub balance: i64,
    pub unpaid_count: usize,
    pub recent_activity: Vec<Activity>,
}

/// Collection progress over a set of payment rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionProgress {
    pub total: usize,
    pub paid: usize,
    pub unpaid: usize,
    /// Sum of current fee amounts of paid rows
    pub collected: i64,
    /// Sum of current fee amounts of all rows
    pub expected: i64,
    /// Rounded paid/total percentage, 0 when there are no rows
    pub rate_percent: u32,
}
