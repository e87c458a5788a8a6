//! Database access layer
//!
//! The ledger only talks to storage through the [`Store`] trait. Every
//! method on a team-owned table takes the `team_id` it is scoped to; rows of
//! other teams are invisible to it, exactly as if they did not exist.
//!
//! Two implementations:
//! - [`PgStore`]: PostgreSQL via sqlx (production)
//! - [`MemoryStore`]: in-process tables (tests, local development)

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    Expense, ExpenseCreate, ExpenseUpdate, FeeEvent, FeeEventCreate, FeeEventUpdate, Member,
    MemberCreate, MemberStatus, MemberUpdate, Payment, PaymentMethod, PaymentStatus, Profile, Team,
};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Duplicate(db.message().to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Payment list filter (all conditions are ANDed with the team scope)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub fee_event_id: Option<i64>,
    pub member_id: Option<i64>,
}

impl PaymentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_event(fee_event_id: i64) -> Self {
        Self {
            fee_event_id: Some(fee_event_id),
            member_id: None,
        }
    }

    pub fn by_member(member_id: i64) -> Self {
        Self {
            fee_event_id: None,
            member_id: Some(member_id),
        }
    }

    pub fn matches(&self, payment: &Payment) -> bool {
        self.fee_event_id.is_none_or(|id| payment.fee_event_id == id)
            && self.member_id.is_none_or(|id| payment.member_id == id)
    }
}

/// Key of a payment row to generate (always inserted unpaid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentSeed {
    pub member_id: i64,
    pub fee_event_id: i64,
}

/// Full set of status columns, always written together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentWrite {
    pub status: PaymentStatus,
    pub paid_at: Option<NaiveDate>,
    pub method: Option<PaymentMethod>,
    pub note: String,
}

/// Data-access interface consumed by the ledger
#[async_trait]
pub trait Store: Send + Sync {
    // ── Identity (not team scoped) ──

    async fn find_profile(&self, profile_id: &str) -> StoreResult<Option<Profile>>;

    // ── Teams ──

    /// Create a team with `profile_id` as its admin in one atomic step.
    ///
    /// `None`, with nothing written, when the profile already belongs to a
    /// team.
    async fn create_team_with_admin(
        &self,
        team_name: &str,
        profile_id: &str,
        display_name: &str,
    ) -> StoreResult<Option<(Team, Profile)>>;
    /// Attach a profile to `team_id` in one atomic step.
    ///
    /// New and teamless profiles join as members. A profile already on
    /// `team_id` keeps its role and takes the new display name. `None` when
    /// the profile belongs to another team.
    async fn join_team(
        &self,
        team_id: i64,
        profile_id: &str,
        display_name: &str,
    ) -> StoreResult<Option<Profile>>;
    async fn find_team(&self, team_id: i64) -> StoreResult<Option<Team>>;
    async fn rename_team(&self, team_id: i64, name: &str) -> StoreResult<Option<Team>>;

    // ── Members ──

    /// Ordered by furigana ascending (code point order)
    async fn list_members(&self, team_id: i64) -> StoreResult<Vec<Member>>;
    async fn list_members_by_status(
        &self,
        team_id: i64,
        status: MemberStatus,
    ) -> StoreResult<Vec<Member>>;
    async fn find_member(&self, team_id: i64, id: i64) -> StoreResult<Option<Member>>;
    async fn find_members_by_ids(&self, team_id: i64, ids: &[i64]) -> StoreResult<Vec<Member>>;
    async fn insert_member(&self, team_id: i64, data: &MemberCreate) -> StoreResult<Member>;
    async fn update_member(
        &self,
        team_id: i64,
        id: i64,
        data: &MemberUpdate,
    ) -> StoreResult<Option<Member>>;
    /// Hard delete; payment rows of the member go with it
    async fn delete_member(&self, team_id: i64, id: i64) -> StoreResult<bool>;

    // ── Fee events ──

    /// Ordered by due date descending
    async fn list_fee_events(&self, team_id: i64) -> StoreResult<Vec<FeeEvent>>;
    async fn find_fee_event(&self, team_id: i64, id: i64) -> StoreResult<Option<FeeEvent>>;
    async fn find_fee_events_by_ids(
        &self,
        team_id: i64,
        ids: &[i64],
    ) -> StoreResult<Vec<FeeEvent>>;
    async fn insert_fee_event(&self, team_id: i64, data: &FeeEventCreate)
    -> StoreResult<FeeEvent>;
    async fn update_fee_event(
        &self,
        team_id: i64,
        id: i64,
        data: &FeeEventUpdate,
    ) -> StoreResult<Option<FeeEvent>>;
    /// Hard delete; payment rows of the event go with it
    async fn delete_fee_event(&self, team_id: i64, id: i64) -> StoreResult<bool>;

    // ── Payments ──

    async fn list_payments(&self, team_id: i64, filter: PaymentFilter)
    -> StoreResult<Vec<Payment>>;
    async fn find_payment(&self, team_id: i64, id: i64) -> StoreResult<Option<Payment>>;
    /// Insert unpaid rows, silently skipping any (member, fee event) pair that
    /// already has a row. Returns the number of rows actually inserted.
    async fn insert_payments_ignore_duplicates(
        &self,
        team_id: i64,
        seeds: &[PaymentSeed],
    ) -> StoreResult<u64>;
    /// Atomically overwrite the status columns of one payment
    async fn write_payment_status(
        &self,
        team_id: i64,
        id: i64,
        write: &PaymentWrite,
    ) -> StoreResult<Option<Payment>>;

    // ── Expenses ──

    /// Ordered by date descending
    async fn list_expenses(&self, team_id: i64) -> StoreResult<Vec<Expense>>;
    async fn find_expense(&self, team_id: i64, id: i64) -> StoreResult<Option<Expense>>;
    async fn insert_expense(&self, team_id: i64, data: &ExpenseCreate) -> StoreResult<Expense>;
    async fn update_expense(
        &self,
        team_id: i64,
        id: i64,
        data: &ExpenseUpdate,
    ) -> StoreResult<Option<Expense>>;
    async fn delete_expense(&self, team_id: i64, id: i64) -> StoreResult<bool>;
}
