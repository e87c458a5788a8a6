//! PostgreSQL store
//!
//! Each table module holds free functions taking `&PgPool`; [`PgStore`]
//! wires them into the [`Store`] trait.

mod expenses;
mod fee_events;
mod members;
mod payments;
mod teams;

use async_trait::async_trait;
use shared::models::{
    Expense, ExpenseCreate, ExpenseUpdate, FeeEvent, FeeEventCreate, FeeEventUpdate, Member,
    MemberCreate, MemberStatus, MemberUpdate, Payment, Profile, Team,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{PaymentFilter, PaymentSeed, PaymentWrite, Store, StoreError, StoreResult};

/// Decode a text column into one of the shared enums
fn decode_enum<T>(column: &str, raw: &str) -> StoreResult<T>
where
    T: std::str::FromStr<Err = shared::error::AppError>,
{
    raw.parse()
        .map_err(|e: shared::error::AppError| StoreError::Database(format!("{column}: {e}")))
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, then apply pending migrations
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(format!("migration failed: {e}")))?;

        tracing::info!("Database connected and migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_profile(&self, profile_id: &str) -> StoreResult<Option<Profile>> {
        teams::find_profile(&self.pool, profile_id).await
    }

    async fn create_team_with_admin(
        &self,
        team_name: &str,
        profile_id: &str,
        display_name: &str,
    ) -> StoreResult<Option<(Team, Profile)>> {
        teams::create_team_with_admin(&self.pool, team_name, profile_id, display_name).await
    }

    async fn join_team(
        &self,
        team_id: i64,
        profile_id: &str,
        display_name: &str,
    ) -> StoreResult<Option<Profile>> {
        teams::join_team(&self.pool, team_id, profile_id, display_name).await
    }

    async fn find_team(&self, team_id: i64) -> StoreResult<Option<Team>> {
        teams::find_team(&self.pool, team_id).await
    }

    async fn rename_team(&self, team_id: i64, name: &str) -> StoreResult<Option<Team>> {
        teams::rename_team(&self.pool, team_id, name).await
    }

    async fn list_members(&self, team_id: i64) -> StoreResult<Vec<Member>> {
        members::list(&self.pool, team_id, None).await
    }

    async fn list_members_by_status(
        &self,
        team_id: i64,
        status: MemberStatus,
    ) -> StoreResult<Vec<Member>> {
        members::list(&self.pool, team_id, Some(status)).await
    }

    async fn find_member(&self, team_id: i64, id: i64) -> StoreResult<Option<Member>> {
        members::find(&self.pool, team_id, id).await
    }

    async fn find_members_by_ids(&self, team_id: i64, ids: &[i64]) -> StoreResult<Vec<Member>> {
        members::find_by_ids(&self.pool, team_id, ids).await
    }

    async fn insert_member(&self, team_id: i64, data: &MemberCreate) -> StoreResult<Member> {
        members::insert(&self.pool, team_id, data).await
    }

    async fn update_member(
        &self,
        team_id: i64,
        id: i64,
        data: &MemberUpdate,
    ) -> StoreResult<Option<Member>> {
        members::update(&self.pool, team_id, id, data).await
    }

    async fn delete_member(&self, team_id: i64, id: i64) -> StoreResult<bool> {
        members::delete(&self.pool, team_id, id).await
    }

    async fn list_fee_events(&self, team_id: i64) -> StoreResult<Vec<FeeEvent>> {
        fee_events::list(&self.pool, team_id).await
    }

    async fn find_fee_event(&self, team_id: i64, id: i64) -> StoreResult<Option<FeeEvent>> {
        fee_events::find(&self.pool, team_id, id).await
    }

    async fn find_fee_events_by_ids(
        &self,
        team_id: i64,
        ids: &[i64],
    ) -> StoreResult<Vec<FeeEvent>> {
        fee_events::find_by_ids(&self.pool, team_id, ids).await
    }

    async fn insert_fee_event(
        &self,
        team_id: i64,
        data: &FeeEventCreate,
    ) -> StoreResult<FeeEvent> {
        fee_events::insert(&self.pool, team_id, data).await
    }

    async fn update_fee_event(
        &self,
        team_id: i64,
        id: i64,
        data: &FeeEventUpdate,
    ) -> StoreResult<Option<FeeEvent>> {
        fee_events::update(&self.pool, team_id, id, data).await
    }

    async fn delete_fee_event(&self, team_id: i64, id: i64) -> StoreResult<bool> {
        fee_events::delete(&self.pool, team_id, id).await
    }

    async fn list_payments(
        &self,
        team_id: i64,
        filter: PaymentFilter,
    ) -> StoreResult<Vec<Payment>> {
        payments::list(&self.pool, team_id, filter).await
    }

    async fn find_payment(&self, team_id: i64, id: i64) -> StoreResult<Option<Payment>> {
        payments::find(&self.pool, team_id, id).await
    }

    async fn insert_payments_ignore_duplicates(
        &self,
        team_id: i64,
        seeds: &[PaymentSeed],
    ) -> StoreResult<u64> {
        payments::insert_ignore_duplicates(&self.pool, team_id, seeds).await
    }

    async fn write_payment_status(
        &self,
        team_id: i64,
        id: i64,
        write: &PaymentWrite,
    ) -> StoreResult<Option<Payment>> {
        payments::write_status(&self.pool, team_id, id, write).await
    }

    async fn list_expenses(&self, team_id: i64) -> StoreResult<Vec<Expense>> {
        expenses::list(&self.pool, team_id).await
    }

    async fn find_expense(&self, team_id: i64, id: i64) -> StoreResult<Option<Expense>> {
        expenses::find(&self.pool, team_id, id).await
    }

    async fn insert_expense(&self, team_id: i64, data: &ExpenseCreate) -> StoreResult<Expense> {
        expenses::insert(&self.pool, team_id, data).await
    }

    async fn update_expense(
        &self,
        team_id: i64,
        id: i64,
        data: &ExpenseUpdate,
    ) -> StoreResult<Option<Expense>> {
        expenses::update(&self.pool, team_id, id, data).await
    }

    async fn delete_expense(&self, team_id: i64, id: i64) -> StoreResult<bool> {
        expenses::delete(&self.pool, team_id, id).await
    }
}
