//! Payments table

use chrono::NaiveDate;
use shared::models::{Payment, PaymentMethod, PaymentStatus};
use sqlx::PgPool;

use super::decode_enum;
use crate::db::{PaymentFilter, PaymentSeed, PaymentWrite, StoreResult};

const COLUMNS: &str = "id, team_id, member_id, fee_event_id, status, paid_at, method, note";

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    team_id: i64,
    member_id: i64,
    fee_event_id: i64,
    status: String,
    paid_at: Option<NaiveDate>,
    method: Option<String>,
    note: String,
}

impl PaymentRow {
    fn into_payment(self) -> StoreResult<Payment> {
        let method = self
            .method
            .as_deref()
            .map(|m| decode_enum::<PaymentMethod>("payments.method", m))
            .transpose()?;
        Ok(Payment {
            id: self.id,
            team_id: self.team_id,
            member_id: self.member_id,
            fee_event_id: self.fee_event_id,
            status: decode_enum::<PaymentStatus>("payments.status", &self.status)?,
            paid_at: self.paid_at,
            method,
            note: self.note,
        })
    }
}

pub async fn list(pool: &PgPool, team_id: i64, filter: PaymentFilter) -> StoreResult<Vec<Payment>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM payments
         WHERE team_id = $1
           AND ($2::BIGINT IS NULL OR fee_event_id = $2)
           AND ($3::BIGINT IS NULL OR member_id = $3)
         ORDER BY id"
    );
    let rows: Vec<PaymentRow> = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(filter.fee_event_id)
        .bind(filter.member_id)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(PaymentRow::into_payment).collect()
}

pub async fn find(pool: &PgPool, team_id: i64, id: i64) -> StoreResult<Option<Payment>> {
    let sql = format!("SELECT {COLUMNS} FROM payments WHERE team_id = $1 AND id = $2");
    let row: Option<PaymentRow> = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(PaymentRow::into_payment).transpose()
}

/// Bulk insert in one statement; the `(member_id, fee_event_id)` unique
/// constraint makes concurrent generation runs converge on one row per pair.
pub async fn insert_ignore_duplicates(
    pool: &PgPool,
    team_id: i64,
    seeds: &[PaymentSeed],
) -> StoreResult<u64> {
    if seeds.is_empty() {
        return Ok(0);
    }
    let member_ids: Vec<i64> = seeds.iter().map(|s| s.member_id).collect();
    let event_ids: Vec<i64> = seeds.iter().map(|s| s.fee_event_id).collect();

    let result = sqlx::query(
        r#"
        INSERT INTO payments (team_id, member_id, fee_event_id, status, paid_at, method, note)
        SELECT $1, t.member_id, t.fee_event_id, 'unpaid', NULL, NULL, ''
        FROM UNNEST($2::BIGINT[], $3::BIGINT[]) AS t(member_id, fee_event_id)
        ON CONFLICT (member_id, fee_event_id) DO NOTHING
        "#,
    )
    .bind(team_id)
    .bind(&member_ids)
    .bind(&event_ids)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn write_status(
    pool: &PgPool,
    team_id: i64,
    id: i64,
    write: &PaymentWrite,
) -> StoreResult<Option<Payment>> {
    let sql = format!(
        "UPDATE payments SET status = $3, paid_at = $4, method = $5, note = $6
         WHERE team_id = $1 AND id = $2
         RETURNING {COLUMNS}"
    );
    let row: Option<PaymentRow> = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .bind(write.status.as_str())
        .bind(write.paid_at)
        .bind(write.method.map(|m| m.as_str()))
        .bind(&write.note)
        .fetch_optional(pool)
        .await?;
    row.map(PaymentRow::into_payment).transpose()
}
