//! Fee events table

use shared::models::{FeeEvent, FeeEventCreate, FeeEventUpdate};
use sqlx::PgPool;

use crate::db::StoreResult;

const COLUMNS: &str = "id, team_id, title, amount, due_date, note, created_at";

pub async fn list(pool: &PgPool, team_id: i64) -> StoreResult<Vec<FeeEvent>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM fee_events WHERE team_id = $1 ORDER BY due_date DESC, id DESC"
    );
    let rows = sqlx::query_as(&sql).bind(team_id).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, team_id: i64, id: i64) -> StoreResult<Option<FeeEvent>> {
    let sql = format!("SELECT {COLUMNS} FROM fee_events WHERE team_id = $1 AND id = $2");
    let row = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_ids(pool: &PgPool, team_id: i64, ids: &[i64]) -> StoreResult<Vec<FeeEvent>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("SELECT {COLUMNS} FROM fee_events WHERE team_id = $1 AND id = ANY($2)");
    let rows = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn insert(pool: &PgPool, team_id: i64, data: &FeeEventCreate) -> StoreResult<FeeEvent> {
    let sql = format!(
        "INSERT INTO fee_events (id, team_id, title, amount, due_date, note, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as(&sql)
        .bind(shared::util::snowflake_id())
        .bind(team_id)
        .bind(&data.title)
        .bind(data.amount)
        .bind(data.due_date)
        .bind(&data.note)
        .bind(shared::util::now_millis())
        .fetch_one(pool)
        .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    team_id: i64,
    id: i64,
    data: &FeeEventUpdate,
) -> StoreResult<Option<FeeEvent>> {
    let sql = format!(
        "UPDATE fee_events SET
            title = COALESCE($3, title),
            amount = COALESCE($4, amount),
            due_date = COALESCE($5, due_date),
            note = COALESCE($6, note)
         WHERE team_id = $1 AND id = $2
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .bind(&data.title)
        .bind(data.amount)
        .bind(data.due_date)
        .bind(&data.note)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Payments referencing the event are removed by `ON DELETE CASCADE`
pub async fn delete(pool: &PgPool, team_id: i64, id: i64) -> StoreResult<bool> {
    let rows = sqlx::query("DELETE FROM fee_events WHERE team_id = $1 AND id = $2")
        .bind(team_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
