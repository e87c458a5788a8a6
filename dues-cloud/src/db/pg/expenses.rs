//! Expenses table

use shared::models::{Expense, ExpenseCreate, ExpenseUpdate};
use sqlx::PgPool;

use crate::db::StoreResult;

const COLUMNS: &str = "id, team_id, date, amount, category, note, registered_by, created_at";

pub async fn list(pool: &PgPool, team_id: i64) -> StoreResult<Vec<Expense>> {
    let sql =
        format!("SELECT {COLUMNS} FROM expenses WHERE team_id = $1 ORDER BY date DESC, id DESC");
    let rows = sqlx::query_as(&sql).bind(team_id).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, team_id: i64, id: i64) -> StoreResult<Option<Expense>> {
    let sql = format!("SELECT {COLUMNS} FROM expenses WHERE team_id = $1 AND id = $2");
    let row = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert(pool: &PgPool, team_id: i64, data: &ExpenseCreate) -> StoreResult<Expense> {
    let sql = format!(
        "INSERT INTO expenses (id, team_id, date, amount, category, note, registered_by, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as(&sql)
        .bind(shared::util::snowflake_id())
        .bind(team_id)
        .bind(data.date)
        .bind(data.amount)
        .bind(&data.category)
        .bind(&data.note)
        .bind(&data.registered_by)
        .bind(shared::util::now_millis())
        .fetch_one(pool)
        .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    team_id: i64,
    id: i64,
    data: &ExpenseUpdate,
) -> StoreResult<Option<Expense>> {
    let sql = format!(
        "UPDATE expenses SET
            date = COALESCE($3, date),
            amount = COALESCE($4, amount),
            category = COALESCE($5, category),
            note = COALESCE($6, note),
            registered_by = COALESCE($7, registered_by)
         WHERE team_id = $1 AND id = $2
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .bind(data.date)
        .bind(data.amount)
        .bind(&data.category)
        .bind(&data.note)
        .bind(&data.registered_by)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, team_id: i64, id: i64) -> StoreResult<bool> {
    let rows = sqlx::query("DELETE FROM expenses WHERE team_id = $1 AND id = $2")
        .bind(team_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
