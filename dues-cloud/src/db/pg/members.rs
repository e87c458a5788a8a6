//! Member roster table

use shared::models::{Member, MemberCreate, MemberStatus, MemberUpdate};
use sqlx::PgPool;

use super::decode_enum;
use crate::db::StoreResult;

const COLUMNS: &str =
    "id, team_id, name, furigana, position, contact, address, status, created_at";

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    team_id: i64,
    name: String,
    furigana: String,
    position: String,
    contact: String,
    address: String,
    status: String,
    created_at: i64,
}

impl MemberRow {
    fn into_member(self) -> StoreResult<Member> {
        Ok(Member {
            id: self.id,
            team_id: self.team_id,
            name: self.name,
            furigana: self.furigana,
            position: self.position,
            contact: self.contact,
            address: self.address,
            status: decode_enum::<MemberStatus>("members.status", &self.status)?,
            created_at: self.created_at,
        })
    }
}

fn decode_all(rows: Vec<MemberRow>) -> StoreResult<Vec<Member>> {
    rows.into_iter().map(MemberRow::into_member).collect()
}

pub async fn list(
    pool: &PgPool,
    team_id: i64,
    status: Option<MemberStatus>,
) -> StoreResult<Vec<Member>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM members
         WHERE team_id = $1 AND ($2::TEXT IS NULL OR status = $2)
         ORDER BY furigana COLLATE \"C\", id"
    );
    let rows: Vec<MemberRow> = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await?;
    decode_all(rows)
}

pub async fn find(pool: &PgPool, team_id: i64, id: i64) -> StoreResult<Option<Member>> {
    let sql = format!("SELECT {COLUMNS} FROM members WHERE team_id = $1 AND id = $2");
    let row: Option<MemberRow> = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(MemberRow::into_member).transpose()
}

pub async fn find_by_ids(pool: &PgPool, team_id: i64, ids: &[i64]) -> StoreResult<Vec<Member>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!("SELECT {COLUMNS} FROM members WHERE team_id = $1 AND id = ANY($2)");
    let rows: Vec<MemberRow> = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(ids)
        .fetch_all(pool)
        .await?;
    decode_all(rows)
}

pub async fn insert(pool: &PgPool, team_id: i64, data: &MemberCreate) -> StoreResult<Member> {
    let sql = format!(
        "INSERT INTO members (id, team_id, name, furigana, position, contact, address, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $8)
         RETURNING {COLUMNS}"
    );
    let row: MemberRow = sqlx::query_as(&sql)
        .bind(shared::util::snowflake_id())
        .bind(team_id)
        .bind(&data.name)
        .bind(&data.furigana)
        .bind(&data.position)
        .bind(&data.contact)
        .bind(&data.address)
        .bind(shared::util::now_millis())
        .fetch_one(pool)
        .await?;
    row.into_member()
}

pub async fn update(
    pool: &PgPool,
    team_id: i64,
    id: i64,
    data: &MemberUpdate,
) -> StoreResult<Option<Member>> {
    let sql = format!(
        "UPDATE members SET
            name = COALESCE($3, name),
            furigana = COALESCE($4, furigana),
            position = COALESCE($5, position),
            contact = COALESCE($6, contact),
            address = COALESCE($7, address),
            status = COALESCE($8, status)
         WHERE team_id = $1 AND id = $2
         RETURNING {COLUMNS}"
    );
    let row: Option<MemberRow> = sqlx::query_as(&sql)
        .bind(team_id)
        .bind(id)
        .bind(&data.name)
        .bind(&data.furigana)
        .bind(&data.position)
        .bind(&data.contact)
        .bind(&data.address)
        .bind(data.status.map(|s| s.as_str()))
        .fetch_optional(pool)
        .await?;
    row.map(MemberRow::into_member).transpose()
}

pub async fn delete(pool: &PgPool, team_id: i64, id: i64) -> StoreResult<bool> {
    let rows = sqlx::query("DELETE FROM members WHERE team_id = $1 AND id = $2")
        .bind(team_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
