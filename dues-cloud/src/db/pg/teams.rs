//! Teams and profiles

use shared::models::{Profile, Role, Team};
use sqlx::PgPool;

use super::decode_enum;
use crate::db::StoreResult;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: String,
    team_id: Option<i64>,
    role: String,
    display_name: String,
}

impl ProfileRow {
    fn into_profile(self) -> StoreResult<Profile> {
        Ok(Profile {
            id: self.id,
            team_id: self.team_id,
            role: decode_enum::<Role>("profiles.role", &self.role)?,
            display_name: self.display_name,
        })
    }
}

pub async fn find_profile(pool: &PgPool, profile_id: &str) -> StoreResult<Option<Profile>> {
    let row: Option<ProfileRow> = sqlx::query_as(
        "SELECT id, team_id, role, display_name FROM profiles WHERE id = $1",
    )
    .bind(profile_id)
    .fetch_optional(pool)
    .await?;
    row.map(ProfileRow::into_profile).transpose()
}

/// Team insert and admin upsert share one transaction. The upsert only
/// touches a teamless profile; a concurrent founder that lost the race gets
/// no row back and its team is rolled back.
pub async fn create_team_with_admin(
    pool: &PgPool,
    team_name: &str,
    profile_id: &str,
    display_name: &str,
) -> StoreResult<Option<(Team, Profile)>> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let team: Team = sqlx::query_as(
        r#"
        INSERT INTO teams (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(shared::util::snowflake_id())
    .bind(team_name)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let row: Option<ProfileRow> = sqlx::query_as(
        r#"
        INSERT INTO profiles (id, team_id, role, display_name, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id)
        DO UPDATE SET
            team_id = EXCLUDED.team_id, role = EXCLUDED.role,
            display_name = EXCLUDED.display_name
        WHERE profiles.team_id IS NULL
        RETURNING id, team_id, role, display_name
        "#,
    )
    .bind(profile_id)
    .bind(team.id)
    .bind(Role::Admin.as_str())
    .bind(display_name)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(None);
    };
    let profile = row.into_profile()?;
    tx.commit().await?;
    Ok(Some((team, profile)))
}

/// Single upsert guarded on the stored team, so a profile claimed by another
/// team in the meantime is left untouched.
pub async fn join_team(
    pool: &PgPool,
    team_id: i64,
    profile_id: &str,
    display_name: &str,
) -> StoreResult<Option<Profile>> {
    let row: Option<ProfileRow> = sqlx::query_as(
        r#"
        INSERT INTO profiles (id, team_id, role, display_name, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id)
        DO UPDATE SET
            team_id = EXCLUDED.team_id,
            role = CASE WHEN profiles.team_id IS NULL THEN EXCLUDED.role ELSE profiles.role END,
            display_name = EXCLUDED.display_name
        WHERE profiles.team_id IS NULL OR profiles.team_id = EXCLUDED.team_id
        RETURNING id, team_id, role, display_name
        "#,
    )
    .bind(profile_id)
    .bind(team_id)
    .bind(Role::Member.as_str())
    .bind(display_name)
    .bind(shared::util::now_millis())
    .fetch_optional(pool)
    .await?;
    row.map(ProfileRow::into_profile).transpose()
}

pub async fn find_team(pool: &PgPool, team_id: i64) -> StoreResult<Option<Team>> {
    let team = sqlx::query_as("SELECT id, name, created_at FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(pool)
        .await?;
    Ok(team)
}

pub async fn rename_team(pool: &PgPool, team_id: i64, name: &str) -> StoreResult<Option<Team>> {
    let team = sqlx::query_as(
        "UPDATE teams SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
    )
    .bind(team_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(team)
}
