//! Team onboarding and membership endpoints

use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::{Profile, ProfileWithTeam, Team, TeamInvite, TeamRename};

use crate::auth::{Caller, Identity};
use crate::ledger::teams;
use crate::state::AppState;

use super::{ApiJson, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: String,
    #[serde(default)]
    pub display_name: String,
}

/// POST /api/team
///
/// The token's subject becomes the founding admin.
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ApiJson(req): ApiJson<CreateTeamRequest>,
) -> ApiResult<ProfileWithTeam> {
    let created = teams::create_team_with_founder(
        state.store.as_ref(),
        &identity.profile_id,
        &req.display_name,
        &req.team_name,
    )
    .await?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/team
pub async fn rename(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(req): ApiJson<TeamRename>,
) -> ApiResult<Team> {
    let team = teams::rename(state.store.as_ref(), &caller, &req.name).await?;
    Ok(ApiResponse::success(team))
}

/// GET /api/team/me
pub async fn me(State(state): State<AppState>, caller: Caller) -> ApiResult<ProfileWithTeam> {
    let me = teams::current_profile(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(me))
}

/// POST /api/team/invite
pub async fn invite(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(req): ApiJson<TeamInvite>,
) -> ApiResult<Profile> {
    let profile = teams::invite(
        state.store.as_ref(),
        &caller,
        &req.profile_id,
        &req.display_name,
    )
    .await?;
    Ok(ApiResponse::success(profile))
}
