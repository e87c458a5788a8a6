//! Team onboarding
//!
//! A team is founded together with its first admin. Further profiles join
//! through an admin's invitation, always as plain members.

use shared::error::{AppError, ErrorCode};
use shared::models::{Profile, ProfileWithTeam, Team};

use crate::auth::Caller;
use crate::db::Store;
use crate::error::{ServiceResult, StoreContext};
use crate::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text, validate_text};

fn already_on_team(profile_id: &str) -> AppError {
    AppError::with_message(ErrorCode::AlreadyExists, "Profile already belongs to a team")
        .with_detail("profile_id", profile_id)
}

/// Create a team and register `profile_id` as its admin.
///
/// Runs before the caller has a team, so it takes the identity directly
/// instead of a [`Caller`].
pub async fn create_team_with_founder(
    store: &dyn Store,
    profile_id: &str,
    display_name: &str,
    team_name: &str,
) -> ServiceResult<ProfileWithTeam> {
    validate_required_text(profile_id, "profile_id", MAX_SHORT_TEXT_LEN)?;
    validate_text(display_name, "display_name", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(team_name, "team_name", MAX_NAME_LEN)?;

    let (team, profile) = store
        .create_team_with_admin(team_name, profile_id, display_name)
        .await
        .during("create team")?
        .ok_or_else(|| already_on_team(profile_id))?;

    tracing::info!(team_id = team.id, profile_id, "Team created");
    Ok(ProfileWithTeam {
        profile,
        team: Some(team),
    })
}

/// Add a profile to the caller's team as a member.
///
/// Re-inviting someone already on the team only refreshes the display name;
/// their role is kept. Profiles on another team are rejected.
pub async fn invite(
    store: &dyn Store,
    caller: &Caller,
    profile_id: &str,
    display_name: &str,
) -> ServiceResult<Profile> {
    let scope = caller.require_admin()?;

    validate_required_text(profile_id, "profile_id", MAX_SHORT_TEXT_LEN)?;
    validate_text(display_name, "display_name", MAX_SHORT_TEXT_LEN)?;

    let profile = store
        .join_team(scope.team_id, profile_id, display_name)
        .await
        .during("invite profile")?
        .ok_or_else(|| already_on_team(profile_id))?;

    tracing::info!(
        team_id = scope.team_id,
        profile_id,
        invited_by = %scope.profile_id,
        "Profile invited"
    );
    Ok(profile)
}

pub async fn rename(store: &dyn Store, caller: &Caller, name: &str) -> ServiceResult<Team> {
    let scope = caller.require_admin()?;
    validate_required_text(name, "name", MAX_NAME_LEN)?;

    let team = store
        .rename_team(scope.team_id, name)
        .await
        .during("rename team")?
        .ok_or_else(|| AppError::new(ErrorCode::TeamNotFound))?;

    tracing::info!(team_id = team.id, "Team renamed");
    Ok(team)
}

/// The caller's own profile with its team (if any)
pub async fn current_profile(store: &dyn Store, caller: &Caller) -> ServiceResult<ProfileWithTeam> {
    let profile = caller.require_profile()?.clone();
    let team = match profile.team_id {
        Some(team_id) => store.find_team(team_id).await.during("load team")?,
        None => None,
    };
    Ok(ProfileWithTeam { profile, team })
}
