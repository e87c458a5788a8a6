//! Member roster

use shared::error::{AppError, ErrorCode};
use shared::models::{Member, MemberCreate, MemberUpdate};

use crate::auth::Caller;
use crate::db::Store;
use crate::error::{ServiceResult, StoreContext};
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_required_text,
    validate_optional_text, validate_required_text, validate_text,
};

fn member_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::MemberNotFound).with_detail("id", id)
}

/// All members of the caller's team, by furigana
pub async fn list(store: &dyn Store, caller: &Caller) -> ServiceResult<Vec<Member>> {
    let scope = caller.require_team()?;
    Ok(store
        .list_members(scope.team_id)
        .await
        .during("list members")?)
}

pub async fn get(store: &dyn Store, caller: &Caller, id: i64) -> ServiceResult<Option<Member>> {
    let scope = caller.require_team()?;
    Ok(store
        .find_member(scope.team_id, id)
        .await
        .during("get member")?)
}

/// Add a member (always active)
pub async fn create(
    store: &dyn Store,
    caller: &Caller,
    data: MemberCreate,
) -> ServiceResult<Member> {
    let scope = caller.require_admin()?;

    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_text(&data.furigana, "furigana", MAX_SHORT_TEXT_LEN)?;
    validate_text(&data.position, "position", MAX_SHORT_TEXT_LEN)?;
    validate_text(&data.contact, "contact", MAX_SHORT_TEXT_LEN)?;
    validate_text(&data.address, "address", MAX_ADDRESS_LEN)?;

    let member = store
        .insert_member(scope.team_id, &data)
        .await
        .during("create member")?;

    tracing::info!(team_id = scope.team_id, member_id = member.id, "Member created");
    Ok(member)
}

pub async fn update(
    store: &dyn Store,
    caller: &Caller,
    id: i64,
    data: MemberUpdate,
) -> ServiceResult<Member> {
    let scope = caller.require_admin()?;

    validate_optional_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.furigana, "furigana", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.position, "position", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.contact, "contact", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.address, "address", MAX_ADDRESS_LEN)?;

    let member = store
        .update_member(scope.team_id, id, &data)
        .await
        .during("update member")?
        .ok_or_else(|| member_not_found(id))?;

    tracing::info!(
        team_id = scope.team_id,
        member_id = id,
        status = member.status.as_str(),
        "Member updated"
    );
    Ok(member)
}

/// Hard delete. The member's payment rows are removed with it.
pub async fn delete(store: &dyn Store, caller: &Caller, id: i64) -> ServiceResult<()> {
    let scope = caller.require_admin()?;

    let deleted = store
        .delete_member(scope.team_id, id)
        .await
        .during("delete member")?;
    if !deleted {
        return Err(member_not_found(id).into());
    }

    tracing::info!(team_id = scope.team_id, member_id = id, "Member deleted");
    Ok(())
}
