//! Roster endpoints

use axum::extract::{Path, State};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{CollectionProgress, Member, MemberCreate, MemberUpdate, PaymentView};

use crate::auth::Caller;
use crate::ledger::{payments as ledger_payments, roster};
use crate::state::AppState;

use super::{ApiJson, ApiResult};

/// GET /api/members
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<Vec<Member>> {
    let members = roster::list(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(members))
}

/// GET /api/members/{id}
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<Member> {
    let member = roster::get(state.store.as_ref(), &caller, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MemberNotFound).with_detail("id", id))?;
    Ok(ApiResponse::success(member))
}

/// POST /api/members
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(req): ApiJson<MemberCreate>,
) -> ApiResult<Member> {
    let member = roster::create(state.store.as_ref(), &caller, req).await?;
    Ok(ApiResponse::success(member))
}

/// PUT /api/members/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<MemberUpdate>,
) -> ApiResult<Member> {
    let member = roster::update(state.store.as_ref(), &caller, id, req).await?;
    Ok(ApiResponse::success(member))
}

/// DELETE /api/members/{id}
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    roster::delete(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::ok())
}

/// GET /api/members/{id}/payments
pub async fn payments(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<Vec<PaymentView>> {
    let views = ledger_payments::list_by_member(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::success(views))
}

/// GET /api/members/{id}/progress
pub async fn progress(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<CollectionProgress> {
    let progress = ledger_payments::member_progress(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::success(progress))
}
