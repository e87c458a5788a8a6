//! Fee event endpoints

use axum::extract::{Path, State};
use shared::error::ApiResponse;
use shared::models::{CollectionProgress, FeeEvent, FeeEventCreate, FeeEventUpdate, PaymentView};

use crate::auth::Caller;
use crate::ledger::fee_events::{self, fee_event_not_found};
use crate::ledger::{FeeEventCreated, GenerationOutcome, payments};
use crate::state::AppState;

use super::{ApiJson, ApiResult};

/// GET /api/fee-events
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<Vec<FeeEvent>> {
    let events = fee_events::list(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(events))
}

/// GET /api/fee-events/{id}
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<FeeEvent> {
    let event = fee_events::get(state.store.as_ref(), &caller, id)
        .await?
        .ok_or_else(|| fee_event_not_found(id))?;
    Ok(ApiResponse::success(event))
}

/// POST /api/fee-events
///
/// Responds with the event and the payment rows generated for it.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(req): ApiJson<FeeEventCreate>,
) -> ApiResult<FeeEventCreated> {
    let created = fee_events::create(state.store.as_ref(), &caller, req).await?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/fee-events/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<FeeEventUpdate>,
) -> ApiResult<FeeEvent> {
    let event = fee_events::update(state.store.as_ref(), &caller, id, req).await?;
    Ok(ApiResponse::success(event))
}

/// DELETE /api/fee-events/{id}
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    fee_events::delete(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::ok())
}

/// POST /api/fee-events/{id}/generate
pub async fn generate(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<GenerationOutcome> {
    let outcome = payments::generate_for_event(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::success(outcome))
}

/// GET /api/fee-events/{id}/payments
pub async fn payments(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<Vec<PaymentView>> {
    let views = payments::list_by_event(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::success(views))
}

/// GET /api/fee-events/{id}/progress
pub async fn progress(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<CollectionProgress> {
    let progress = payments::event_progress(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::success(progress))
}
