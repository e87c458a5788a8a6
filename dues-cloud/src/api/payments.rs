//! Payment endpoints

use axum::extract::{Path, State};
use shared::error::ApiResponse;
use shared::models::{Payment, PaymentStatusUpdate, PaymentView};

use crate::auth::Caller;
use crate::ledger::payments;
use crate::state::AppState;

use super::{ApiJson, ApiResult};

/// GET /api/payments
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<Vec<PaymentView>> {
    let views = payments::list_all(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(views))
}

/// PUT /api/payments/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<PaymentStatusUpdate>,
) -> ApiResult<Payment> {
    let payment = payments::set_status(state.store.as_ref(), &caller, id, req).await?;
    Ok(ApiResponse::success(payment))
}
