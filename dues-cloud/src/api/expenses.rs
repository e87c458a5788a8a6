//! Expense endpoints

use axum::extract::{Path, State};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Expense, ExpenseCreate, ExpenseUpdate};

use crate::auth::Caller;
use crate::ledger::expenses;
use crate::state::AppState;

use super::{ApiJson, ApiResult};

/// GET /api/expenses
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<Vec<Expense>> {
    let rows = expenses::list(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/expenses/{id}
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<Expense> {
    let expense = expenses::get(state.store.as_ref(), &caller, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ExpenseNotFound).with_detail("id", id))?;
    Ok(ApiResponse::success(expense))
}

/// POST /api/expenses
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(req): ApiJson<ExpenseCreate>,
) -> ApiResult<Expense> {
    let expense = expenses::create(state.store.as_ref(), &caller, req).await?;
    Ok(ApiResponse::success(expense))
}

/// PUT /api/expenses/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<ExpenseUpdate>,
) -> ApiResult<Expense> {
    let expense = expenses::update(state.store.as_ref(), &caller, id, req).await?;
    Ok(ApiResponse::success(expense))
}

/// DELETE /api/expenses/{id}
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    expenses::delete(state.store.as_ref(), &caller, id).await?;
    Ok(ApiResponse::ok())
}
