//! HTTP routes
//!
//! Everything under `/api` requires a bearer token; handlers receive the
//! resolved [`Caller`] and delegate to the ledger.

pub mod expenses;
pub mod fee_events;
pub mod health;
pub mod members;
pub mod payments;
pub mod reports;
pub mod team;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::routing::{get, post, put};
use axum::{Json, Router, middleware};
use http::request::Parts;
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, AppError};
use tower_http::trace::TraceLayer;

use crate::auth::team_auth::team_auth_middleware;
use crate::auth::{Caller, Identity, resolve_caller};
use crate::state::AppState;

/// Handler result: enveloped data or an error response
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts.extensions.get::<Identity>().cloned();
        Ok(resolve_caller(state.store.as_ref(), identity.as_ref()).await?)
    }
}

/// JSON request body whose rejections (bad syntax, wrong field types,
/// missing content type) come back as a `ValidationFailed` envelope.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::validation(rejection.body_text()))
            }
        }
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let ledger = Router::new()
        // Team
        .route("/api/team", post(team::create).put(team::rename))
        .route("/api/team/me", get(team::me))
        .route("/api/team/invite", post(team::invite))
        // Members
        .route("/api/members", get(members::list).post(members::create))
        .route(
            "/api/members/{id}",
            get(members::get).put(members::update).delete(members::delete),
        )
        .route("/api/members/{id}/payments", get(members::payments))
        .route("/api/members/{id}/progress", get(members::progress))
        // Fee events
        .route("/api/fee-events", get(fee_events::list).post(fee_events::create))
        .route(
            "/api/fee-events/{id}",
            get(fee_events::get)
                .put(fee_events::update)
                .delete(fee_events::delete),
        )
        .route("/api/fee-events/{id}/generate", post(fee_events::generate))
        .route("/api/fee-events/{id}/payments", get(fee_events::payments))
        .route("/api/fee-events/{id}/progress", get(fee_events::progress))
        // Payments
        .route("/api/payments", get(payments::list))
        .route("/api/payments/{id}/status", put(payments::set_status))
        // Expenses
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        // Reports
        .route("/api/reports/summary", get(reports::summary))
        .route("/api/reports/categories", get(reports::categories))
        .route("/api/reports/dashboard", get(reports::dashboard))
        .route("/api/reports/summary.csv", get(reports::summary_csv))
        .route("/api/reports/expenses.csv", get(reports::expenses_csv))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            team_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(ledger)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests;
