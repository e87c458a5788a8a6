//! Service-layer error type
//!
//! `ServiceError` bridges storage failures (`StoreError`) and the API-layer
//! error (`AppError`), so ledger code can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::StoreError;

/// Service-layer error
///
/// - `Store`: storage failure (logged once, mapped to DatabaseError)
/// - `App`: business-rule error (passed through to the client unchanged)
#[derive(Debug)]
pub enum ServiceError {
    /// Storage failure, tagged with what the ledger was doing
    Store {
        action: &'static str,
        source: StoreError,
    },
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Store { .. } => ErrorCode::DatabaseError,
            ServiceError::App(e) => e.code,
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Store { action, source } => write!(f, "{action}: {source}"),
            ServiceError::App(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Attach an action label to a storage result
pub trait StoreContext<T> {
    fn during(self, action: &'static str) -> Result<T, ServiceError>;
}

impl<T> StoreContext<T> for Result<T, StoreError> {
    fn during(self, action: &'static str) -> Result<T, ServiceError> {
        self.map_err(|source| ServiceError::Store { action, source })
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store { action, source } => {
                tracing::error!(action, error = %source, "Ledger storage error");
                AppError::database(format!("{action} failed"))
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
