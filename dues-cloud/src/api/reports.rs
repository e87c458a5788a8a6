//! Report and CSV export endpoints

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use http::header;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::{CategoryRow, Dashboard, Granularity, SummaryReport};

use crate::auth::Caller;
use crate::ledger::reports::{self, csv};
use crate::state::AppState;

use super::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub granularity: Granularity,
}

/// GET /api/reports/summary?granularity=monthly|yearly
pub async fn summary(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<SummaryReport> {
    let report = reports::report(state.store.as_ref(), &caller, query.granularity).await?;
    Ok(ApiResponse::success(report))
}

/// GET /api/reports/categories
pub async fn categories(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Vec<CategoryRow>> {
    let rows = reports::category_report(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/reports/dashboard
pub async fn dashboard(State(state): State<AppState>, caller: Caller) -> ApiResult<Dashboard> {
    let board = reports::dashboard_for(state.store.as_ref(), &caller).await?;
    Ok(ApiResponse::success(board))
}

/// GET /api/reports/summary.csv?granularity=monthly|yearly
pub async fn summary_csv(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<SummaryQuery>,
) -> Result<Response, AppError> {
    let body = reports::export_summary_csv(state.store.as_ref(), &caller, query.granularity).await?;
    let file_name = csv::summary_file_name(query.granularity, shared::util::today());
    Ok(csv_attachment(body, &file_name))
}

/// GET /api/reports/expenses.csv
pub async fn expenses_csv(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Response, AppError> {
    let body = reports::export_expenses_csv(state.store.as_ref(), &caller).await?;
    let file_name = csv::expenses_file_name(shared::util::today());
    Ok(csv_attachment(body, &file_name))
}

fn csv_attachment(body: String, file_name: &str) -> Response {
    // RFC 5987 encoding for non-ASCII file names
    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    );
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_file_name_is_percent_encoded() {
        let resp = csv_attachment(String::new(), "支出一覧_2024-05-31.csv");
        let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert_eq!(
            disposition,
            "attachment; filename*=UTF-8''%E6%94%AF%E5%87%BA%E4%B8%80%E8%A6%A7_2024-05-31.csv"
        );

        let resp = csv_attachment(String::new(), "a b.csv");
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename*=UTF-8''a%20b.csv"
        );
    }
}
