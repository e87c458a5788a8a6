use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::create_router;
use crate::auth::team_auth::create_token;
use crate::state::AppState;

const SECRET: &str = "test-secret";

fn bearer(profile_id: &str) -> String {
    format!("Bearer {}", create_token(profile_id, SECRET).unwrap())
}

async fn send(
    state: &AppState,
    method: Method,
    uri: &str,
    profile_id: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(id) = profile_id {
        req = req.header("authorization", bearer(id));
    }
    let req = match body {
        Some(v) => req
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    create_router(state.clone()).oneshot(req).await.unwrap()
}

async fn body_bytes(resp: Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(resp: Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

/// Team "Rovers FC" with admin `coach` and member `player`
async fn team_state() -> AppState {
    let state = AppState::in_memory(SECRET);
    let resp = send(
        &state,
        Method::POST,
        "/api/team",
        Some("coach"),
        Some(json!({ "team_name": "Rovers FC", "display_name": "Coach" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        &state,
        Method::POST,
        "/api/team/invite",
        Some("coach"),
        Some(json!({ "profile_id": "player", "display_name": "Player" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    state
}

#[tokio::test]
async fn test_health_is_public() {
    let state = AppState::in_memory(SECRET);
    let resp = send(&state, Method::GET, "/health", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_401() {
    let state = AppState::in_memory(SECRET);
    let resp = send(&state, Method::GET, "/api/members", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/api/members")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let resp = create_router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_profile_is_unauthenticated() {
    let state = AppState::in_memory(SECRET);
    let resp = send(&state, Method::GET, "/api/members", Some("stranger"), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_writes_member_reads() {
    let state = team_state().await;

    let resp = send(
        &state,
        Method::POST,
        "/api/members",
        Some("coach"),
        Some(json!({ "name": "山田太郎", "furigana": "やまだたろう" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "active");

    let resp = send(
        &state,
        Method::POST,
        "/api/members",
        Some("player"),
        Some(json!({ "name": "佐藤" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(&state, Method::GET, "/api/members", Some("player"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_member_is_404() {
    let state = team_state().await;
    let resp = send(&state, Method::GET, "/api/members/999", Some("player"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fee_event_to_summary_flow() {
    let state = team_state().await;
    send(
        &state,
        Method::POST,
        "/api/members",
        Some("coach"),
        Some(json!({ "name": "山田", "furigana": "やまだ" })),
    )
    .await;

    let resp = send(
        &state,
        Method::POST,
        "/api/fee-events",
        Some("coach"),
        Some(json!({ "title": "4月部費", "amount": 3000, "due_date": "2024-04-30" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["generation"]["inserted"], 1);
    let event_id = body["data"]["event"]["id"].as_i64().unwrap();

    // Re-running generation adds nothing
    let resp = send(
        &state,
        Method::POST,
        &format!("/api/fee-events/{event_id}/generate"),
        Some("coach"),
        None,
    )
    .await;
    assert_eq!(json_body(resp).await["data"]["inserted"], 0);

    let resp = send(
        &state,
        Method::GET,
        &format!("/api/fee-events/{event_id}/payments"),
        Some("player"),
        None,
    )
    .await;
    let body = json_body(resp).await;
    let payment_id = body["data"][0]["id"].as_i64().unwrap();
    assert_eq!(body["data"][0]["member"]["name"], "山田");

    let resp = send(
        &state,
        Method::PUT,
        &format!("/api/payments/{payment_id}/status"),
        Some("coach"),
        Some(json!({ "status": "paid", "method": "transfer", "paid_at": "2024-04-10" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["method"], "transfer");

    let resp = send(
        &state,
        Method::GET,
        &format!("/api/fee-events/{event_id}/progress"),
        Some("player"),
        None,
    )
    .await;
    let body = json_body(resp).await;
    assert_eq!(body["data"]["paid"], 1);
    assert_eq!(body["data"]["collected"], 3000);

    let resp = send(
        &state,
        Method::GET,
        "/api/reports/summary?granularity=yearly",
        Some("player"),
        None,
    )
    .await;
    let body = json_body(resp).await;
    assert_eq!(body["data"]["rows"][0]["bucket"], "2024");
    assert_eq!(body["data"]["totals"]["income"], 3000);
}

#[tokio::test]
async fn test_expense_csv_download() {
    let state = team_state().await;
    send(
        &state,
        Method::POST,
        "/api/expenses",
        Some("coach"),
        Some(json!({ "date": "2024-04-20", "amount": 1000, "category": "練習場代" })),
    )
    .await;

    let resp = send(&state, Method::GET, "/api/reports/expenses.csv", Some("player"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    let disposition = resp.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename*=UTF-8''"));

    let body = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(body.starts_with('\u{FEFF}'));
    assert!(body.contains("2024-04-20,1000,練習場代"));
}

#[tokio::test]
async fn test_malformed_body_returns_validation_envelope() {
    let state = team_state().await;

    let resp = send(
        &state,
        Method::POST,
        "/api/fee-events",
        Some("coach"),
        Some(json!({ "title": "x", "amount": "abc", "due_date": "2024-04-30" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["code"], 2);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    // Not JSON at all
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/expenses")
        .header("authorization", bearer("coach"))
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = create_router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["code"], 2);
}
