use super::*;
use shared::models::{FeeEventUpdate, Granularity, SummaryRow};

use crate::validation::MAX_AMOUNT;

/// Two events paid in April and May, one expense in each month
async fn april_may_ledger(store: &dyn Store, team: &TeamFixture) -> (i64, i64) {
    add_member(store, &team.admin, "山田", "やまだ").await;
    let e1 = add_event(store, &team.admin, "E1", 3000).await.event;
    let e2 = add_event(store, &team.admin, "E2", 2000).await.event;

    for (event_id, paid_at) in [(e1.id, date(2024, 4, 10)), (e2.id, date(2024, 5, 2))] {
        let row = event_payments(store, team.team_id, event_id).await[0].clone();
        payments::set_status(
            store,
            &team.admin,
            row.id,
            PaymentStatusUpdate::paid().with_paid_at(paid_at),
        )
        .await
        .unwrap();
    }

    expenses::create(store, &team.admin, expense_input(1000, "練習場代", date(2024, 4, 20)))
        .await
        .unwrap();
    expenses::create(store, &team.admin, expense_input(500, "交通費", date(2024, 5, 15)))
        .await
        .unwrap();

    (e1.id, e2.id)
}

fn row(bucket: &str, income: i64, expense: i64, balance: i64) -> SummaryRow {
    SummaryRow {
        bucket: bucket.to_string(),
        income,
        expense,
        balance,
    }
}

#[tokio::test]
async fn test_monthly_summary_scenario() {
    let store = MemoryStore::new();
    let team = setup_team(&store, "a").await;
    april_may_ledger(&store, &team).await;

    let summary = reports::report(&store, &team.member, Granularity::Monthly)
        .await
        .unwrap();
    assert_eq!(
        summary.rows,
        vec![
            row("2024-04", 3000, 1000, 2000),
            row("2024-05", 2000, 500, 1500),
        ]
    );
    assert_eq!(summary.totals.income, 5000);
    assert_eq!(summary.totals.expense, 1500);
    assert_eq!(summary.totals.balance, 3500);

    let yearly = reports::report(&store, &team.member, Granularity::Yearly)
        .await
        .unwrap();
    assert_eq!(yearly.rows, vec![row("2024", 5000, 1500, 3500)]);
}

#[tokio::test]
async fn test_income_uses_current_event_amount() {
    let store = MemoryStore::new();
    let team = setup_team(&store, "a").await;
    let (e1, _) = april_may_ledger(&store, &team).await;

    fee_events::update(&store, &team.admin, e1, FeeEventUpdate {
        amount: Some(3500),
        ..Default::default()
    })
    .await
    .unwrap();

    let summary = reports::report(&store, &team.admin, Granularity::Monthly)
        .await
        .unwrap();
    assert_eq!(summary.rows[0], row("2024-04", 3500, 1000, 2500));
}

#[tokio::test]
async fn test_one_sided_buckets_appear() {
    let store = MemoryStore::new();
    let team = setup_team(&store, "a").await;
    april_may_ledger(&store, &team).await;
    expenses::create(&store, &team.admin, expense_input(800, "懇親会", date(2024, 7, 1)))
        .await
        .unwrap();

    let summary = reports::report(&store, &team.admin, Granularity::Monthly)
        .await
        .unwrap();
    let buckets: Vec<_> = summary.rows.iter().map(|r| r.bucket.as_str()).collect();
    assert_eq!(buckets, vec!["2024-04", "2024-05", "2024-07"]);
    assert_eq!(summary.rows[2], row("2024-07", 0, 800, -800));
}

#[tokio::test]
async fn test_category_percentages_sum_to_100() {
    let store = MemoryStore::new();
    let team = setup_team(&store, "a").await;
    for (amount, category) in [(1000, "練習場代"), (333, "交通費"), (333, "その他"), (1, "懇親会")] {
        expenses::create(&store, &team.admin, expense_input(amount, category, date(2024, 4, 1)))
            .await
            .unwrap();
    }

    let rows = reports::category_report(&store, &team.member).await.unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].category, "練習場代");
    let sum: f64 = rows.iter().map(|r| r.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
}

#[tokio::test]
async fn test_category_percentages_zero_when_no_spending() {
    let store = MemoryStore::new();
    let team = setup_team(&store, "a").await;
    expenses::create(&store, &team.admin, expense_input(0, "その他", date(2024, 4, 1)))
        .await
        .unwrap();

    let rows = reports::category_report(&store, &team.admin).await.unwrap();
    assert!(rows.iter().all(|r| r.percentage == 0.0));
}

#[tokio::test]
async fn test_dashboard_and_exports() {
    let store = MemoryStore::new();
    let team = setup_team(&store, "a").await;
    april_may_ledger(&store, &team).await;

    let board = reports::dashboard_for(&store, &team.member).await.unwrap();
    assert_eq!(board.active_members, 1);
    assert_eq!(board.total_income, 5000);
    assert_eq!(board.total_expense, 1500);
    assert_eq!(board.balance, 3500);
    assert_eq!(board.unpaid_count, 0);
    assert_eq!(board.recent_activity.len(), 4);
    assert_eq!(board.recent_activity[0].date, date(2024, 5, 15));

    let csv = reports::export_summary_csv(&store, &team.member, Granularity::Monthly)
        .await
        .unwrap();
    assert_eq!(
        csv,
        "\u{FEFF}月,収入,支出,差引\n2024-04,3000,1000,2000\n2024-05,2000,500,1500\n"
    );

    let csv = reports::export_expenses_csv(&store, &team.member).await.unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2024-05-15,500,交通費,,Coach");
}

#[tokio::test]
async fn test_oversized_amounts_rejected_and_reports_stay_up() {
    let store = MemoryStore::new();
    let team = setup_team(&store, "a").await;

    let err = expenses::create(&store, &team.admin, expense_input(i64::MAX, "練習場代", date(2024, 4, 1)))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValueOutOfRange);
    let err = fee_events::create(&store, &team.admin, event_input("部費", i64::MAX, date(2024, 4, 30)))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValueOutOfRange);

    // Many expenses at the limit still aggregate
    for _ in 0..3 {
        expenses::create(&store, &team.admin, expense_input(MAX_AMOUNT, "練習場代", date(2024, 4, 1)))
            .await
            .unwrap();
    }
    let summary = reports::report(&store, &team.member, Granularity::Monthly)
        .await
        .unwrap();
    assert_eq!(summary.totals.expense, MAX_AMOUNT * 3);
    assert_eq!(summary.totals.balance, -MAX_AMOUNT * 3);

    let rows = reports::category_report(&store, &team.member).await.unwrap();
    assert_eq!(rows[0].amount, MAX_AMOUNT * 3);
    reports::dashboard_for(&store, &team.member).await.unwrap();
    reports::export_summary_csv(&store, &team.member, Granularity::Monthly)
        .await
        .unwrap();
}
