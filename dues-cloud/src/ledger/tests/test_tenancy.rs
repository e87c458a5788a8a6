use super::*;
use shared::models::{ExpenseUpdate, FeeEventUpdate, MemberUpdate};

struct TwoTeams {
    a: TeamFixture,
    b: TeamFixture,
    b_member: Member,
    b_event: i64,
    b_payment: i64,
    b_expense: i64,
}

/// Both teams get a member, an event (with its payment) and an expense
async fn two_populated_teams(store: &dyn Store) -> TwoTeams {
    let a = setup_team(store, "a").await;
    let b = setup_team(store, "b").await;

    add_member(store, &a.admin, "A部員", "えー").await;
    add_event(store, &a.admin, "A部費", 1000).await;
    expenses::create(store, &a.admin, expense_input(100, "その他", date(2024, 4, 1)))
        .await
        .unwrap();

    let b_member = add_member(store, &b.admin, "B部員", "びー").await;
    let b_event = add_event(store, &b.admin, "B部費", 2000).await.event.id;
    let b_payment = event_payments(store, b.team_id, b_event).await[0].id;
    let b_expense = expenses::create(store, &b.admin, expense_input(200, "交通費", date(2024, 4, 2)))
        .await
        .unwrap()
        .id;

    TwoTeams {
        a,
        b,
        b_member,
        b_event,
        b_payment,
        b_expense,
    }
}

#[tokio::test]
async fn test_lists_never_include_other_team_rows() {
    let store = MemoryStore::new();
    let t = two_populated_teams(&store).await;
    let a = &t.a.admin;

    let members = roster::list(&store, a).await.unwrap();
    assert_eq!(members.len(), 1);
    assert!(members.iter().all(|m| m.team_id == t.a.team_id));

    let events = fee_events::list(&store, a).await.unwrap();
    assert_eq!(events.len(), 1);
    assert!(events.iter().all(|e| e.team_id == t.a.team_id));

    let all = payments::list_all(&store, a).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all.iter().all(|v| v.payment.team_id == t.a.team_id));

    let list = expenses::list(&store, a).await.unwrap();
    assert_eq!(list.len(), 1);
    assert!(list.iter().all(|e| e.team_id == t.a.team_id));

    // Other team's ids used as filters yield nothing
    assert!(
        payments::list_by_event(&store, a, t.b_event)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        payments::list_by_member(&store, a, t.b_member.id)
            .await
            .unwrap()
            .is_empty()
    );

    let summary = reports::report(&store, a, Default::default()).await.unwrap();
    assert_eq!(summary.totals.expense, 100);
    let board = reports::dashboard_for(&store, a).await.unwrap();
    assert_eq!(board.active_members, 1);
    assert_eq!(board.unpaid_count, 1);
}

#[tokio::test]
async fn test_gets_treat_other_team_rows_as_absent() {
    let store = MemoryStore::new();
    let t = two_populated_teams(&store).await;
    let a = &t.a.admin;

    assert!(roster::get(&store, a, t.b_member.id).await.unwrap().is_none());
    assert!(fee_events::get(&store, a, t.b_event).await.unwrap().is_none());
    assert!(expenses::get(&store, a, t.b_expense).await.unwrap().is_none());

    let err = payments::event_progress(&store, a, t.b_event).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::FeeEventNotFound);
    let err = payments::member_progress(&store, a, t.b_member.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MemberNotFound);
}

#[tokio::test]
async fn test_cross_team_mutations_are_not_found_and_change_nothing() {
    let store = MemoryStore::new();
    let t = two_populated_teams(&store).await;
    let a = &t.a.admin;

    let err = roster::update(&store, a, t.b_member.id, MemberUpdate {
        name: Some("乗っ取り".into()),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MemberNotFound);
    let err = roster::delete(&store, a, t.b_member.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MemberNotFound);

    let err = fee_events::update(&store, a, t.b_event, FeeEventUpdate {
        amount: Some(0),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::FeeEventNotFound);
    let err = payments::generate_for_event(&store, a, t.b_event)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::FeeEventNotFound);

    let err = payments::set_status(&store, a, t.b_payment, PaymentStatusUpdate::paid())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PaymentNotFound);

    let err = expenses::update(&store, a, t.b_expense, ExpenseUpdate {
        amount: Some(0),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ExpenseNotFound);
    let err = expenses::delete(&store, a, t.b_expense).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ExpenseNotFound);

    // Team B is untouched
    let b = &t.b.member;
    let member = roster::get(&store, b, t.b_member.id).await.unwrap().unwrap();
    assert_eq!(member, t.b_member);
    let event = fee_events::get(&store, b, t.b_event).await.unwrap().unwrap();
    assert_eq!(event.amount, 2000);
    let payment = store
        .find_payment(t.b.team_id, t.b_payment)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Unpaid);
    assert_eq!(expenses::list(&store, b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invite_cannot_take_profile_from_other_team() {
    let store = MemoryStore::new();
    let t = two_populated_teams(&store).await;

    let err = teams::invite(&store, &t.a.admin, "b-member", "Poached")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyExists);

    let profile = store.find_profile("b-member").await.unwrap().unwrap();
    assert_eq!(profile.team_id, Some(t.b.team_id));
}

#[tokio::test]
async fn test_concurrent_founders_leave_no_orphan_team() {
    let store = MemoryStore::new();

    let (first, second) = tokio::join!(
        teams::create_team_with_founder(&store, "founder", "Coach", "Rovers FC"),
        teams::create_team_with_founder(&store, "founder", "Coach", "Wanderers FC"),
    );
    let (won, lost) = match (first, second) {
        (Ok(won), Err(lost)) | (Err(lost), Ok(won)) => (won, lost),
        other => panic!("expected exactly one founder to win: {other:?}"),
    };
    assert_eq!(lost.code(), ErrorCode::AlreadyExists);
    assert_eq!(store.team_count(), 1);

    let profile = store.find_profile("founder").await.unwrap().unwrap();
    assert_eq!(profile.team_id, won.team.map(|t| t.id));

    // A rejected founding writes nothing
    let err = teams::create_team_with_founder(&store, "founder", "Coach", "Third FC")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyExists);
    assert_eq!(store.team_count(), 1);
}

#[tokio::test]
async fn test_invite_keeps_role_on_same_team_and_demotes_teamless() {
    let store = MemoryStore::new();
    let t = two_populated_teams(&store).await;

    // Re-inviting the team's own admin only refreshes the name
    let admin = teams::invite(&store, &t.a.admin, "a-admin", "Head Coach")
        .await
        .unwrap();
    assert_eq!(admin.role, shared::models::Role::Admin);
    assert_eq!(admin.display_name, "Head Coach");

    store.put_profile(shared::models::Profile {
        id: "drifter".into(),
        team_id: None,
        role: shared::models::Role::Admin,
        display_name: String::new(),
    });
    let joined = teams::invite(&store, &t.a.admin, "drifter", "Drifter")
        .await
        .unwrap();
    assert_eq!(joined.team_id, Some(t.a.team_id));
    assert_eq!(joined.role, shared::models::Role::Member);
}
