use super::*;
use crate::auth::{Caller, Identity, resolve_caller};
use crate::db::{MemoryStore, PaymentFilter, Store};
use chrono::NaiveDate;
use shared::error::ErrorCode;
use shared::models::{
    ExpenseCreate, FeeEventCreate, Member, MemberCreate, Payment, PaymentMethod, PaymentStatus,
    PaymentStatusUpdate,
};

// ========================================================================
// Fixture: one team with an admin and a plain member
// ========================================================================

struct TeamFixture {
    team_id: i64,
    admin: Caller,
    member: Caller,
}

async fn caller_for(store: &dyn Store, profile_id: &str) -> Caller {
    resolve_caller(store, Some(&Identity::new(profile_id)))
        .await
        .unwrap()
}

async fn setup_team(store: &dyn Store, prefix: &str) -> TeamFixture {
    let admin_id = format!("{prefix}-admin");
    let member_id = format!("{prefix}-member");

    let founded =
        teams::create_team_with_founder(store, &admin_id, "Coach", &format!("{prefix} FC"))
            .await
            .unwrap();
    let team_id = founded.team.unwrap().id;

    let admin = caller_for(store, &admin_id).await;
    teams::invite(store, &admin, &member_id, "Player")
        .await
        .unwrap();
    let member = caller_for(store, &member_id).await;

    TeamFixture {
        team_id,
        admin,
        member,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn add_member(store: &dyn Store, admin: &Caller, name: &str, furigana: &str) -> Member {
    roster::create(
        store,
        admin,
        MemberCreate {
            name: name.to_string(),
            furigana: furigana.to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

fn event_input(title: &str, amount: i64, due: NaiveDate) -> FeeEventCreate {
    FeeEventCreate {
        title: title.to_string(),
        amount,
        due_date: due,
        note: String::new(),
    }
}

async fn add_event(
    store: &dyn Store,
    admin: &Caller,
    title: &str,
    amount: i64,
) -> FeeEventCreated {
    fee_events::create(store, admin, event_input(title, amount, date(2024, 4, 30)))
        .await
        .unwrap()
}

fn expense_input(amount: i64, category: &str, on: NaiveDate) -> ExpenseCreate {
    ExpenseCreate {
        date: on,
        amount,
        category: category.to_string(),
        note: String::new(),
        registered_by: "Coach".to_string(),
    }
}

async fn event_payments(store: &dyn Store, team_id: i64, fee_event_id: i64) -> Vec<Payment> {
    store
        .list_payments(team_id, PaymentFilter::by_event(fee_event_id))
        .await
        .unwrap()
}

mod test_reports;
mod test_tenancy;
