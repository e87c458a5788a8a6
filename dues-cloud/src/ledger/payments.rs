//! Payment ledger
//!
//! Payment rows are only ever created by [`generate_for_event`], only ever
//! changed by [`set_status`], and only removed together with their member or
//! fee event.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CollectionProgress, FeeEvent, Member, MemberStatus, Payment, PaymentStatus,
    PaymentStatusUpdate, PaymentView,
};

use super::fee_events::fee_event_not_found;
use super::reports::collection_progress;
use crate::auth::{Caller, TeamScope};
use crate::db::{PaymentFilter, PaymentSeed, PaymentWrite, Store};
use crate::error::{ServiceResult, StoreContext};
use crate::validation::{MAX_NOTE_LEN, validate_optional_text};

/// Result of a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    /// Active members considered
    pub active_members: usize,
    /// Rows actually created (members that already had a row are skipped)
    pub inserted: u64,
}

/// Ensure every active member of the team has a payment row for the event.
///
/// Safe to call any number of times, including concurrently: existing rows
/// are never touched and the store's (member, fee event) uniqueness decides
/// which of two racing inserts wins.
pub async fn generate_for_event(
    store: &dyn Store,
    caller: &Caller,
    fee_event_id: i64,
) -> ServiceResult<GenerationOutcome> {
    let scope = caller.require_admin()?;

    store
        .find_fee_event(scope.team_id, fee_event_id)
        .await
        .during("generate payments")?
        .ok_or_else(|| fee_event_not_found(fee_event_id))?;

    let members = store
        .list_members_by_status(scope.team_id, MemberStatus::Active)
        .await
        .during("generate payments")?;
    if members.is_empty() {
        tracing::debug!(
            team_id = scope.team_id,
            fee_event_id,
            "No active members, nothing to generate"
        );
        return Ok(GenerationOutcome::default());
    }

    let seeds: Vec<PaymentSeed> = members
        .iter()
        .map(|m| PaymentSeed {
            member_id: m.id,
            fee_event_id,
        })
        .collect();

    let inserted = store
        .insert_payments_ignore_duplicates(scope.team_id, &seeds)
        .await
        .during("generate payments")?;

    tracing::info!(
        team_id = scope.team_id,
        fee_event_id,
        active_members = members.len(),
        inserted,
        "Payments generated"
    );

    Ok(GenerationOutcome {
        active_members: members.len(),
        inserted,
    })
}

/// Column values for a status change.
///
/// Marking unpaid discards method, note and paid date.
fn resolve_write(update: PaymentStatusUpdate) -> PaymentWrite {
    match update.status {
        PaymentStatus::Paid => PaymentWrite {
            status: PaymentStatus::Paid,
            paid_at: Some(update.paid_at.unwrap_or_else(shared::util::today)),
            method: Some(update.method.unwrap_or_default()),
            note: update.note.unwrap_or_default(),
        },
        PaymentStatus::Unpaid => PaymentWrite {
            status: PaymentStatus::Unpaid,
            paid_at: None,
            method: None,
            note: String::new(),
        },
    }
}

pub async fn set_status(
    store: &dyn Store,
    caller: &Caller,
    payment_id: i64,
    update: PaymentStatusUpdate,
) -> ServiceResult<Payment> {
    let scope = caller.require_admin()?;
    validate_optional_text(&update.note, "note", MAX_NOTE_LEN)?;

    let write = resolve_write(update);
    let payment = store
        .write_payment_status(scope.team_id, payment_id, &write)
        .await
        .during("update payment status")?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound).with_detail("id", payment_id))?;

    tracing::info!(
        team_id = scope.team_id,
        payment_id,
        status = payment.status.as_str(),
        "Payment status updated"
    );
    Ok(payment)
}

// ── Queries ──

fn distinct_ids(rows: &[Payment], key: impl Fn(&Payment) -> i64) -> Vec<i64> {
    rows.iter().map(key).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Attach members and fee events to payment rows, fetched by id set
async fn stitch(
    store: &dyn Store,
    scope: &TeamScope,
    payments: Vec<Payment>,
    with_member: bool,
    with_event: bool,
) -> ServiceResult<Vec<PaymentView>> {
    let members: HashMap<i64, Member> = if with_member {
        store
            .find_members_by_ids(scope.team_id, &distinct_ids(&payments, |p| p.member_id))
            .await
            .during("load payment members")?
            .into_iter()
            .map(|m| (m.id, m))
            .collect()
    } else {
        HashMap::new()
    };

    let events: HashMap<i64, FeeEvent> = if with_event {
        store
            .find_fee_events_by_ids(
                scope.team_id,
                &distinct_ids(&payments, |p| p.fee_event_id),
            )
            .await
            .during("load payment fee events")?
            .into_iter()
            .map(|e| (e.id, e))
            .collect()
    } else {
        HashMap::new()
    };

    Ok(payments
        .into_iter()
        .map(|payment| PaymentView {
            member: members.get(&payment.member_id).cloned(),
            fee_event: events.get(&payment.fee_event_id).cloned(),
            payment,
        })
        .collect())
}

/// Payments of one event, each with its member
pub async fn list_by_event(
    store: &dyn Store,
    caller: &Caller,
    fee_event_id: i64,
) -> ServiceResult<Vec<PaymentView>> {
    let scope = caller.require_team()?;
    let payments = store
        .list_payments(scope.team_id, PaymentFilter::by_event(fee_event_id))
        .await
        .during("list payments by event")?;
    let mut views = stitch(store, &scope, payments, true, false).await?;
    views.sort_by(|a, b| {
        let key = |v: &PaymentView| v.member.as_ref().map(|m| m.furigana.clone());
        key(a).cmp(&key(b)).then(a.payment.id.cmp(&b.payment.id))
    });
    Ok(views)
}

/// Payments of one member, each with its fee event
pub async fn list_by_member(
    store: &dyn Store,
    caller: &Caller,
    member_id: i64,
) -> ServiceResult<Vec<PaymentView>> {
    let scope = caller.require_team()?;
    let payments = store
        .list_payments(scope.team_id, PaymentFilter::by_member(member_id))
        .await
        .during("list payments by member")?;
    let mut views = stitch(store, &scope, payments, false, true).await?;
    views.sort_by(|a, b| {
        let due = |v: &PaymentView| v.fee_event.as_ref().map(|e| e.due_date);
        due(b).cmp(&due(a)).then(a.payment.id.cmp(&b.payment.id))
    });
    Ok(views)
}

/// Every payment of the team with both sides attached
pub async fn list_all(store: &dyn Store, caller: &Caller) -> ServiceResult<Vec<PaymentView>> {
    let scope = caller.require_team()?;
    let payments = store
        .list_payments(scope.team_id, PaymentFilter::all())
        .await
        .during("list payments")?;
    stitch(store, &scope, payments, true, true).await
}

/// Collection progress of one fee event
pub async fn event_progress(
    store: &dyn Store,
    caller: &Caller,
    fee_event_id: i64,
) -> ServiceResult<CollectionProgress> {
    let scope = caller.require_team()?;
    let event = store
        .find_fee_event(scope.team_id, fee_event_id)
        .await
        .during("load fee event progress")?
        .ok_or_else(|| fee_event_not_found(fee_event_id))?;
    let payments = store
        .list_payments(scope.team_id, PaymentFilter::by_event(fee_event_id))
        .await
        .during("load fee event progress")?;
    Ok(collection_progress(&payments, &[event]))
}

/// Collection progress of one member across all fee events
pub async fn member_progress(
    store: &dyn Store,
    caller: &Caller,
    member_id: i64,
) -> ServiceResult<CollectionProgress> {
    let scope = caller.require_team()?;
    store
        .find_member(scope.team_id, member_id)
        .await
        .during("load member progress")?
        .ok_or_else(|| AppError::new(ErrorCode::MemberNotFound).with_detail("id", member_id))?;
    let payments = store
        .list_payments(scope.team_id, PaymentFilter::by_member(member_id))
        .await
        .during("load member progress")?;
    let events = store
        .find_fee_events_by_ids(scope.team_id, &distinct_ids(&payments, |p| p.fee_event_id))
        .await
        .during("load member progress")?;
    Ok(collection_progress(&payments, &events))
}
