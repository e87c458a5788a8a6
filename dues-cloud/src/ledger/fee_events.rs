//! Fee events
//!
//! Creating an event immediately generates its payment rows for the current
//! active roster. Later roster changes are picked up by re-running
//! [`payments::generate_for_event`].

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{FeeEvent, FeeEventCreate, FeeEventUpdate};

use super::payments::{self, GenerationOutcome};
use crate::auth::Caller;
use crate::db::Store;
use crate::error::{ServiceResult, StoreContext};
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_optional_required_text,
    validate_optional_text, validate_required_text, validate_text,
};

/// Result of [`create`]
#[derive(Debug, Clone, Serialize)]
pub struct FeeEventCreated {
    pub event: FeeEvent,
    pub generation: GenerationOutcome,
}

pub(crate) fn fee_event_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::FeeEventNotFound).with_detail("id", id)
}

/// Fee events of the caller's team, newest due date first
pub async fn list(store: &dyn Store, caller: &Caller) -> ServiceResult<Vec<FeeEvent>> {
    let scope = caller.require_team()?;
    Ok(store
        .list_fee_events(scope.team_id)
        .await
        .during("list fee events")?)
}

pub async fn get(store: &dyn Store, caller: &Caller, id: i64) -> ServiceResult<Option<FeeEvent>> {
    let scope = caller.require_team()?;
    Ok(store
        .find_fee_event(scope.team_id, id)
        .await
        .during("get fee event")?)
}

pub async fn create(
    store: &dyn Store,
    caller: &Caller,
    data: FeeEventCreate,
) -> ServiceResult<FeeEventCreated> {
    let scope = caller.require_admin()?;

    validate_required_text(&data.title, "title", MAX_NAME_LEN)?;
    validate_amount(data.amount, "amount", ErrorCode::FeeEventInvalidAmount)?;
    validate_text(&data.note, "note", MAX_NOTE_LEN)?;

    let event = store
        .insert_fee_event(scope.team_id, &data)
        .await
        .during("create fee event")?;

    tracing::info!(
        team_id = scope.team_id,
        fee_event_id = event.id,
        amount = event.amount,
        "Fee event created"
    );

    let generation = payments::generate_for_event(store, caller, event.id).await?;

    Ok(FeeEventCreated { event, generation })
}

/// Edit an event. Existing payment rows are left as they are; reports
/// always read the event's current amount.
pub async fn update(
    store: &dyn Store,
    caller: &Caller,
    id: i64,
    data: FeeEventUpdate,
) -> ServiceResult<FeeEvent> {
    let scope = caller.require_admin()?;

    validate_optional_required_text(&data.title, "title", MAX_NAME_LEN)?;
    if let Some(amount) = data.amount {
        validate_amount(amount, "amount", ErrorCode::FeeEventInvalidAmount)?;
    }
    validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;

    let event = store
        .update_fee_event(scope.team_id, id, &data)
        .await
        .during("update fee event")?
        .ok_or_else(|| fee_event_not_found(id))?;

    tracing::info!(team_id = scope.team_id, fee_event_id = id, "Fee event updated");
    Ok(event)
}

/// Hard delete, taking the event's payment rows with it
pub async fn delete(store: &dyn Store, caller: &Caller, id: i64) -> ServiceResult<()> {
    let scope = caller.require_admin()?;

    let deleted = store
        .delete_fee_event(scope.team_id, id)
        .await
        .during("delete fee event")?;
    if !deleted {
        return Err(fee_event_not_found(id).into());
    }

    tracing::info!(team_id = scope.team_id, fee_event_id = id, "Fee event deleted");
    Ok(())
}
