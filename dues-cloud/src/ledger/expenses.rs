//! Expense ledger
//!
//! Categories are free text here. [`EXPENSE_CATEGORIES`] is what clients
//! offer; anything non-empty is accepted.
//!
//! [`EXPENSE_CATEGORIES`]: shared::models::EXPENSE_CATEGORIES

use shared::error::{AppError, ErrorCode};
use shared::models::{Expense, ExpenseCreate, ExpenseUpdate};

use crate::auth::Caller;
use crate::db::Store;
use crate::error::{ServiceResult, StoreContext};
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_optional_text,
    validate_text,
};

fn expense_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ExpenseNotFound).with_detail("id", id)
}

fn validate_category(category: &str) -> Result<(), AppError> {
    if category.trim().is_empty() {
        return Err(
            AppError::new(ErrorCode::ExpenseCategoryRequired).with_detail("field", "category"),
        );
    }
    validate_text(category, "category", MAX_NAME_LEN)
}

/// Newest first
pub async fn list(store: &dyn Store, caller: &Caller) -> ServiceResult<Vec<Expense>> {
    let scope = caller.require_team()?;
    Ok(store
        .list_expenses(scope.team_id)
        .await
        .during("list expenses")?)
}

pub async fn get(store: &dyn Store, caller: &Caller, id: i64) -> ServiceResult<Option<Expense>> {
    let scope = caller.require_team()?;
    Ok(store
        .find_expense(scope.team_id, id)
        .await
        .during("get expense")?)
}

pub async fn create(
    store: &dyn Store,
    caller: &Caller,
    data: ExpenseCreate,
) -> ServiceResult<Expense> {
    let scope = caller.require_admin()?;

    validate_amount(data.amount, "amount", ErrorCode::ExpenseInvalidAmount)?;
    validate_category(&data.category)?;
    validate_text(&data.note, "note", MAX_NOTE_LEN)?;
    validate_text(&data.registered_by, "registered_by", MAX_SHORT_TEXT_LEN)?;

    let expense = store
        .insert_expense(scope.team_id, &data)
        .await
        .during("create expense")?;

    tracing::info!(
        team_id = scope.team_id,
        expense_id = expense.id,
        amount = expense.amount,
        category = %expense.category,
        "Expense recorded"
    );
    Ok(expense)
}

pub async fn update(
    store: &dyn Store,
    caller: &Caller,
    id: i64,
    data: ExpenseUpdate,
) -> ServiceResult<Expense> {
    let scope = caller.require_admin()?;

    if let Some(amount) = data.amount {
        validate_amount(amount, "amount", ErrorCode::ExpenseInvalidAmount)?;
    }
    if let Some(category) = &data.category {
        validate_category(category)?;
    }
    validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;
    validate_optional_text(&data.registered_by, "registered_by", MAX_SHORT_TEXT_LEN)?;

    let expense = store
        .update_expense(scope.team_id, id, &data)
        .await
        .during("update expense")?
        .ok_or_else(|| expense_not_found(id))?;

    tracing::info!(team_id = scope.team_id, expense_id = id, "Expense updated");
    Ok(expense)
}

pub async fn delete(store: &dyn Store, caller: &Caller, id: i64) -> ServiceResult<()> {
    let scope = caller.require_admin()?;

    if !store
        .delete_expense(scope.team_id, id)
        .await
        .during("delete expense")?
    {
        return Err(expense_not_found(id).into());
    }

    tracing::info!(team_id = scope.team_id, expense_id = id, "Expense deleted");
    Ok(())
}
