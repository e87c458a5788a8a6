//! Financial reports
//!
//! [`aggregate`] and [`csv`] are pure. The functions here load the caller's
//! team data from the store and hand it to them; any team member may read.

pub mod aggregate;
pub mod csv;

pub use aggregate::{category_breakdown, collection_progress, dashboard, summarize, totals};

use shared::models::{
    CategoryRow, Dashboard, Expense, FeeEvent, Granularity, Payment, SummaryReport,
};

use crate::auth::{Caller, TeamScope};
use crate::db::{PaymentFilter, Store};
use crate::error::{ServiceResult, StoreContext};

struct LedgerSnapshot {
    payments: Vec<Payment>,
    fee_events: Vec<FeeEvent>,
    expenses: Vec<Expense>,
}

async fn snapshot(store: &dyn Store, scope: &TeamScope) -> ServiceResult<LedgerSnapshot> {
    let payments = store
        .list_payments(scope.team_id, PaymentFilter::all())
        .await
        .during("load payments for report")?;
    let fee_events = store
        .list_fee_events(scope.team_id)
        .await
        .during("load fee events for report")?;
    let expenses = store
        .list_expenses(scope.team_id)
        .await
        .during("load expenses for report")?;
    Ok(LedgerSnapshot {
        payments,
        fee_events,
        expenses,
    })
}

/// Income/expense/balance per period with totals
pub async fn report(
    store: &dyn Store,
    caller: &Caller,
    granularity: Granularity,
) -> ServiceResult<SummaryReport> {
    let scope = caller.require_team()?;
    let data = snapshot(store, &scope).await?;

    let rows = summarize(&data.payments, &data.fee_events, &data.expenses, granularity);
    let totals = totals(&rows);
    Ok(SummaryReport {
        granularity,
        rows,
        totals,
    })
}

pub async fn category_report(store: &dyn Store, caller: &Caller) -> ServiceResult<Vec<CategoryRow>> {
    let scope = caller.require_team()?;
    let expenses = store
        .list_expenses(scope.team_id)
        .await
        .during("load expenses for report")?;
    Ok(category_breakdown(&expenses))
}

pub async fn dashboard_for(store: &dyn Store, caller: &Caller) -> ServiceResult<Dashboard> {
    let scope = caller.require_team()?;
    let data = snapshot(store, &scope).await?;
    let members = store
        .list_members(scope.team_id)
        .await
        .during("load members for dashboard")?;
    Ok(dashboard(
        &members,
        &data.fee_events,
        &data.payments,
        &data.expenses,
    ))
}

pub async fn export_summary_csv(
    store: &dyn Store,
    caller: &Caller,
    granularity: Granularity,
) -> ServiceResult<String> {
    let summary = report(store, caller, granularity).await?;
    Ok(csv::summary_csv(&summary.rows, granularity)?)
}

pub async fn export_expenses_csv(store: &dyn Store, caller: &Caller) -> ServiceResult<String> {
    let scope = caller.require_team()?;
    let expenses = store
        .list_expenses(scope.team_id)
        .await
        .during("load expenses for export")?;
    Ok(csv::expenses_csv(&expenses)?)
}
