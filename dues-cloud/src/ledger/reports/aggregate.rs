//! Aggregation over payments and expenses
//!
//! Pure functions: no store access, no clock. Income is always valued at the
//! fee event's current amount. Sums saturate at the `i64` bounds.

use std::collections::{BTreeMap, HashMap};

use shared::models::{
    Activity, ActivityKind, CategoryRow, CollectionProgress, Dashboard, Expense, FeeEvent,
    Granularity, Member, Payment, PaymentStatus, ReportTotals, SummaryRow,
};

/// Dashboard activity feed length
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

const UNKNOWN: &str = "不明";
const NO_DETAIL: &str = "詳細なし";

fn amounts_by_event(fee_events: &[FeeEvent]) -> HashMap<i64, i64> {
    fee_events.iter().map(|e| (e.id, e.amount)).collect()
}

fn sum(amounts: impl Iterator<Item = i64>) -> i64 {
    amounts.fold(0, i64::saturating_add)
}

fn add(total: &mut i64, amount: i64) {
    *total = total.saturating_add(amount);
}

/// Income/expense/balance per period, ascending by bucket key.
///
/// Only paid payments that carry a `paid_at` date count as income. A payment
/// whose fee event is missing contributes 0. Every bucket that has activity
/// on either side gets a row.
pub fn summarize(
    payments: &[Payment],
    fee_events: &[FeeEvent],
    expenses: &[Expense],
    granularity: Granularity,
) -> Vec<SummaryRow> {
    let amounts = amounts_by_event(fee_events);
    // bucket -> (income, expense)
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for payment in payments.iter().filter(|p| p.is_paid()) {
        let Some(paid_at) = payment.paid_at else {
            continue;
        };
        let amount = amounts.get(&payment.fee_event_id).copied().unwrap_or(0);
        add(&mut buckets.entry(granularity.bucket(paid_at)).or_default().0, amount);
    }

    for expense in expenses {
        let slot = buckets.entry(granularity.bucket(expense.date)).or_default();
        add(&mut slot.1, expense.amount);
    }

    buckets
        .into_iter()
        .map(|(bucket, (income, expense))| SummaryRow {
            bucket,
            income,
            expense,
            balance: income.saturating_sub(expense),
        })
        .collect()
}

pub fn totals(rows: &[SummaryRow]) -> ReportTotals {
    let income = sum(rows.iter().map(|r| r.income));
    let expense = sum(rows.iter().map(|r| r.expense));
    ReportTotals {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

/// Expense totals per category, largest first (ties by category name)
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryRow> {
    let mut sums: HashMap<&str, i64> = HashMap::new();
    for expense in expenses {
        add(sums.entry(expense.category.as_str()).or_default(), expense.amount);
    }
    let total = sum(sums.values().copied());

    let mut rows: Vec<CategoryRow> = sums
        .into_iter()
        .map(|(category, amount)| CategoryRow {
            category: category.to_string(),
            amount,
            percentage: percentage(amount, total),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Paid/unpaid counts and amounts over a set of payment rows
pub fn collection_progress(payments: &[Payment], fee_events: &[FeeEvent]) -> CollectionProgress {
    let amounts = amounts_by_event(fee_events);
    let mut progress = CollectionProgress {
        total: payments.len(),
        ..Default::default()
    };

    for payment in payments {
        let amount = amounts.get(&payment.fee_event_id).copied().unwrap_or(0);
        add(&mut progress.expected, amount);
        match payment.status {
            PaymentStatus::Paid => {
                progress.paid += 1;
                add(&mut progress.collected, amount);
            }
            PaymentStatus::Unpaid => progress.unpaid += 1,
        }
    }

    if progress.total > 0 {
        progress.rate_percent =
            (progress.paid as f64 * 100.0 / progress.total as f64).round() as u32;
    }
    progress
}

/// Team overview: headline figures plus the newest activity
pub fn dashboard(
    members: &[Member],
    fee_events: &[FeeEvent],
    payments: &[Payment],
    expenses: &[Expense],
) -> Dashboard {
    let events: HashMap<i64, &FeeEvent> = fee_events.iter().map(|e| (e.id, e)).collect();
    let names: HashMap<i64, &str> = members.iter().map(|m| (m.id, m.name.as_str())).collect();
    let amount_of = |p: &Payment| events.get(&p.fee_event_id).map_or(0, |e| e.amount);

    let total_income = sum(payments.iter().filter(|p| p.is_paid()).map(amount_of));
    let total_expense = sum(expenses.iter().map(|e| e.amount));

    let mut activity: Vec<Activity> = payments
        .iter()
        .filter(|p| p.is_paid())
        .filter_map(|p| {
            let date = p.paid_at?;
            let member = names.get(&p.member_id).copied().unwrap_or(UNKNOWN);
            let event = events
                .get(&p.fee_event_id)
                .map_or(UNKNOWN, |e| e.title.as_str());
            Some(Activity {
                kind: ActivityKind::Income,
                title: format!("{member} - {event}"),
                date,
                amount: amount_of(p),
            })
        })
        .chain(expenses.iter().map(|e| {
            let note = if e.note.is_empty() {
                NO_DETAIL
            } else {
                e.note.as_str()
            };
            Activity {
                kind: ActivityKind::Expense,
                title: format!("{}: {note}", e.category),
                date: e.date,
                amount: e.amount,
            }
        }))
        .collect();
    activity.sort_by(|a, b| b.date.cmp(&a.date));
    activity.truncate(RECENT_ACTIVITY_LIMIT);

    Dashboard {
        active_members: members.iter().filter(|m| m.is_active()).count(),
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        unpaid_count: payments.iter().filter(|p| !p.is_paid()).count(),
        recent_activity: activity,
    }
}
