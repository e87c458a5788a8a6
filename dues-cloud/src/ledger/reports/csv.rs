//! CSV rendering of reports
//!
//! Output is UTF-8 with a leading BOM and `\n` line endings, so it opens
//! directly in spreadsheet software with the Japanese headers intact.

use chrono::NaiveDate;
use shared::error::AppError;
use shared::models::{Expense, Granularity, SummaryRow};

const BOM: &str = "\u{FEFF}";

fn summary_header(granularity: Granularity) -> [&'static str; 4] {
    match granularity {
        Granularity::Monthly => ["月", "収入", "支出", "差引"],
        Granularity::Yearly => ["年", "収入", "支出", "差引"],
    }
}

const EXPENSE_HEADER: [&str; 5] = ["日付", "金額", "カテゴリ", "メモ", "登録者"];

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BOM.as_bytes().to_vec())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, AppError> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::internal(format!("CSV is not UTF-8: {e}")))
}

fn write_failed(e: csv::Error) -> AppError {
    AppError::internal(format!("CSV write failed: {e}"))
}

/// Summary rows as `bucket,income,expense,balance`
pub fn summary_csv(rows: &[SummaryRow], granularity: Granularity) -> Result<String, AppError> {
    let mut wtr = writer();
    wtr.write_record(summary_header(granularity))
        .map_err(write_failed)?;
    for row in rows {
        wtr.write_record([
            row.bucket.clone(),
            row.income.to_string(),
            row.expense.to_string(),
            row.balance.to_string(),
        ])
        .map_err(write_failed)?;
    }
    finish(wtr)
}

/// Expense list as `date,amount,category,note,registered_by`
pub fn expenses_csv(expenses: &[Expense]) -> Result<String, AppError> {
    let mut wtr = writer();
    wtr.write_record(EXPENSE_HEADER).map_err(write_failed)?;
    for e in expenses {
        wtr.write_record([
            e.date.format("%Y-%m-%d").to_string(),
            e.amount.to_string(),
            e.category.clone(),
            e.note.clone(),
            e.registered_by.clone(),
        ])
        .map_err(write_failed)?;
    }
    finish(wtr)
}

/// Suggested download name, e.g. `収支レポート_月別_2024-05-31.csv`
pub fn summary_file_name(granularity: Granularity, on: NaiveDate) -> String {
    let label = match granularity {
        Granularity::Monthly => "月別",
        Granularity::Yearly => "年別",
    };
    format!("収支レポート_{label}_{}.csv", on.format("%Y-%m-%d"))
}

/// Suggested download name, e.g. `支出一覧_2024-05-31.csv`
pub fn expenses_file_name(on: NaiveDate) -> String {
    format!("支出一覧_{}.csv", on.format("%Y-%m-%d"))
}
