//! Table formatting for simulated timelines.

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use super::report::AccrualRow;

#[derive(Tabled)]
struct AccrualTableRow {
    #[tabled(rename = "Timestamp")]
    timestamp: u64,
    #[tabled(rename = "Elapsed (s)")]
    elapsed: u64,
    #[tabled(rename = "Utilization")]
    utilization: String,
    #[tabled(rename = "Avg Borrow APY")]
    avg_borrow_apy: String,
    #[tabled(rename = "End Borrow APY")]
    end_borrow_apy: String,
    #[tabled(rename = "Rate at Target (APR)")]
    rate_at_target: String,
}

pub(crate) fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn format_accruals_table(rows: &[AccrualRow]) -> String {
    if rows.is_empty() {
        return "No accruals in scenario.".to_string();
    }

    let rows: Vec<AccrualTableRow> = rows
        .iter()
        .map(|row| AccrualTableRow {
            timestamp: row.timestamp,
            elapsed: row.elapsed,
            utilization: format_percent(row.utilization),
            avg_borrow_apy: format_percent(row.avg_borrow_apy),
            end_borrow_apy: format_percent(row.end_borrow_apy),
            rate_at_target: format_percent(row.rate_at_target_apr),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string()
}
