//! Output formatting for CLI results.

pub mod detail;
pub mod report;
pub mod table;

pub use detail::{format_market_id_detail, format_quote_detail, format_utilization_detail};
pub use report::{AccrualRow, MarketIdReport, QuoteReport, UtilizationReport};
pub use table::format_accruals_table;
