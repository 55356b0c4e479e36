//! Detailed output formatting for single results.

use colored::Colorize;

use super::report::{MarketIdReport, QuoteReport, SupplyChange, UtilizationReport};
use super::table::format_percent;

fn header(title: &str) -> String {
    format!("{}\n{}\n{}\n\n", "=".repeat(60), title.bold(), "=".repeat(60))
}

pub fn format_quote_detail(quote: &QuoteReport) -> String {
    let mut output = header("Borrow Rate Quote");

    output.push_str(&format!("{}\n", "Market".cyan().bold()));
    output.push_str(&format!(
        "  Utilization:     {} ({})\n\n",
        format_percent(quote.utilization_fraction),
        quote.utilization
    ));

    output.push_str(&format!("{}\n", "Rates (per second, WAD)".cyan().bold()));
    output.push_str(&format!("  Average:         {}\n", quote.avg_borrow_rate));
    output.push_str(&format!("  End:             {}\n", quote.end_borrow_rate));
    output.push_str(&format!("  Rate at Target:  {}\n\n", quote.end_rate_at_target));

    output.push_str(&format!("{}\n", "Annualized".cyan().bold()));
    output.push_str(&format!("  Average APR:     {}\n", format_percent(quote.avg_borrow_apr)));
    output.push_str(&format!("  Average APY:     {}\n", format_percent(quote.avg_borrow_apy)));
    output.push_str(&format!("  End APY:         {}\n", format_percent(quote.end_borrow_apy)));

    output
}

pub fn format_market_id_detail(report: &MarketIdReport) -> String {
    let mut output = header("Market Id");
    output.push_str(&format!("  Id:       {}\n", report.id.to_string().green()));
    output.push_str(&format!("  Encoded:  {}\n", report.encoded));
    output
}

pub fn format_utilization_detail(report: &UtilizationReport) -> String {
    let mut output = header("Utilization at Borrow Rate");
    output.push_str(&format!(
        "  Utilization:  {} ({})\n",
        format_percent(report.utilization_fraction),
        report.utilization
    ));

    if let Some(change) = &report.supply_change {
        let line = match change {
            SupplyChange::Supply(amount) => format!("supply {amount}"),
            SupplyChange::Withdraw(amount) => format!("withdraw {amount}"),
            SupplyChange::Unreachable => "unreachable while assets are borrowed".yellow().to_string(),
        };
        output.push_str(&format!("  Action:       {line}\n"));
    }

    output
}
