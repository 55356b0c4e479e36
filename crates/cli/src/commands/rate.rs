//! Borrow rate preview command.

use adaptive_irm::math::{parse_i256, parse_u256};
use adaptive_irm::{AdaptiveCurveIrm, MarketState, RateAtTargetStore};
use anyhow::{Context, Result};

use super::anonymous_market;
use crate::cli::{OutputFormat, RateArgs};
use crate::config::resolve_curve;
use crate::output::{format_quote_detail, QuoteReport};

pub fn run_rate(args: &RateArgs, format: OutputFormat) -> Result<()> {
    let params = anonymous_market(resolve_curve(&args.curve)?);
    let state = MarketState::new(
        parse_u256(&args.supply).context("Invalid --supply")?,
        parse_u256(&args.borrow).context("Invalid --borrow")?,
        0,
    );

    let store = match &args.rate_at_target {
        Some(rate) => {
            let rate = parse_i256(rate).context("Invalid --rate-at-target")?;
            RateAtTargetStore::restore([(params.id(), rate)])
                .context("Invalid --rate-at-target")?
        }
        None => RateAtTargetStore::new(),
    };
    let irm = AdaptiveCurveIrm::with_store(store);

    let result = irm.quote(&params, &state, args.elapsed)?;
    let report = QuoteReport::new(state.utilization()?, &result);

    match format {
        OutputFormat::Table => {
            println!("{}", format_quote_detail(&report));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}
