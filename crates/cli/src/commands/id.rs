//! Market identifier derivation command.

use adaptive_irm::math::parse_u256;
use adaptive_irm::{CurveParams, MarketParams};
use alloy_primitives::{hex, Address};
use anyhow::{Context, Result};

use crate::cli::{IdArgs, OutputFormat};
use crate::output::{format_market_id_detail, MarketIdReport};

fn parse_address(value: &str, flag: &str) -> Result<Address> {
    value
        .parse()
        .with_context(|| format!("Invalid --{flag}: {value}"))
}

pub fn run_id(args: &IdArgs, format: OutputFormat) -> Result<()> {
    let params = MarketParams {
        loan_token: parse_address(&args.loan_token, "loan-token")?,
        collateral_token: parse_address(&args.collateral_token, "collateral-token")?,
        oracle: parse_address(&args.oracle, "oracle")?,
        irm: parse_address(&args.irm, "irm")?,
        lltv: parse_u256(&args.lltv).context("Invalid --lltv")?,
        curve: CurveParams::default(),
    };

    let report = MarketIdReport {
        id: params.id(),
        encoded: hex::encode_prefixed(params.encode_id_fields()),
    };

    match format {
        OutputFormat::Table => {
            println!("{}", format_market_id_detail(&report));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}
