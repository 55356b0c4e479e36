//! Curve configuration resolution: defaults, then `--curve` file, then flags.

use std::fs;
use std::path::Path;

use adaptive_irm::irm::CurveParamsRepr;
use adaptive_irm::CurveParams;
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::CurveArgs;

/// Curve file contents. Every field is optional so a file can override only
/// some of the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CurveFile {
    curve_steepness: Option<String>,
    adjustment_speed: Option<String>,
    target_utilization: Option<String>,
    initial_rate_at_target: Option<String>,
}

fn load_curve_file(path: &Path) -> Result<CurveFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read curve file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse curve file {}", path.display()))
}

pub fn resolve_curve(args: &CurveArgs) -> Result<CurveParams> {
    let file = match &args.curve {
        Some(path) => load_curve_file(path)?,
        None => CurveFile::default(),
    };

    let mut repr = CurveParamsRepr::from(CurveParams::default());
    for (value, layers) in [
        (&mut repr.curve_steepness, [&file.curve_steepness, &args.curve_steepness]),
        (&mut repr.adjustment_speed, [&file.adjustment_speed, &args.adjustment_speed]),
        (&mut repr.target_utilization, [&file.target_utilization, &args.target_utilization]),
        (
            &mut repr.initial_rate_at_target,
            [&file.initial_rate_at_target, &args.initial_rate_at_target],
        ),
    ] {
        if let Some(last) = layers.into_iter().flatten().last() {
            value.clone_from(last);
        }
    }

    CurveParams::try_from(repr).context("Invalid curve configuration")
}
