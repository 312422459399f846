use anyhow::{Context, Result};
use log::info;

use mzlipid::config::SearchParameters;
use mzlipid::peak::Peak;
use mzlipid::query::QueryBuilder;
use mzlipid::rules::RuleSet;

#[cfg(feature = "colorized_output")]
use console::style;

/// Print the class hypotheses for one feature
pub fn run(
    rule_set: &RuleSet,
    mz: f64,
    rt: f64,
    parameters: &SearchParameters,
    json: bool,
) -> Result<()> {
    let peak = Peak::new(mz, rt);
    let queries = QueryBuilder::new(&rule_set.classification).build_with(&peak, parameters);

    if queries.is_empty() {
        anyhow::bail!("Feature is not classifiable: m/z must be > 0 and RT >= 0 ({})", peak);
    }

    info!("{} produced {} queries", peak, queries.len());

    if json {
        let out = serde_json::to_string_pretty(&queries).context("Failed to serialize queries")?;
        println!("{}", out);
        return Ok(());
    }

    println!("Feature: {}", peak);
    println!(
        "{:<26} {:<14} {:<22} {:>12} {:>14}",
        "Expected class", "Adduct", "Category", "Delta", "Neutral mass"
    );
    for query in &queries {
        let abbrev = format!("{:<26}", query.expected_class_abbrev);
        #[cfg(feature = "colorized_output")]
        let abbrev = if query.is_fallback() {
            style(abbrev).yellow().to_string()
        } else {
            style(abbrev).green().to_string()
        };

        println!(
            "{} {:<14} {:<22} {:>12.6} {:>14.6}",
            abbrev,
            query.adduct_label,
            query.class_name,
            query.adduct_mass_delta,
            query.neutral_mass()
        );
    }
    println!(
        "Tolerance: {} ppm, resolution: {}",
        parameters.ppm_tolerance, parameters.mass_resolution
    );

    Ok(())
}
