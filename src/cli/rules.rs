use anyhow::{Context, Result};

use mzlipid::rules::constants::UNBOUNDED;
use mzlipid::rules::RuleSet;

fn bound(value: f64) -> String {
    if value == UNBOUNDED {
        "MAX".to_string()
    } else {
        format!("{}", value)
    }
}

/// Print both rule tables
pub fn run(rule_set: &RuleSet, json: bool) -> Result<()> {
    if json {
        println!("{}", rule_set.to_json().context("Failed to serialize rule set")?);
        return Ok(());
    }

    println!("Classification rules ({}):", rule_set.classification.len());
    println!(
        "  {:>3}  {:>8} {:>8}  {:>8} {:>8}  {:<20} {:>10}  {:<12} {}",
        "#", "m/z min", "m/z max", "RT min", "RT max", "Category", "Delta", "Adduct", "Expected"
    );
    for (i, rule) in rule_set.classification.rules.iter().enumerate() {
        println!(
            "  {:>3}  {:>8} {:>8}  {:>8} {:>8}  {:<20} {:>10.5}  {:<12} {}",
            i + 1,
            bound(rule.mz_min),
            bound(rule.mz_max),
            bound(rule.rt_min),
            bound(rule.rt_max),
            rule.class_name,
            rule.adduct_mass_delta,
            rule.adduct_label,
            rule.expected_class_abbrev
        );
    }

    let fallback = &rule_set.classification.fallback;
    println!(
        "  Fallback: {} {} {} ({:.6})",
        fallback.class_name,
        fallback.adduct_label,
        fallback.expected_class_abbrev,
        fallback.adduct_mass_delta
    );
    println!();

    println!("Identity validation rules ({}):", rule_set.validation.len());
    for (i, rule) in rule_set.validation.rules.iter().enumerate() {
        println!(
            "  {:>3}  {:>8} < RT < {:<8}  name contains {:?}",
            i + 1,
            bound(rule.rt_min),
            bound(rule.rt_max),
            rule.class_name_substring
        );
    }

    Ok(())
}
