use anyhow::Result;
use log::info;

use mzlipid::config::SearchParameters;
use mzlipid::identity::IdentityValidator;
use mzlipid::peak::Peak;
use mzlipid::query::QueryBuilder;
use mzlipid::rules::RuleSet;

#[cfg(feature = "colorized_output")]
use console::style;

/// Check a compound name against the validation table at the feature's RT
pub fn run(
    rule_set: &RuleSet,
    mz: f64,
    rt: f64,
    name: &str,
    parameters: &SearchParameters,
) -> Result<()> {
    let peak = Peak::new(mz, rt);
    let queries = QueryBuilder::new(&rule_set.classification).build_with(&peak, parameters);
    let Some(query) = queries.first() else {
        anyhow::bail!("Feature is not classifiable: m/z must be > 0 and RT >= 0 ({})", peak);
    };

    let validator = IdentityValidator::new(&rule_set.validation);
    let accepting = validator.accepting_rule(query, name);
    info!("Validating {:?} at {}", name, peak);

    let verdict = if accepting.is_some() { "ACCEPTED" } else { "REJECTED" };
    #[cfg(feature = "colorized_output")]
    let verdict = if accepting.is_some() {
        style(verdict).green().bold().to_string()
    } else {
        style(verdict).red().bold().to_string()
    };

    match accepting {
        Some(rule) => println!(
            "{} {:?} at RT {} s (rule: {} < RT < {}, contains {:?})",
            verdict, name, rt, rule.rt_min, rule.rt_max, rule.class_name_substring
        ),
        None => println!("{} {:?} at RT {} s (no validation rule matches)", verdict, name, rt),
    }

    // Exit with error code if the identity is implausible
    if accepting.is_none() {
        std::process::exit(1);
    }

    Ok(())
}
