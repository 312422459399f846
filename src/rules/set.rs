use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{ClassificationRule, IdentityValidationRule, RuleSetError, RuleTable, ValidationTable};

/// Both rule tables used by the classification pipeline
///
/// The reference set is built in; a custom set can be loaded from TOML or
/// JSON. A file may override either table or both:
///
/// ```toml
/// [[classification]]
/// mz_min = 550.0
/// rt_min = 300.0
/// rt_max = 420.0
/// class_name = "Glycerophospholipi*"
/// adduct_mass_delta = 1.007825
/// adduct_label = "[M+H]"
/// expected_class_abbrev = "GPCho/GPEtn/GPIns/GPSer"
///
/// [[validation]]
/// rt_min = 410.0
/// class_name_substring = "TAG"
/// ```
///
/// Omitted upper bounds are unbounded, omitted lower bounds are zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    /// Classification rules and fallback
    pub classification: RuleTable,
    /// Identity validation rules
    pub validation: ValidationTable,
}

/// On-disk layout; missing sections fall back to the reference tables
#[derive(Debug, Default, Serialize, Deserialize)]
struct RuleSetFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classification: Option<Vec<ClassificationRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fallback: Option<ClassificationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validation: Option<Vec<IdentityValidationRule>>,
}

impl RuleSet {
    /// The built-in reference tables
    pub fn reference() -> Self {
        Self::default()
    }

    /// Load a rule set from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, RuleSetError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a rule set from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, RuleSetError> {
        let file: RuleSetFile = toml::from_str(content)?;
        Self::from_file_layout(file)
    }

    /// Parse a rule set from JSON
    pub fn from_json_str(json: &str) -> Result<Self, RuleSetError> {
        let file: RuleSetFile = serde_json::from_str(json)?;
        Self::from_file_layout(file)
    }

    /// Serialize both tables to JSON
    pub fn to_json(&self) -> Result<String, RuleSetError> {
        Ok(serde_json::to_string_pretty(&self.to_file_layout())?)
    }

    /// Serialize both tables to TOML
    pub fn to_toml(&self) -> Result<String, RuleSetError> {
        Ok(toml::to_string_pretty(&self.to_file_layout())?)
    }

    fn to_file_layout(&self) -> RuleSetFile {
        RuleSetFile {
            classification: Some(self.classification.rules.clone()),
            fallback: Some(self.classification.fallback.clone()),
            validation: Some(self.validation.rules.clone()),
        }
    }

    fn from_file_layout(file: RuleSetFile) -> Result<Self, RuleSetError> {
        let mut set = Self::reference();

        if let Some(rules) = file.classification {
            warn!("Overriding reference classification table with {} custom rules", rules.len());
            set.classification.rules = rules;
        }
        if let Some(fallback) = file.fallback {
            set.classification.fallback = fallback;
        }
        if let Some(rules) = file.validation {
            warn!("Overriding reference validation table with {} custom rules", rules.len());
            set.validation.rules = rules;
        }

        set.validate()?;
        Ok(set)
    }

    /// Check every rule for NaN/inverted bounds and both tables for emptiness
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.classification.is_empty() {
            return Err(RuleSetError::EmptyTable("classification"));
        }
        if self.validation.is_empty() {
            return Err(RuleSetError::EmptyTable("validation"));
        }

        for (index, rule) in self.classification.rules.iter().enumerate() {
            check_range("classification", index, "m/z", rule.mz_min, rule.mz_max)?;
            check_range("classification", index, "RT", rule.rt_min, rule.rt_max)?;
            if !rule.adduct_mass_delta.is_finite() {
                return Err(RuleSetError::InvalidRule {
                    table: "classification",
                    index,
                    reason: "adduct mass delta is not finite".to_string(),
                });
            }
        }

        if !self.classification.fallback.adduct_mass_delta.is_finite() {
            return Err(RuleSetError::InvalidRule {
                table: "fallback",
                index: 0,
                reason: "adduct mass delta is not finite".to_string(),
            });
        }

        for (index, rule) in self.validation.rules.iter().enumerate() {
            check_range("validation", index, "RT", rule.rt_min, rule.rt_max)?;
        }

        Ok(())
    }
}

fn check_range(
    table: &'static str,
    index: usize,
    axis: &str,
    min: f64,
    max: f64,
) -> Result<(), RuleSetError> {
    if min.is_nan() || max.is_nan() {
        return Err(RuleSetError::InvalidRule {
            table,
            index,
            reason: format!("{} bound is NaN", axis),
        });
    }
    if min > max {
        return Err(RuleSetError::InvalidRule {
            table,
            index,
            reason: format!("{} range is inverted ({} > {})", axis, min, max),
        });
    }
    Ok(())
}
