use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::constants::UNBOUNDED;

/// Retention-time window in which identities naming a given class are plausible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityValidationRule {
    /// Lower RT bound in seconds (exclusive)
    #[serde(default)]
    pub rt_min: f64,

    /// Upper RT bound in seconds (exclusive)
    #[serde(default = "unbounded")]
    pub rt_max: f64,

    /// Case-sensitive substring the compound name must contain
    pub class_name_substring: Cow<'static, str>,
}

fn unbounded() -> f64 {
    UNBOUNDED
}

impl IdentityValidationRule {
    /// Strict RT window test plus literal substring containment
    #[inline]
    pub fn accepts(&self, rt: f64, compound_name: &str) -> bool {
        rt > self.rt_min && rt < self.rt_max && compound_name.contains(&*self.class_name_substring)
    }
}

/// Ordered identity validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationTable {
    /// Rules in declaration order
    pub rules: Vec<IdentityValidationRule>,
}

impl ValidationTable {
    /// Create a table from rules
    pub fn new(rules: Vec<IdentityValidationRule>) -> Self {
        Self { rules }
    }

    /// The built-in RT plausibility table
    pub fn reference() -> Self {
        Self::new(REFERENCE_VALIDATION_RULES.to_vec())
    }

    /// First rule accepting the pair, if any
    pub fn first_accepting(&self, rt: f64, compound_name: &str) -> Option<&IdentityValidationRule> {
        self.rules.iter().find(|rule| rule.accepts(rt, compound_name))
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ValidationTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Reference identity validation table (RT in seconds)
#[rustfmt::skip]
pub static REFERENCE_VALIDATION_RULES: [IdentityValidationRule; 8] = [
    IdentityValidationRule { rt_min: 0.0, rt_max: 300.0, class_name_substring: Cow::Borrowed("Lyso") },
    IdentityValidationRule { rt_min: 0.0, rt_max: 400.0, class_name_substring: Cow::Borrowed("DAG") },
    IdentityValidationRule { rt_min: 410.0, rt_max: UNBOUNDED, class_name_substring: Cow::Borrowed("TAG") },
    IdentityValidationRule { rt_min: 0.0, rt_max: 300.0, class_name_substring: Cow::Borrowed("MAG") },
    IdentityValidationRule { rt_min: 200.0, rt_max: 380.0, class_name_substring: Cow::Borrowed("GP") },
    IdentityValidationRule { rt_min: 0.0, rt_max: 430.0, class_name_substring: Cow::Borrowed("Cer") },
    IdentityValidationRule { rt_min: 0.0, rt_max: 420.0, class_name_substring: Cow::Borrowed("SM") },
    IdentityValidationRule { rt_min: 410.0, rt_max: UNBOUNDED, class_name_substring: Cow::Borrowed("ChoE") },
];
