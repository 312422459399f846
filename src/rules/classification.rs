use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::constants::*;
use crate::peak::Peak;

/// A single lipid class hypothesis keyed on an m/z and RT window
///
/// All four bounds are exclusive: a feature sitting exactly on an edge does
/// not match. `class_name` is an opaque display label; a trailing `*` in it is
/// never interpreted as a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Lower m/z bound (exclusive)
    #[serde(default)]
    pub mz_min: f64,

    /// Upper m/z bound (exclusive)
    #[serde(default = "unbounded")]
    pub mz_max: f64,

    /// Lower RT bound in seconds (exclusive)
    #[serde(default)]
    pub rt_min: f64,

    /// Upper RT bound in seconds (exclusive)
    #[serde(default = "unbounded")]
    pub rt_max: f64,

    /// Lipid category label passed on to the database search
    pub class_name: Cow<'static, str>,

    /// Mass shift of the expected adduct
    pub adduct_mass_delta: f64,

    /// Adduct notation, e.g. `[M+H]`
    pub adduct_label: Cow<'static, str>,

    /// Expected lipid class abbreviation(s), e.g. `GPCho/GPEtn/GPIns/GPSer`
    pub expected_class_abbrev: Cow<'static, str>,
}

fn unbounded() -> f64 {
    UNBOUNDED
}

impl ClassificationRule {
    /// The rule used when nothing in the table matches
    pub const fn fallback() -> Self {
        Self {
            mz_min: 0.0,
            mz_max: 0.0,
            rt_min: 0.0,
            rt_max: 0.0,
            class_name: Cow::Borrowed(FALLBACK_CLASS_NAME),
            adduct_mass_delta: PROTON_MASS,
            adduct_label: Cow::Borrowed(FALLBACK_ADDUCT_LABEL),
            expected_class_abbrev: Cow::Borrowed(FALLBACK_CLASS_ABBREV),
        }
    }

    /// Strict window test on both axes
    #[inline]
    pub fn matches(&self, peak: &Peak) -> bool {
        peak.mz > self.mz_min
            && peak.mz < self.mz_max
            && peak.rt > self.rt_min
            && peak.rt < self.rt_max
    }
}

/// Ordered classification rules plus the fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Rules in declaration order
    pub rules: Vec<ClassificationRule>,
    /// Used only when no rule matches
    pub fallback: ClassificationRule,
}

impl RuleTable {
    /// Create a table with the reference fallback
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self {
            rules,
            fallback: ClassificationRule::fallback(),
        }
    }

    /// Replace the fallback rule
    pub fn with_fallback(mut self, fallback: ClassificationRule) -> Self {
        self.fallback = fallback;
        self
    }

    /// The built-in lipid class table
    pub fn reference() -> Self {
        Self::new(REFERENCE_CLASSIFICATION_RULES.to_vec())
    }

    /// Rules matching the peak, in table order
    pub fn matching<'a>(&'a self, peak: &'a Peak) -> impl Iterator<Item = &'a ClassificationRule> {
        self.rules.iter().filter(move |rule| rule.matches(peak))
    }

    /// Number of rules, excluding the fallback
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules besides the fallback
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Reference lipid class table (positive ion mode, RT in seconds).
///
/// Windows overlap on purpose; every matching row yields its own hypothesis.
#[rustfmt::skip]
pub static REFERENCE_CLASSIFICATION_RULES: [ClassificationRule; 13] = [
    ClassificationRule {
        mz_min: 0.0, mz_max: 650.0, rt_min: 0.0, rt_max: 300.0,
        class_name: Cow::Borrowed("Glycerophospholipi*"),
        adduct_mass_delta: PROTON_MASS,
        adduct_label: Cow::Borrowed("[M+H]"),
        expected_class_abbrev: Cow::Borrowed("LPC/LPE/LPA/LSer"),
    },
    ClassificationRule {
        mz_min: 0.0, mz_max: 500.0, rt_min: 0.0, rt_max: 300.0,
        class_name: Cow::Borrowed("Glycerolipids"),
        adduct_mass_delta: PROTONATED_WATER_LOSS,
        adduct_label: Cow::Borrowed("[(M+H)-18]"),
        expected_class_abbrev: Cow::Borrowed("MAG"),
    },
    ClassificationRule {
        mz_min: 550.0, mz_max: UNBOUNDED, rt_min: 300.0, rt_max: 420.0,
        class_name: Cow::Borrowed("Glycerophospholipi*"),
        adduct_mass_delta: PROTON_MASS,
        adduct_label: Cow::Borrowed("[M+H]"),
        expected_class_abbrev: Cow::Borrowed("GPCho/GPEtn/GPIns/GPSer"),
    },
    ClassificationRule {
        mz_min: 340.0, mz_max: UNBOUNDED, rt_min: 0.0, rt_max: 430.0,
        class_name: Cow::Borrowed("Sphingolipids"),
        adduct_mass_delta: PROTONATED_WATER_LOSS,
        adduct_label: Cow::Borrowed("[(M+H)-18]"),
        expected_class_abbrev: Cow::Borrowed("Cer"),
    },
    ClassificationRule {
        mz_min: 0.0, mz_max: UNBOUNDED, rt_min: 330.0, rt_max: 420.0,
        class_name: Cow::Borrowed("Sphingolipids"),
        adduct_mass_delta: PROTON_MASS,
        adduct_label: Cow::Borrowed("[M+H]"),
        expected_class_abbrev: Cow::Borrowed("SM"),
    },
    ClassificationRule {
        mz_min: 550.0, mz_max: UNBOUNDED, rt_min: 0.0, rt_max: 410.0,
        class_name: Cow::Borrowed("Glycerophospholipi*"),
        adduct_mass_delta: PHOSPHATE_LOSS,
        adduct_label: Cow::Borrowed("[M-97]"),
        expected_class_abbrev: Cow::Borrowed("GPA"),
    },
    ClassificationRule {
        mz_min: 550.0, mz_max: UNBOUNDED, rt_min: 0.0, rt_max: 410.0,
        class_name: Cow::Borrowed("Glycerophospholipi*"),
        adduct_mass_delta: GLYCEROPHOSPHATE_LOSS,
        adduct_label: Cow::Borrowed("[M-171]"),
        expected_class_abbrev: Cow::Borrowed("GPGro"),
    },
    ClassificationRule {
        mz_min: 350.0, mz_max: UNBOUNDED, rt_min: 0.0, rt_max: 410.0,
        class_name: Cow::Borrowed("Glycerolipids"),
        adduct_mass_delta: AMMONIUM_ADDUCT,
        adduct_label: Cow::Borrowed("[M+18]"),
        expected_class_abbrev: Cow::Borrowed("DAG"),
    },
    ClassificationRule {
        mz_min: 0.0, mz_max: UNBOUNDED, rt_min: 410.0, rt_max: UNBOUNDED,
        class_name: Cow::Borrowed("Glycerolipids"),
        adduct_mass_delta: AMMONIUM_ADDUCT,
        adduct_label: Cow::Borrowed("[M+18]"),
        expected_class_abbrev: Cow::Borrowed("TAG"),
    },
    ClassificationRule {
        mz_min: 550.0, mz_max: UNBOUNDED, rt_min: 350.0, rt_max: UNBOUNDED,
        class_name: Cow::Borrowed("Sterollipids"),
        adduct_mass_delta: AMMONIUM_ADDUCT,
        adduct_label: Cow::Borrowed("[M+18]"),
        expected_class_abbrev: Cow::Borrowed("ChoE"),
    },
    ClassificationRule {
        mz_min: 1000.0, mz_max: UNBOUNDED, rt_min: 410.0, rt_max: UNBOUNDED,
        class_name: Cow::Borrowed("Glycerophospholipi*"),
        adduct_mass_delta: TRISODIUM_ADDUCT,
        adduct_label: Cow::Borrowed("[M-2H+3Na]+"),
        expected_class_abbrev: Cow::Borrowed("CL"),
    },
    ClassificationRule {
        mz_min: 1000.0, mz_max: UNBOUNDED, rt_min: 410.0, rt_max: UNBOUNDED,
        class_name: Cow::Borrowed("Glycerophospholipi*"),
        adduct_mass_delta: DISODIUM_ADDUCT,
        adduct_label: Cow::Borrowed("[M-H+2Na]+"),
        expected_class_abbrev: Cow::Borrowed("CL"),
    },
    ClassificationRule {
        mz_min: 1000.0, mz_max: UNBOUNDED, rt_min: 410.0, rt_max: UNBOUNDED,
        class_name: Cow::Borrowed("Glycerophospholipi*"),
        adduct_mass_delta: SODIUM_MASS,
        adduct_label: Cow::Borrowed("[M+Na]+"),
        expected_class_abbrev: Cow::Borrowed("CL"),
    },
];
