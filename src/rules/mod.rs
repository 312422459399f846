//! # Lipid Class Rule Tables
//!
//! Two ordered, read-only tables drive the classifier:
//!
//! 1. **Classification rules** map an (m/z, RT) window to a lipid category,
//!    an expected adduct and the expected class abbreviation. Windows overlap,
//!    so a single feature can produce several competing hypotheses. A single
//!    fallback rule (`AUTO` adduct, `NOIDEA` class) covers features that match
//!    nothing.
//!
//! 2. **Identity validation rules** map an RT window to a class-name substring.
//!    A database hit is only plausible when its name contains the substring and
//!    the feature elutes inside the window.
//!
//! Every bound in both tables is exclusive. The reference tables are literal
//! data in this module; [`RuleSet`] can load replacements from TOML or JSON
//! without touching the matching code.

mod classification;
pub mod constants;
mod error;
mod set;
mod validation;


pub use classification::{ClassificationRule, RuleTable, REFERENCE_CLASSIFICATION_RULES};
pub use error::RuleSetError;
pub use set::RuleSet;
pub use validation::{IdentityValidationRule, ValidationTable, REFERENCE_VALIDATION_RULES};

use std::sync::OnceLock;

/// Process-wide reference rule set, built on first use
pub fn reference_rule_set() -> &'static RuleSet {
    static REFERENCE: OnceLock<RuleSet> = OnceLock::new();
    REFERENCE.get_or_init(RuleSet::reference)
}
