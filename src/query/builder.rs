use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SearchParameters;
use crate::peak::Peak;
use crate::rules::{reference_rule_set, ClassificationRule, RuleTable};

/// A lipid class hypothesis for one feature, ready for an exact-mass search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Lipid category label, copied from the rule
    pub class_name: String,

    /// Observed m/z of the feature
    pub mz: f64,

    /// Retention time of the feature in seconds
    pub rt: f64,

    /// Mass tolerance for the search in ppm
    pub ppm_tolerance: f64,

    /// Adduct notation, copied from the rule
    pub adduct_label: String,

    /// Adduct mass shift, copied from the rule
    pub adduct_mass_delta: f64,

    /// Instrument mass resolving power
    pub mass_resolution: f64,

    /// Expected class abbreviation(s), copied from the rule
    pub expected_class_abbrev: String,

    /// Set when the table's fallback rule produced this query
    #[serde(default)]
    from_fallback: bool,
}

impl Query {
    fn from_rule(
        rule: &ClassificationRule,
        peak: &Peak,
        ppm_tolerance: f64,
        mass_resolution: f64,
        from_fallback: bool,
    ) -> Self {
        Self {
            class_name: rule.class_name.to_string(),
            mz: peak.mz,
            rt: peak.rt,
            ppm_tolerance,
            adduct_label: rule.adduct_label.to_string(),
            adduct_mass_delta: rule.adduct_mass_delta,
            mass_resolution,
            expected_class_abbrev: rule.expected_class_abbrev.to_string(),
            from_fallback,
        }
    }

    /// Neutral mass implied by the adduct hypothesis (`mz - adduct_mass_delta`)
    pub fn neutral_mass(&self) -> f64 {
        self.mz - self.adduct_mass_delta
    }

    /// Neutral mass search window `(low, high)` at the query's ppm tolerance
    pub fn mass_window(&self) -> (f64, f64) {
        let mass = self.neutral_mass();
        let tol = mass.abs() * self.ppm_tolerance * 1e-6;
        (mass - tol, mass + tol)
    }

    /// Whether this query came from the fallback rule rather than a table rule
    pub fn is_fallback(&self) -> bool {
        self.from_fallback
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) m/z {:.4} rt {:.2} +/-{} ppm",
            self.expected_class_abbrev,
            self.adduct_label,
            self.class_name,
            self.mz,
            self.rt,
            self.ppm_tolerance
        )
    }
}

/// Builds [`Query`] hypotheses from a classification rule table
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'t> {
    table: &'t RuleTable,
}

impl QueryBuilder<'static> {
    /// Builder over the process-wide reference table
    pub fn reference() -> Self {
        Self::new(&reference_rule_set().classification)
    }
}

impl Default for QueryBuilder<'static> {
    fn default() -> Self {
        Self::reference()
    }
}

impl<'t> QueryBuilder<'t> {
    /// Builder over a custom table
    pub fn new(table: &'t RuleTable) -> Self {
        Self { table }
    }

    /// The table this builder scans
    pub fn table(&self) -> &'t RuleTable {
        self.table
    }

    /// One query per matching rule, in table order.
    ///
    /// Returns the single fallback query when no rule matches, and an empty
    /// vector when the peak is not classifiable (`mz <= 0` or `rt < 0`).
    pub fn build(&self, peak: &Peak, ppm_tolerance: f64, mass_resolution: f64) -> Vec<Query> {
        if !peak.is_classifiable() {
            debug!("Skipping unclassifiable feature {}", peak);
            return Vec::new();
        }

        let mut queries: Vec<Query> = self
            .table
            .matching(peak)
            .inspect(|rule| {
                trace!("{} matches {} {}", peak, rule.expected_class_abbrev, rule.adduct_label)
            })
            .map(|rule| Query::from_rule(rule, peak, ppm_tolerance, mass_resolution, false))
            .collect();

        if queries.is_empty() {
            debug!("No class rule matches {}, using fallback", peak);
            queries.push(Query::from_rule(
                &self.table.fallback,
                peak,
                ppm_tolerance,
                mass_resolution,
                true,
            ));
        }

        queries
    }

    /// [`build`](Self::build) with tolerances taken from search parameters
    pub fn build_with(&self, peak: &Peak, parameters: &SearchParameters) -> Vec<Query> {
        self.build(peak, parameters.ppm_tolerance, parameters.mass_resolution)
    }
}

/// Build queries against the reference table
pub fn build_queries(peak: &Peak, ppm_tolerance: f64, mass_resolution: f64) -> Vec<Query> {
    QueryBuilder::reference().build(peak, ppm_tolerance, mass_resolution)
}
