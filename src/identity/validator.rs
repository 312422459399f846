use super::CompoundIdentity;
use crate::query::Query;
use crate::rules::{reference_rule_set, IdentityValidationRule, ValidationTable};

/// Retention-time plausibility filter for database hits
#[derive(Debug, Clone, Copy)]
pub struct IdentityValidator<'t> {
    table: &'t ValidationTable,
}

impl IdentityValidator<'static> {
    /// Validator over the process-wide reference table
    pub fn reference() -> Self {
        Self::new(&reference_rule_set().validation)
    }
}

impl Default for IdentityValidator<'static> {
    fn default() -> Self {
        Self::reference()
    }
}

impl<'t> IdentityValidator<'t> {
    /// Validator over a custom table
    pub fn new(table: &'t ValidationTable) -> Self {
        Self { table }
    }

    /// The table this validator scans
    pub fn table(&self) -> &'t ValidationTable {
        self.table
    }

    /// Whether `identity` is plausible at the query's retention time.
    ///
    /// True on the first rule with `rt_min < query.rt < rt_max` whose
    /// substring occurs in the identity name (case-sensitive).
    pub fn validate<I>(&self, query: &Query, identity: &I) -> bool
    where
        I: CompoundIdentity + ?Sized,
    {
        self.accepting_rule(query, identity).is_some()
    }

    /// The rule that accepts the pair, for reporting
    pub fn accepting_rule<I>(
        &self,
        query: &Query,
        identity: &I,
    ) -> Option<&'t IdentityValidationRule>
    where
        I: CompoundIdentity + ?Sized,
    {
        self.table.first_accepting(query.rt, identity.compound_name())
    }
}
