//! # Annotation Pipeline
//!
//! Glue between the classifier and an exact-mass compound database:
//!
//! ```text
//! Peak -> QueryBuilder -> [Query] -> CompoundDatabase::search -> [identity]
//!      -> IdentityValidator -> [Annotation]
//! ```
//!
//! The database is a trait so that any search backend can be plugged in.
//! Database errors are terminal for the call that hit them; nothing is
//! retried.

use log::{debug, info};

use crate::config::SearchParameters;
use crate::identity::{CompoundIdentity, IdentityValidator};
use crate::peak::{Peak, PeakList};
use crate::query::{Query, QueryBuilder};

/// An exact-mass compound database searched with lipid class queries
pub trait CompoundDatabase {
    /// Candidate identity type
    type Identity: CompoundIdentity;

    /// Search failure
    type Error: std::error::Error + Send + Sync + 'static;

    /// Zero or more candidates for the query
    fn search(&self, query: &Query) -> Result<Vec<Self::Identity>, Self::Error>;
}

/// Errors that can occur while annotating
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError<E: std::error::Error + 'static> {
    /// The database search for a query failed
    #[error("Database search failed for {class} at m/z {mz}: {source}")]
    Database {
        /// Expected class abbreviation of the failing query
        class: String,
        /// m/z of the failing query
        mz: f64,
        /// Underlying database error
        #[source]
        source: E,
    },
}

/// A database identity accepted for a query
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<I> {
    /// Hypothesis that produced the candidate
    pub query: Query,
    /// Accepted candidate
    pub identity: I,
}

/// Result of annotating every row of a peak list
#[derive(Debug, Clone)]
pub struct AnnotationSummary<I> {
    /// Rows processed
    pub rows: usize,
    /// Queries issued
    pub queries: usize,
    /// Candidates returned by the database
    pub candidates: usize,
    /// Candidates accepted by validation
    pub accepted: usize,
    /// Accepted annotations with their row ID, in row order
    pub annotations: Vec<(u32, Annotation<I>)>,
}

impl<I> Default for AnnotationSummary<I> {
    fn default() -> Self {
        Self {
            rows: 0,
            queries: 0,
            candidates: 0,
            accepted: 0,
            annotations: Vec::new(),
        }
    }
}

struct PeakOutcome<I> {
    queries: usize,
    candidates: usize,
    annotations: Vec<Annotation<I>>,
}

/// Runs classification, database search and validation for features
#[derive(Debug, Clone, Copy)]
pub struct LipidAnnotator<'t> {
    builder: QueryBuilder<'t>,
    validator: IdentityValidator<'t>,
    parameters: SearchParameters,
}

impl LipidAnnotator<'static> {
    /// Annotator over the reference tables
    pub fn reference(parameters: SearchParameters) -> Self {
        Self::new(QueryBuilder::reference(), IdentityValidator::reference(), parameters)
    }
}

impl<'t> LipidAnnotator<'t> {
    /// Create an annotator
    pub fn new(
        builder: QueryBuilder<'t>,
        validator: IdentityValidator<'t>,
        parameters: SearchParameters,
    ) -> Self {
        Self {
            builder,
            validator,
            parameters,
        }
    }

    /// Search parameters in use
    pub fn parameters(&self) -> &SearchParameters {
        &self.parameters
    }

    /// Accepted annotations for one feature, in query order then database order
    pub fn annotate<D: CompoundDatabase>(
        &self,
        peak: &Peak,
        database: &D,
    ) -> Result<Vec<Annotation<D::Identity>>, AnnotateError<D::Error>> {
        Ok(self.annotate_counted(peak, database)?.annotations)
    }

    fn annotate_counted<D: CompoundDatabase>(
        &self,
        peak: &Peak,
        database: &D,
    ) -> Result<PeakOutcome<D::Identity>, AnnotateError<D::Error>> {
        let queries = self.builder.build_with(peak, &self.parameters);
        let mut outcome = PeakOutcome {
            queries: queries.len(),
            candidates: 0,
            annotations: Vec::new(),
        };

        for query in queries {
            let candidates = database.search(&query).map_err(|source| AnnotateError::Database {
                class: query.expected_class_abbrev.clone(),
                mz: query.mz,
                source,
            })?;
            outcome.candidates += candidates.len();

            for identity in candidates {
                if self.validator.validate(&query, &identity) {
                    outcome.annotations.push(Annotation {
                        query: query.clone(),
                        identity,
                    });
                } else {
                    debug!(
                        "Rejected {} for {} at rt {:.2}",
                        identity.compound_name(),
                        query.expected_class_abbrev,
                        query.rt
                    );
                }
            }
        }

        Ok(outcome)
    }

    /// Annotate every row of a peak list at its averaged position
    pub fn annotate_peak_list<D: CompoundDatabase>(
        &self,
        peak_list: &PeakList,
        database: &D,
    ) -> Result<AnnotationSummary<D::Identity>, AnnotateError<D::Error>> {
        let mut summary = AnnotationSummary::default();
        for row in &peak_list.rows {
            let outcome = self.annotate_counted(&row.as_peak(), database)?;
            merge(&mut summary, row.id, outcome);
        }
        log_summary(peak_list, &summary);
        Ok(summary)
    }

    /// Parallel [`annotate_peak_list`](Self::annotate_peak_list); same result order
    #[cfg(feature = "parallel")]
    pub fn annotate_peak_list_par<D>(
        &self,
        peak_list: &PeakList,
        database: &D,
    ) -> Result<AnnotationSummary<D::Identity>, AnnotateError<D::Error>>
    where
        D: CompoundDatabase + Sync,
        D::Identity: Send,
    {
        use rayon::prelude::*;

        let outcomes: Vec<(u32, PeakOutcome<D::Identity>)> = peak_list
            .rows
            .par_iter()
            .map(|row| Ok((row.id, self.annotate_counted(&row.as_peak(), database)?)))
            .collect::<Result<_, AnnotateError<D::Error>>>()?;

        let mut summary = AnnotationSummary::default();
        for (row_id, outcome) in outcomes {
            merge(&mut summary, row_id, outcome);
        }
        log_summary(peak_list, &summary);
        Ok(summary)
    }
}

fn merge<I>(summary: &mut AnnotationSummary<I>, row_id: u32, outcome: PeakOutcome<I>) {
    summary.rows += 1;
    summary.queries += outcome.queries;
    summary.candidates += outcome.candidates;
    summary.accepted += outcome.annotations.len();
    summary
        .annotations
        .extend(outcome.annotations.into_iter().map(|a| (row_id, a)));
}

fn log_summary<I>(peak_list: &PeakList, summary: &AnnotationSummary<I>) {
    info!(
        "Annotated {}: {} rows, {} queries, {} candidates, {} accepted",
        peak_list.name, summary.rows, summary.queries, summary.candidates, summary.accepted
    );
}
