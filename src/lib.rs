//! # mzLipid - Rule-Driven Lipid Class Hypotheses for LC-MS Features
//!
//! `mzlipid` takes detected chromatographic features (m/z, retention time)
//! and proposes lipid class hypotheses for them, each with the adduct mass
//! shift, mass tolerance and instrument resolution an exact-mass database
//! search needs. Hits coming back from such a search can then be checked
//! against the feature's retention time and discarded when implausible.
//!
//! ## Key Features
//!
//! - **Ambiguity preserving**: overlapping rule windows produce every
//!   plausible class hypothesis, not a single best guess.
//!
//! - **Never empty**: a classifiable feature always yields at least one
//!   query; when no rule matches, a proton-adduct fallback query is emitted.
//!
//! - **Auditable rules**: both rule tables are literal, strongly typed data
//!   and can be replaced from TOML or JSON without touching matching code.
//!
//! - **Pure and thread-safe**: classification and validation are pure
//!   functions over immutable tables and can run on any number of threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use mzlipid::prelude::*;
//!
//! let builder = QueryBuilder::reference();
//! let validator = IdentityValidator::reference();
//!
//! let queries = builder.build(&Peak::new(885.55, 450.0), 10.0, 10_000.0);
//! let tag = queries
//!     .iter()
//!     .find(|q| q.expected_class_abbrev == "TAG")
//!     .expect("TAG window covers late eluting features");
//!
//! assert_eq!(tag.adduct_label, "[M+18]");
//! assert!(validator.validate(tag, "TAG 52:2"));
//! assert!(!validator.validate(tag, "MAG 18:1"));
//! ```
//!
//! ## Architecture
//!
//! - [`rules`]: classification and identity validation rule tables
//! - [`query`]: feature -> lipid class queries
//! - [`identity`]: RT plausibility check for database identities
//! - [`annotate`]: query / search / validate pipeline over a database trait
//! - [`peak`]: feature and aligned peak list data model
//! - [`export`]: delimited-text export of aligned peak lists
//! - [`logratio`]: log-ratio RT/m/z dataset between two sample groups
//! - [`config`]: TOML configuration
//!
//! ## Rule Semantics
//!
//! | Table | Match condition | Result |
//! |-------|-----------------|--------|
//! | Classification | `mz_min < mz < mz_max` and `rt_min < rt < rt_max` | one query per matching rule, fallback if none |
//! | Validation | `rt_min < rt < rt_max` and name contains substring | `true` on first match |
//!
//! Retention times are in seconds. All bounds are exclusive.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod annotate;
pub mod config;
pub mod export;
pub mod identity;
pub mod logratio;
pub mod peak;
pub mod query;
pub mod rules;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::annotate::{
        AnnotateError, Annotation, AnnotationSummary, CompoundDatabase, LipidAnnotator,
    };
    pub use crate::config::{Config, ConfigError, SearchParameters};
    pub use crate::export::{
        CsvExporter, ExportCommonElement, ExportDataFileElement, ExportError, ExportSettings,
        ExportStats,
    };
    pub use crate::identity::{CompoundIdentity, IdentityValidator, SimpleCompoundIdentity};
    pub use crate::logratio::{LogratioDataset, LogratioError, LogratioItem, MeasurementType};
    pub use crate::peak::{Peak, PeakList, PeakListRow, PeakStatus, SamplePeak};
    pub use crate::query::{build_queries, Query, QueryBuilder};
    pub use crate::rules::{
        reference_rule_set, ClassificationRule, IdentityValidationRule, RuleSet, RuleSetError,
        RuleTable, ValidationTable,
    };
}
