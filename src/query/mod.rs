//! # Lipid Class Queries
//!
//! Turns a single feature into one or more lipid class hypotheses
//! ([`Query`]), one per matching classification rule. A feature that matches
//! no rule gets exactly one hypothesis from the fallback rule; a feature that
//! fails the domain guard (`mz <= 0` or `rt < 0`) gets none.
//!
//! ```rust
//! use mzlipid::peak::Peak;
//! use mzlipid::query::QueryBuilder;
//!
//! let builder = QueryBuilder::reference();
//! let queries = builder.build(&Peak::new(600.0, 350.0), 10.0, 10_000.0);
//!
//! // Overlapping windows yield competing hypotheses
//! assert!(queries.len() >= 2);
//! assert!(queries.iter().any(|q| q.expected_class_abbrev == "GPCho/GPEtn/GPIns/GPSer"));
//! ```

mod builder;


pub use builder::{build_queries, Query, QueryBuilder};
