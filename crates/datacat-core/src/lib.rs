//! Datacat core - catalog introspection, annotations, and ranked search for
//! PostgreSQL.
//!
//! The crate merges two sources of truth about a database: the native system
//! catalog (schemas, tables, columns, comments) and a supplemental annotation
//! store (long descriptions and update-month tags the catalog cannot hold).
//! On top of the merge it offers weighted free-text search, a calendar-window
//! freshness report, and documentation completeness audits.
//!
//! Every operation takes an explicit `&PgPool` store handle owned by the
//! caller; there is no process-wide connection state and no caching. Each
//! call is an independent read - or, for reconciliation, a single atomic
//! write transaction - against the backing store, and store failures
//! propagate to the caller unretried.

pub mod annotations;
pub mod audit;
pub mod error;
pub mod freshness;
pub mod introspect;
pub mod month;
pub mod search;
pub mod types;

pub use error::{Error, Result};
pub use freshness::{FreshnessReport, ReportWindows};
pub use month::Month;
pub use search::{SearchConfig, DEFAULT_LANGUAGE, DEFAULT_TIER_WEIGHTS, RESULT_LIMIT};
pub use types::{
    Annotation, ColumnEntry, SchemaEntry, SearchResult, TableEntry, TableId, TableSummary,
};
