//! `stockroom-catalog` — inventory catalog engine.
//!
//! Joins three keyed sources (attributes, prices, service dates), derives the
//! catalog reports and resolves free-text lookups. Receives source text,
//! returns rendered text; file and console IO live in the CLI.

pub mod config;
pub mod emit;
pub mod error;
pub mod ingest;
pub mod model;
pub mod query;
pub mod report;
pub mod store;

pub use config::{CatalogConfig, MalformedPolicy};
pub use error::CatalogError;
pub use ingest::{load_store, IngestReport};
pub use model::{JoinedItem, SourceKind};
pub use query::{resolve, NoMatch, QueryMatch, QueryOutcome};
pub use report::{CatalogReports, ReportSummary};
pub use store::RecordStore;
