//! Static catalog of the example datasource
//!
//! - `registry`: table and column definitions
//! - `extractor`: per-column accessors over domain records

pub mod extractor;
pub mod registry;

pub use extractor::ExtractorTable;
pub use registry::{SchemaRegistry, COMPANIES_TABLE, DEPARTMENTS_TABLE, USERS_TABLE};
