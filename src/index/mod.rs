//! Search index records and the read-only store that holds them.
//!
//! This module provides:
//! - `IndexRecord` and its `Category` tag
//! - `SearchIndexStore` with ordered iteration and location lookup
//! - Detection of the plain JSON and script file layouts
//! - Consistency checks that do not fail the load

pub mod format;
pub mod lint;
pub mod record;
pub mod store;

pub use format::{DEFAULT_VARIABLE, SourceFormat};
pub use lint::{LintIssue, LintKind, lint};
pub use record::{Category, IndexRecord};
pub use store::{IndexStats, LocationRecords, PageGroup, Pages, SearchIndexStore};
