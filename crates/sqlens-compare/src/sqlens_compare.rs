//! Comparison tools for SQLens.
//!
//! [`schema`] diffs lists of schema descriptors (columns, indexes,
//! foreign keys) by name. [`rows`] diffs query result sets, either by a
//! key column or positionally.

pub mod rows;
pub mod schema;

pub use rows::{diff_rows_by_key, diff_rows_positional, ResultComparer, RowDiffEntry, RowDiffSummary, RowStatus};
pub use schema::{diff_descriptors, DiffEntry, DiffStatus, TrackedFields};
