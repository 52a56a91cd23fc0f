//! Normalization of `EXPLAIN` output into a dialect-neutral plan tree.
//!
//! Each dialect module understands one wire shape: PostgreSQL's nested
//! JSON, MySQL's flat `query_block` JSON, and SQLite's tabular
//! `EXPLAIN QUERY PLAN` rows. [`normalize_plan`] is the only entry point
//! callers need; it never panics and treats every malformed payload as
//! "no plan available".

mod mysql;
mod plan;
mod postgres;
mod sqlite;

pub use plan::PlanNode;

use sqlens_core::Dialect;

/// Parses raw `EXPLAIN` output for the given dialect into a [`PlanNode`]
/// tree. Returns `None` when the payload is empty or does not match the
/// dialect's expected shape.
pub fn normalize_plan(dialect: Dialect, payload: &str) -> Option<PlanNode> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return None;
    }
    let result = match dialect {
        Dialect::Postgres => postgres::parse_plan(trimmed).map_err(|e| e.to_string()),
        Dialect::MySql => mysql::parse_plan(trimmed).map_err(|e| e.to_string()),
        Dialect::Sqlite => sqlite::parse_plan(trimmed).map_err(|e| e.to_string()),
    };
    match result {
        Ok(node) => Some(node),
        Err(error) => {
            tracing::debug!(%dialect, %error, "discarding unparsable plan payload");
            None
        }
    }
}
