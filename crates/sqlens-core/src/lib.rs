//! SQLens Core - Shared types for the SQLens analysis engine
//!
//! This crate provides the fundamental types that the other SQLens crates
//! depend on:
//!
//! - `Value`, `Row`, `ColumnMeta`, `QueryResult` - result-set data
//! - `ColumnInfo`, `IndexInfo`, `ForeignKeyInfo` - schema snapshots
//! - `Dialect` - the database dialect tag used for plan normalization
//! - `SqlensError` - the shared error type

mod dialect;
mod error;
mod schema;
mod types;

pub use dialect::*;
pub use error::*;
pub use schema::*;
pub use types::*;
