//! SQL bind-parameter detection and substitution
//!
//! Supports three placeholder families:
//!
//! - Numbered: `$1`, `$2`, ... (deduplicated by token)
//! - Named: `:name` (deduplicated by token; the `::type` cast operator is
//!   never treated as a placeholder)
//! - Positional: `?` (never deduplicated; each occurrence gets a fresh
//!   ordinal, addressed as `?1`, `?2`, ...)
//!
//! Detection and substitution share the same quote/comment mode tracking
//! as the statement splitter, so placeholders inside string literals and
//! comments are ignored.

mod scanner;
mod substituter;

pub use scanner::{Parameter, ParameterStyle, scan_parameters};
pub use substituter::{escape_literal, substitute_parameters, substitute_values};

#[cfg(test)]
mod tests;
