//! SQLens Query - Statement splitting and bind-parameter handling
//!
//! This crate provides the text-level half of the SQLens engine:
//! - Splitting a multi-statement script into individually executable
//!   statements while respecting string literals and comments
//! - Detecting and substituting bind-parameter placeholders across the
//!   numbered (`$1`), named (`:name`), and positional (`?`) conventions

pub mod parameters;
mod splitter;

pub use parameters::{
    Parameter, ParameterStyle, scan_parameters, substitute_parameters, substitute_values,
};
pub use splitter::split_statements;
