//! Placeholder detection
//!
//! A single left-to-right scan with the same mode tracking as the
//! statement splitter. This is lexical analysis, not parsing: it only
//! understands quoting, comments, and placeholder syntax.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The placeholder family a parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStyle {
    /// `$1`, `$2`, ... - deduplicated by token
    Numbered,
    /// `:name` - deduplicated by token
    Named,
    /// `?` - never deduplicated, each occurrence is distinct
    Positional,
}

/// A bind parameter detected in a SQL statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Canonical token: `$1`, `:name`, or `?3` for the third `?`
    pub name: String,
    /// Placeholder family
    pub style: ParameterStyle,
    /// Placeholder number for numbered parameters, occurrence index for
    /// positional ones, first-occurrence rank for named ones (all 1-based)
    pub ordinal: usize,
}

/// A raw placeholder occurrence found during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawPlaceholder<'a> {
    Numbered(&'a str),
    Named(&'a str),
    Positional,
}

/// Walks `sql` and invokes `f` with the byte range and kind of every
/// placeholder occurrence outside strings, identifiers, and comments.
///
/// The `::type` cast operator is consumed as plain text so `x::int`
/// never produces a named placeholder.
pub(crate) fn for_each_placeholder<'a, F>(sql: &'a str, mut f: F)
where
    F: FnMut(usize, usize, RawPlaceholder<'a>),
{
    let bytes = sql.as_bytes();
    let len = bytes.len();
    let mut in_single = false;
    let mut in_double = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut i = 0;

    while i < len {
        let b = bytes[i];
        let next = if i + 1 < len { Some(bytes[i + 1]) } else { None };

        if in_line_comment {
            if b == b'\n' {
                in_line_comment = false;
            }
            i += 1;
            continue;
        }

        if in_block_comment {
            if b == b'*' && next == Some(b'/') {
                in_block_comment = false;
                i += 2;
                continue;
            }
            i += 1;
            continue;
        }

        if in_single {
            if b == b'\'' {
                if next == Some(b'\'') {
                    i += 2;
                    continue;
                }
                in_single = false;
            }
            i += 1;
            continue;
        }

        if in_double {
            if b == b'"' {
                if next == Some(b'"') {
                    i += 2;
                    continue;
                }
                in_double = false;
            }
            i += 1;
            continue;
        }

        match b {
            b'-' if next == Some(b'-') => {
                in_line_comment = true;
                i += 2;
            }
            b'/' if next == Some(b'*') => {
                in_block_comment = true;
                i += 2;
            }
            b'\'' => {
                in_single = true;
                i += 1;
            }
            b'"' => {
                in_double = true;
                i += 1;
            }
            b'$' if next.is_some_and(|n| n.is_ascii_digit()) => {
                let mut j = i + 1;
                while j < len && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                f(i, j, RawPlaceholder::Numbered(&sql[i..j]));
                i = j;
            }
            b':' => {
                if next == Some(b':') {
                    // `::type` cast operator, not a placeholder
                    i += 2;
                } else if next.is_some_and(is_ident_start) {
                    let mut j = i + 1;
                    while j < len && is_ident_char(bytes[j]) {
                        j += 1;
                    }
                    f(i, j, RawPlaceholder::Named(&sql[i..j]));
                    i = j;
                } else {
                    i += 1;
                }
            }
            b'?' => {
                f(i, i + 1, RawPlaceholder::Positional);
                i += 1;
            }
            _ => i += 1,
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Detects bind parameters in a SQL statement.
///
/// Numbered and named placeholders are deduplicated by exact token and
/// returned in first-occurrence order; every `?` is a distinct parameter
/// with a fresh ordinal.
///
/// ```
/// use sqlens_query::{scan_parameters, ParameterStyle};
///
/// let params = scan_parameters("WHERE a = $1 AND b = $1 AND c = $2");
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[0].name, "$1");
/// assert_eq!(params[1].name, "$2");
///
/// let params = scan_parameters("SELECT x::int FROM t WHERE id = :id");
/// assert_eq!(params.len(), 1);
/// assert_eq!(params[0].style, ParameterStyle::Named);
/// ```
pub fn scan_parameters(sql: &str) -> Vec<Parameter> {
    let mut params: Vec<Parameter> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut positional_count = 0usize;
    let mut named_count = 0usize;

    for_each_placeholder(sql, |_, _, raw| match raw {
        RawPlaceholder::Numbered(token) => {
            if seen.insert(token.to_string()) {
                let ordinal = token[1..].parse().unwrap_or(0);
                params.push(Parameter {
                    name: token.to_string(),
                    style: ParameterStyle::Numbered,
                    ordinal,
                });
            }
        }
        RawPlaceholder::Named(token) => {
            if seen.insert(token.to_string()) {
                named_count += 1;
                params.push(Parameter {
                    name: token.to_string(),
                    style: ParameterStyle::Named,
                    ordinal: named_count,
                });
            }
        }
        RawPlaceholder::Positional => {
            positional_count += 1;
            params.push(Parameter {
                name: format!("?{}", positional_count),
                style: ParameterStyle::Positional,
                ordinal: positional_count,
            });
        }
    });

    params
}
