//! Placeholder substitution
//!
//! Re-scans with the same mode tracking as detection and replaces
//! recognized placeholders with caller-supplied values. Placeholders
//! without a supplied value are left as-is.

use std::collections::HashMap;

use sqlens_core::Value;

use super::scanner::{RawPlaceholder, for_each_placeholder};

/// Substitutes bind values into a SQL statement.
///
/// `values` is keyed by canonical token: `$1` and `:name` as written,
/// `?1`, `?2`, ... for successive `?` occurrences. Values are escaped
/// with [`escape_literal`]; tokens with no supplied value stay in place.
///
/// ```
/// use std::collections::HashMap;
/// use sqlens_query::substitute_parameters;
///
/// let mut values = HashMap::new();
/// values.insert("$1".to_string(), "O'Brien".to_string());
///
/// let sql = substitute_parameters("SELECT * FROM t WHERE name = $1", &values);
/// assert_eq!(sql, "SELECT * FROM t WHERE name = 'O''Brien'");
/// ```
pub fn substitute_parameters(sql: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut last_end = 0usize;
    let mut positional_count = 0usize;

    for_each_placeholder(sql, |start, end, raw| {
        let token = match raw {
            RawPlaceholder::Numbered(t) | RawPlaceholder::Named(t) => t.to_string(),
            RawPlaceholder::Positional => {
                positional_count += 1;
                format!("?{}", positional_count)
            }
        };

        out.push_str(&sql[last_end..start]);
        match values.get(&token) {
            Some(value) => out.push_str(&escape_literal(value)),
            None => out.push_str(&sql[start..end]),
        }
        last_end = end;
    });

    out.push_str(&sql[last_end..]);
    out
}

/// Substitutes typed [`Value`]s by rendering them to literal text first.
///
/// `Value::Null` renders as `NULL`; everything else goes through its
/// full literal text (never the preview-truncated comparison form) and
/// the normal escaping rules.
pub fn substitute_values(sql: &str, values: &HashMap<String, Value>) -> String {
    let rendered: HashMap<String, String> = values
        .iter()
        .map(|(k, v)| (k.clone(), v.literal_text()))
        .collect();
    substitute_parameters(sql, &rendered)
}

/// Escapes a raw value for inline inclusion in SQL text.
///
/// Case-insensitive `NULL` and plain decimal numbers pass through
/// unquoted; everything else is single-quoted with embedded quotes
/// doubled.
pub fn escape_literal(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("null") || is_plain_decimal(raw) {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// True for an optionally signed decimal number with at most one point
fn is_plain_decimal(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    if body.is_empty() {
        return false;
    }
    let mut seen_digit = false;
    let mut seen_point = false;
    for c in body.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}
