//! Tests for parameter detection and substitution

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use sqlens_core::Value;

use super::scanner::{Parameter, ParameterStyle, scan_parameters};
use super::substituter::{escape_literal, substitute_parameters, substitute_values};

#[test]
fn test_scan_numbered_parameters() {
    let params = scan_parameters("SELECT * FROM users WHERE id = $1 AND name = $2");

    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "$1");
    assert_eq!(params[0].style, ParameterStyle::Numbered);
    assert_eq!(params[0].ordinal, 1);
    assert_eq!(params[1].name, "$2");
    assert_eq!(params[1].ordinal, 2);
}

#[test]
fn test_numbered_parameters_dedupe_by_token() {
    let params = scan_parameters("WHERE a = $1 AND b = $1 AND c = $2");

    assert_eq!(
        params,
        vec![
            Parameter {
                name: "$1".into(),
                style: ParameterStyle::Numbered,
                ordinal: 1,
            },
            Parameter {
                name: "$2".into(),
                style: ParameterStyle::Numbered,
                ordinal: 2,
            },
        ]
    );
}

#[test]
fn test_scan_named_parameters() {
    let params = scan_parameters("SELECT * FROM users WHERE id = :id AND name = :name");

    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, ":id");
    assert_eq!(params[0].style, ParameterStyle::Named);
    assert_eq!(params[1].name, ":name");
}

#[test]
fn test_named_parameters_dedupe_by_token() {
    let params = scan_parameters("WHERE id = :id OR parent_id = :id");

    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, ":id");
}

#[test]
fn test_positional_parameters_never_dedupe() {
    let params = scan_parameters("WHERE a = ? AND b = ? AND c = ?");

    assert_eq!(params.len(), 3);
    assert_eq!(params[0].name, "?1");
    assert_eq!(params[1].name, "?2");
    assert_eq!(params[2].name, "?3");
    assert!(params.iter().all(|p| p.style == ParameterStyle::Positional));
}

#[test]
fn test_cast_operator_is_not_a_named_parameter() {
    let params = scan_parameters("SELECT x::int FROM t");
    assert!(params.is_empty());

    let params = scan_parameters("SELECT x::int FROM t WHERE id = :id");
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, ":id");
}

#[test]
fn test_placeholders_inside_strings_and_comments_ignored() {
    let sql = "SELECT ':fake' AS a, -- $1 not real\n/* ? neither */ b FROM t WHERE c = $2";
    let params = scan_parameters(sql);

    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "$2");
}

#[test]
fn test_doubled_quote_does_not_end_literal() {
    let params = scan_parameters("SELECT 'it''s :not_a_param' WHERE id = :id");

    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, ":id");
}

#[test]
fn test_substitute_numbered() {
    let mut values = HashMap::new();
    values.insert("$1".to_string(), "42".to_string());
    values.insert("$2".to_string(), "Alice".to_string());

    let sql = substitute_parameters("WHERE id = $1 AND name = $2", &values);
    assert_eq!(sql, "WHERE id = 42 AND name = 'Alice'");
}

#[test]
fn test_substitute_repeated_token_replaces_every_occurrence() {
    let mut values = HashMap::new();
    values.insert("$1".to_string(), "7".to_string());

    let sql = substitute_parameters("WHERE a = $1 OR b = $1", &values);
    assert_eq!(sql, "WHERE a = 7 OR b = 7");
}

#[test]
fn test_substitute_positional_by_occurrence() {
    let mut values = HashMap::new();
    values.insert("?1".to_string(), "1".to_string());
    values.insert("?2".to_string(), "two".to_string());

    let sql = substitute_parameters("WHERE a = ? AND b = ?", &values);
    assert_eq!(sql, "WHERE a = 1 AND b = 'two'");
}

#[test]
fn test_missing_value_leaves_placeholder_as_is() {
    let values = HashMap::new();
    let sql = substitute_parameters("WHERE id = :id", &values);

    assert_eq!(sql, "WHERE id = :id");
}

#[test]
fn test_substitute_skips_strings_and_comments() {
    let mut values = HashMap::new();
    values.insert(":id".to_string(), "5".to_string());

    let sql = substitute_parameters("SELECT ':id' AS x -- :id\nFROM t WHERE id = :id", &values);
    assert_eq!(sql, "SELECT ':id' AS x -- :id\nFROM t WHERE id = 5");
}

#[test]
fn test_substitute_then_rescan_finds_nothing() {
    let sql = "WHERE a = $1 AND b = :name AND c = ?";
    let params = scan_parameters(sql);

    let values: HashMap<String, String> = params
        .iter()
        .map(|p| (p.name.clone(), "plain value".to_string()))
        .collect();

    let substituted = substitute_parameters(sql, &values);
    assert!(scan_parameters(&substituted).is_empty());
}

#[test]
fn test_escape_null_passes_unquoted() {
    assert_eq!(escape_literal("NULL"), "NULL");
    assert_eq!(escape_literal("null"), "null");
}

#[test]
fn test_escape_decimals_pass_unquoted() {
    assert_eq!(escape_literal("42"), "42");
    assert_eq!(escape_literal("-3.5"), "-3.5");
    assert_eq!(escape_literal("+0.25"), "+0.25");
}

#[test]
fn test_escape_quotes_everything_else() {
    assert_eq!(escape_literal("abc"), "'abc'");
    assert_eq!(escape_literal("O'Brien"), "'O''Brien'");
    assert_eq!(escape_literal("1.2.3"), "'1.2.3'");
    assert_eq!(escape_literal(""), "''");
    assert_eq!(escape_literal("-"), "'-'");
}

#[test]
fn test_substitute_long_string_value_is_not_truncated() {
    let long = "v".repeat(2000);
    let mut values = HashMap::new();
    values.insert("$1".to_string(), Value::String(long.clone()));

    let sql = substitute_values("INSERT INTO t VALUES ($1)", &values);
    assert_eq!(sql, format!("INSERT INTO t VALUES ('{long}')"));
}

#[test]
fn test_substitute_typed_values() {
    let mut values = HashMap::new();
    values.insert("$1".to_string(), Value::Null);
    values.insert("$2".to_string(), Value::Int64(9));
    values.insert("$3".to_string(), Value::String("x".to_string()));

    let sql = substitute_values("VALUES ($1, $2, $3)", &values);
    assert_eq!(sql, "VALUES (NULL, 9, 'x')");
}
