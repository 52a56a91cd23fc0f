//! MySQL `EXPLAIN FORMAT=JSON` normalization.
//!
//! MySQL reports a flat `query_block`: either a single `table` entry or
//! a `nested_loop` array of them. Every table access becomes a child of
//! a synthetic `Query Block` root in document order; MySQL's join order
//! is already reflected by that order, so no join tree is reconstructed.
//! Numbers inside `cost_info` arrive as JSON strings and are parsed
//! leniently.

use serde_json::Value;
use thiserror::Error;

use crate::explain::plan::PlanNode;

#[derive(Debug, Error)]
pub enum MysqlPlanError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing query_block in EXPLAIN output")]
    MissingQueryBlock,

    #[error("invalid plan structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, MysqlPlanError>;

const KNOWN_TABLE_KEYS: &[&str] = &[
    "table_name",
    "access_type",
    "rows_examined_per_scan",
    "cost_info",
];

pub fn parse_plan(payload: &str) -> Result<PlanNode> {
    let value: Value = serde_json::from_str(payload)?;
    let block = value
        .get("query_block")
        .ok_or(MysqlPlanError::MissingQueryBlock)?;

    let mut root = PlanNode::new("Query Block");
    if let Some(cost) = block
        .get("cost_info")
        .and_then(|c| c.get("query_cost"))
        .and_then(lenient_f64)
    {
        root.estimated_cost = cost.max(0.0);
    }

    if let Some(table) = block.get("table") {
        root.children.push(parse_table_access(table));
    } else if let Some(loop_items) = block.get("nested_loop").and_then(|v| v.as_array()) {
        for item in loop_items {
            if let Some(table) = item.get("table") {
                root.children.push(parse_table_access(table));
            }
        }
    }

    if root.children.is_empty() {
        return Err(MysqlPlanError::InvalidStructure(
            "query_block contains no table access entries".into(),
        ));
    }

    Ok(root)
}

fn parse_table_access(table: &Value) -> PlanNode {
    let access_type = table
        .get("access_type")
        .and_then(|v| v.as_str())
        .unwrap_or("ALL");
    let mut node = PlanNode::new(operation_for(access_type));

    if let Some(name) = table.get("table_name").and_then(|v| v.as_str()) {
        node.relation = Some(name.to_string());
    }

    if let Some(rows) = table.get("rows_examined_per_scan").and_then(lenient_f64) {
        node.estimated_rows = rows.max(0.0);
    }

    if let Some(cost_info) = table.get("cost_info") {
        let read = cost_info.get("read_cost").and_then(lenient_f64);
        let eval = cost_info.get("eval_cost").and_then(lenient_f64);
        if read.is_some() || eval.is_some() {
            node.estimated_cost = (read.unwrap_or(0.0) + eval.unwrap_or(0.0)).max(0.0);
        }
    }

    if let Some(obj) = table.as_object() {
        for (key, val) in obj {
            if KNOWN_TABLE_KEYS.contains(&key.as_str()) {
                continue;
            }
            let rendered = match val {
                Value::String(s) => s.clone(),
                Value::Null => continue,
                other => other.to_string(),
            };
            node.extra.insert(key.clone(), rendered);
        }
    }

    node
}

fn operation_for(access_type: &str) -> String {
    match access_type {
        "ALL" => "Full Table Scan".to_string(),
        "index" => "Index Scan".to_string(),
        "range" => "Index Range Scan".to_string(),
        "ref" | "eq_ref" => "Index Lookup".to_string(),
        "const" | "system" => "Constant Lookup".to_string(),
        other => format!("Table Access ({other})"),
    }
}

/// MySQL encodes cost figures as strings; accept both forms.
fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
