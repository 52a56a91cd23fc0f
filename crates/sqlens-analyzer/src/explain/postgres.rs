//! PostgreSQL `EXPLAIN (FORMAT JSON)` normalization.
//!
//! The payload is either the raw array PostgreSQL emits
//! (`[{"Plan": {...}}]`) or a single wrapper object. Plan nodes nest
//! through the `Plans` array; scalar attributes we do not model
//! explicitly are preserved in [`PlanNode::extra`].

use serde_json::Value;
use thiserror::Error;

use crate::explain::plan::PlanNode;

#[derive(Debug, Error)]
pub enum PostgresPlanError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing Plan object in EXPLAIN output")]
    MissingPlan,

    #[error("invalid plan structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, PostgresPlanError>;

const KNOWN_KEYS: &[&str] = &[
    "Node Type",
    "Relation Name",
    "Total Cost",
    "Startup Cost",
    "Plan Rows",
    "Actual Rows",
    "Actual Total Time",
    "Actual Startup Time",
    "Actual Loops",
    "Plans",
];

pub fn parse_plan(payload: &str) -> Result<PlanNode> {
    let value: Value = serde_json::from_str(payload)?;

    // PostgreSQL wraps the plan in a one-element array.
    let plan_obj = if let Some(arr) = value.as_array() {
        arr.first()
            .and_then(|v| v.get("Plan"))
            .ok_or(PostgresPlanError::MissingPlan)?
    } else if let Some(plan) = value.get("Plan") {
        plan
    } else {
        return Err(PostgresPlanError::MissingPlan);
    };

    parse_node(plan_obj)
}

fn parse_node(value: &Value) -> Result<PlanNode> {
    let operation = value
        .get("Node Type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PostgresPlanError::InvalidStructure("missing Node Type".into()))?;

    let mut node = PlanNode::new(operation);

    if let Some(relation) = value.get("Relation Name").and_then(|v| v.as_str()) {
        node.relation = Some(relation.to_string());
    }

    if let Some(cost) = value.get("Total Cost").and_then(|v| v.as_f64()) {
        node.estimated_cost = cost.max(0.0);
    }

    if let Some(rows) = value.get("Plan Rows").and_then(|v| v.as_f64()) {
        node.estimated_rows = rows.max(0.0);
    }

    // Runtime figures are only present for EXPLAIN ANALYZE.
    node.actual_rows = value.get("Actual Rows").and_then(|v| v.as_f64());
    node.actual_time_ms = value.get("Actual Total Time").and_then(|v| v.as_f64());
    node.startup_time_ms = value.get("Actual Startup Time").and_then(|v| v.as_f64());
    node.loops = value.get("Actual Loops").and_then(|v| v.as_f64());

    if let Some(plans) = value.get("Plans").and_then(|v| v.as_array()) {
        for child in plans {
            node.children.push(parse_node(child)?);
        }
    }

    if let Some(obj) = value.as_object() {
        for (key, val) in obj {
            if KNOWN_KEYS.contains(&key.as_str()) {
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

    Ok(node)
}

#[cfg(test)]
mod tests;
