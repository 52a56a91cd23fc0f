//! SQLite `EXPLAIN QUERY PLAN` normalization.
//!
//! The payload is one `|`-separated row per plan step:
//! `id|parent|notused|detail` (the third column is optional). Rows with
//! parent `-1` hang off a synthetic `Query Plan` root. The detail text
//! decides the operation: `SCAN` is a full table walk, `SEARCH` an
//! index-assisted lookup.

use std::collections::HashMap;

use thiserror::Error;

use crate::explain::plan::PlanNode;

#[derive(Debug, Error)]
pub enum SqlitePlanError {
    #[error("empty EXPLAIN QUERY PLAN output")]
    EmptyOutput,

    #[error("invalid plan row: {0}")]
    InvalidRow(String),

    #[error("no root rows (parent -1) in EXPLAIN QUERY PLAN output")]
    MissingRoot,
}

pub type Result<T> = std::result::Result<T, SqlitePlanError>;

struct PlanRow {
    id: i64,
    parent: i64,
    detail: String,
}

pub fn parse_plan(payload: &str) -> Result<PlanNode> {
    let mut rows = Vec::new();
    for line in payload.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rows.push(parse_row(line)?);
    }
    if rows.is_empty() {
        return Err(SqlitePlanError::EmptyOutput);
    }

    // Child lists keyed by parent id, preserving row order.
    let mut children: HashMap<i64, Vec<PlanRow>> = HashMap::new();
    for row in rows {
        children.entry(row.parent).or_default().push(row);
    }

    let top = children.remove(&-1).ok_or(SqlitePlanError::MissingRoot)?;

    let mut root = PlanNode::new("Query Plan");
    for row in top {
        root.children.push(build_node(row, &mut children));
    }
    Ok(root)
}

fn parse_row(line: &str) -> Result<PlanRow> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return Err(SqlitePlanError::InvalidRow(line.to_string()));
    }
    let id = parts[0]
        .trim()
        .parse()
        .map_err(|_| SqlitePlanError::InvalidRow(line.to_string()))?;
    let parent = parts[1]
        .trim()
        .parse()
        .map_err(|_| SqlitePlanError::InvalidRow(line.to_string()))?;
    let detail = if parts.len() >= 4 {
        parts[3..].join("|")
    } else {
        parts[2].to_string()
    };
    Ok(PlanRow {
        id,
        parent,
        detail: detail.trim().to_string(),
    })
}

fn build_node(row: PlanRow, children: &mut HashMap<i64, Vec<PlanRow>>) -> PlanNode {
    let mut node = node_from_detail(&row.detail);
    if let Some(kids) = children.remove(&row.id) {
        for kid in kids {
            node.children.push(build_node(kid, children));
        }
    }
    node
}

fn node_from_detail(detail: &str) -> PlanNode {
    let upper = detail.to_uppercase();
    let operation = if upper.starts_with("SCAN") {
        if upper.contains("USING COVERING INDEX") {
            "Covering Index Scan"
        } else if upper.contains("USING INDEX") {
            "Index Scan"
        } else {
            "Scan"
        }
    } else if upper.starts_with("SEARCH") {
        "Search"
    } else {
        detail
    };

    let mut node = PlanNode::new(operation);
    node.relation = extract_table_name(detail);
    node.extra.insert("detail".to_string(), detail.to_string());
    node
}

/// Pulls the table name out of details like `SCAN users` or
/// `SEARCH TABLE orders USING INDEX idx_orders (id=?)`.
fn extract_table_name(detail: &str) -> Option<String> {
    let mut words = detail.split_whitespace();
    let keyword = words.next()?;
    if !keyword.eq_ignore_ascii_case("SCAN") && !keyword.eq_ignore_ascii_case("SEARCH") {
        return None;
    }
    let mut candidate = words.next()?;
    if candidate.eq_ignore_ascii_case("TABLE") {
        candidate = words.next()?;
    }
    if candidate.eq_ignore_ascii_case("CONSTANT") || candidate.eq_ignore_ascii_case("SUBQUERY") {
        return None;
    }
    Some(candidate.to_string())
}
