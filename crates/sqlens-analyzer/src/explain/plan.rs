use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One node of a normalized execution plan.
///
/// The `operation` field is free text on purpose: dialects disagree on
/// operator vocabularies, and downstream rules match on substrings
/// rather than a closed enum. Costs and row counts are clamped to be
/// non-negative during parsing; runtime figures are `None` when the
/// plan was produced without executing the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    pub operation: String,
    pub relation: Option<String>,
    pub estimated_cost: f64,
    pub estimated_rows: f64,
    pub actual_rows: Option<f64>,
    pub actual_time_ms: Option<f64>,
    pub startup_time_ms: Option<f64>,
    pub loops: Option<f64>,
    pub children: Vec<PlanNode>,
    /// Dialect-specific attributes that survived normalization, keyed by
    /// their original field names.
    pub extra: BTreeMap<String, String>,
}

impl PlanNode {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            relation: None,
            estimated_cost: 0.0,
            estimated_rows: 0.0,
            actual_rows: None,
            actual_time_ms: None,
            startup_time_ms: None,
            loops: None,
            children: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = cost.max(0.0);
        self
    }

    pub fn with_rows(mut self, rows: f64) -> Self {
        self.estimated_rows = rows.max(0.0);
        self
    }

    pub fn with_child(mut self, child: PlanNode) -> Self {
        self.children.push(child);
        self
    }

    /// Human-readable one-line label, e.g. `Seq Scan on users`.
    pub fn label(&self) -> String {
        match &self.relation {
            Some(relation) => format!("{} on {}", self.operation, relation),
            None => self.operation.clone(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_full_scan(&self) -> bool {
        let op = self.operation.to_lowercase();
        op == "scan" || op.contains("seq scan") || op.contains("full table scan")
    }

    pub fn is_nested_loop(&self) -> bool {
        self.operation.to_lowercase().contains("nested loop")
    }

    pub fn is_sort(&self) -> bool {
        let op = self.operation.to_lowercase();
        op.contains("sort") && !op.contains("index")
    }

    /// Pre-order traversal over this node and all descendants.
    pub fn iter(&self) -> PlanIter<'_> {
        PlanIter { stack: vec![self] }
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Largest estimated cost of any single node, floored at 1.0 so it
    /// is safe to divide by when scaling visualizations.
    pub fn max_cost(&self) -> f64 {
        self.iter()
            .map(|n| n.estimated_cost)
            .fold(1.0_f64, f64::max)
    }

    pub fn total_cost(&self) -> f64 {
        self.iter().map(|n| n.estimated_cost).sum()
    }

    /// Total runtime of the plan, taken from the root node when present.
    pub fn total_time_ms(&self) -> Option<f64> {
        self.actual_time_ms
    }
}

pub struct PlanIter<'a> {
    stack: Vec<&'a PlanNode>,
}

impl<'a> Iterator for PlanIter<'a> {
    type Item = &'a PlanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
