use serde::{Deserialize, Serialize};

use crate::explain::PlanNode;

/// How urgently a hint should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A single finding about a plan node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilingHint {
    pub severity: Severity,
    /// Label of the node the hint is about, e.g. `Seq Scan on users`.
    pub subject: String,
    pub message: String,
    pub suggestion: String,
}

/// One bar of the execution timeline. Only nodes that carry actual
/// timing (EXPLAIN ANALYZE) contribute entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub label: String,
    pub start_offset_ms: f64,
    pub duration_ms: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanAnalysis {
    pub hints: Vec<ProfilingHint>,
    pub timeline: Vec<TimelineEntry>,
}

impl PlanAnalysis {
    pub fn has_critical(&self) -> bool {
        self.hints.iter().any(|h| h.severity == Severity::Critical)
    }

    pub fn warning_count(&self) -> usize {
        self.hints
            .iter()
            .filter(|h| h.severity <= Severity::Warning)
            .count()
    }
}

/// Thresholds for the analysis rules. The defaults are deliberately
/// conservative so hints stay rare enough to be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Full scans touching more rows than this get a warning.
    pub scan_row_threshold: f64,
    /// Nested loops whose inner rows times loop count exceed this get a
    /// warning.
    pub nested_loop_work_threshold: f64,
    /// Sorts that take longer than this (ms) get a warning.
    pub sort_time_threshold_ms: f64,
    /// Actual/estimated row ratios outside [1/drift_ratio, drift_ratio]
    /// produce a statistics hint.
    pub drift_ratio: f64,
    /// Node cost above which the node is worth reviewing.
    pub cost_review_threshold: f64,
    /// Node cost above which the hint escalates to critical.
    pub cost_critical_threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scan_row_threshold: 1_000.0,
            nested_loop_work_threshold: 10_000.0,
            sort_time_threshold_ms: 100.0,
            drift_ratio: 10.0,
            cost_review_threshold: 10_000.0,
            cost_critical_threshold: 100_000.0,
        }
    }
}

/// Walks a normalized plan and applies a fixed set of rules.
///
/// Rules match on operation substrings rather than dialect-specific
/// vocabularies, so one analyzer serves all supported dialects.
#[derive(Debug, Clone, Default)]
pub struct PlanAnalyzer {
    config: AnalyzerConfig,
}

impl PlanAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, root: &PlanNode) -> PlanAnalysis {
        let mut analysis = PlanAnalysis::default();
        for node in root.iter() {
            self.check_full_scan(node, &mut analysis.hints);
            self.check_nested_loop(node, &mut analysis.hints);
            self.check_slow_sort(node, &mut analysis.hints);
            self.check_row_drift(node, &mut analysis.hints);
            self.check_expensive_node(node, &mut analysis.hints);
            Self::record_timeline(node, &mut analysis.timeline);
        }
        analysis
    }

    fn check_full_scan(&self, node: &PlanNode, hints: &mut Vec<ProfilingHint>) {
        if !node.is_full_scan() {
            return;
        }
        let Some(relation) = &node.relation else {
            return;
        };
        let rows = node.actual_rows.unwrap_or(node.estimated_rows);
        if rows > self.config.scan_row_threshold {
            hints.push(ProfilingHint {
                severity: Severity::Warning,
                subject: node.label(),
                message: format!(
                    "full scan of {relation} touches about {rows:.0} rows"
                ),
                suggestion: format!(
                    "consider adding an index on {relation} covering the filtered columns"
                ),
            });
        }
    }

    fn check_nested_loop(&self, node: &PlanNode, hints: &mut Vec<ProfilingHint>) {
        if !node.is_nested_loop() {
            return;
        }
        let rows = node.actual_rows.unwrap_or(node.estimated_rows);
        let loops = node.loops.unwrap_or(1.0);
        let work = rows * loops;
        if work > self.config.nested_loop_work_threshold {
            hints.push(ProfilingHint {
                severity: Severity::Warning,
                subject: node.label(),
                message: format!(
                    "nested loop processes about {work:.0} row visits ({rows:.0} rows x {loops:.0} loops)"
                ),
                suggestion: "check join conditions and indexes on the inner relation".to_string(),
            });
        }
    }

    fn check_slow_sort(&self, node: &PlanNode, hints: &mut Vec<ProfilingHint>) {
        if !node.is_sort() {
            return;
        }
        let Some(time) = node.actual_time_ms else {
            return;
        };
        if time > self.config.sort_time_threshold_ms {
            hints.push(ProfilingHint {
                severity: Severity::Warning,
                subject: node.label(),
                message: format!("sort took {time:.1} ms"),
                suggestion: "an index matching the sort order could avoid this sort".to_string(),
            });
        }
    }

    fn check_row_drift(&self, node: &PlanNode, hints: &mut Vec<ProfilingHint>) {
        let Some(actual) = node.actual_rows else {
            return;
        };
        if node.estimated_rows <= 0.0 {
            return;
        }
        let ratio = actual / node.estimated_rows;
        if ratio > self.config.drift_ratio || ratio < 1.0 / self.config.drift_ratio {
            hints.push(ProfilingHint {
                severity: Severity::Info,
                subject: node.label(),
                message: format!(
                    "row estimate is off: planned {:.0}, got {actual:.0}",
                    node.estimated_rows
                ),
                suggestion: "table statistics may be stale; refresh them with the dialect's analyze command".to_string(),
            });
        }
    }

    fn check_expensive_node(&self, node: &PlanNode, hints: &mut Vec<ProfilingHint>) {
        if node.estimated_cost <= self.config.cost_review_threshold {
            return;
        }
        let severity = if node.estimated_cost > self.config.cost_critical_threshold {
            Severity::Critical
        } else {
            Severity::Info
        };
        hints.push(ProfilingHint {
            severity,
            subject: node.label(),
            message: format!("estimated cost {:.0}", node.estimated_cost),
            suggestion: "this node dominates the plan; review it first".to_string(),
        });
    }

    fn record_timeline(node: &PlanNode, timeline: &mut Vec<TimelineEntry>) {
        let Some(actual) = node.actual_time_ms else {
            return;
        };
        let start = node.startup_time_ms.unwrap_or(0.0);
        timeline.push(TimelineEntry {
            label: node.label(),
            start_offset_ms: start,
            duration_ms: (actual - start).max(0.0),
            cost: node.estimated_cost,
        });
    }
}
