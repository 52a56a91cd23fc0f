//! Query analysis for SQLens.
//!
//! Three concerns live here:
//! - [`explain`] turns dialect-specific `EXPLAIN` output into a uniform
//!   [`PlanNode`] tree.
//! - [`profiling`] walks a normalized plan and produces actionable hints
//!   plus an execution timeline.
//! - [`advisor`] inspects raw SQL text and suggests candidate indexes.

pub mod advisor;
pub mod explain;
pub mod profiling;

pub use advisor::{IndexAdvisor, IndexCandidate, IndexReason};
pub use explain::{normalize_plan, PlanNode};
pub use profiling::{
    AnalyzerConfig, PlanAnalysis, PlanAnalyzer, ProfilingHint, Severity, TimelineEntry,
};
