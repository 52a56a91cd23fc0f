//! Plan profiling: turns a normalized plan tree into human-facing
//! hints and an execution timeline.

mod analyzer;

pub use analyzer::{
    AnalyzerConfig, PlanAnalysis, PlanAnalyzer, ProfilingHint, Severity, TimelineEntry,
};
