//! Column classification and statistical profiling.

mod classifier;
mod profiler;

pub use classifier::ColumnClassifier;
pub use profiler::{ProfilerConfig, StatisticalProfiler};
