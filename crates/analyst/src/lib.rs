//! Analyst: instant statistical insights and chart data for tabular datasets.
//!
//! Analyst takes a dataset, classifies its columns, profiles them
//! statistically and turns the results into a handful of ranked, titled
//! insights, each with a chart recommendation. Chart data for any column
//! pair can then be projected on demand.
//!
//! # Core Principles
//!
//! - **Deterministic**: the same dataset always yields the same summary,
//!   insights and sampled scatter points
//! - **Read-only**: datasets are immutable snapshots owned by the caller
//! - **Untrusted suggestions**: LLM output is validated against real columns,
//!   with rule-based insights as the fallback
//!
//! # Example
//!
//! ```no_run
//! use analyst::{Analyst, ChartRequest, ChartType};
//!
//! let analyst = Analyst::new();
//! let (dataset, _source) = analyst.load("sales.csv").unwrap();
//!
//! let report = analyst.analyze(&dataset);
//! for insight in &report.insights {
//!     println!("{}", insight.title);
//! }
//!
//! let request = ChartRequest::new(ChartType::Bar, "region", Some("revenue".into()));
//! let payload = analyst.chart_data(&dataset, &request).unwrap();
//! ```

pub mod chart;
pub mod error;
pub mod inference;
pub mod input;
pub mod insight;
pub mod llm;
pub mod schema;
pub mod stats;

mod analyst;

pub use crate::analyst::{AnalysisReport, Analyst, AnalystConfig, InsightSource};
pub use chart::{ChartPayload, ChartProjector, ChartRequest, ChartType};
pub use error::{AnalystError, Result};
pub use inference::{ColumnClassifier, StatisticalProfiler};
pub use input::{CellValue, Column, Dataset, Parser, SourceMetadata};
pub use insight::{CandidateValidator, Insight, InsightSynthesizer, InsufficientCandidates};
pub use llm::{
    AnthropicProvider, GeminiProvider, LlmConfig, LlmProvider, MockProvider, OllamaProvider,
};
pub use schema::{AnalysisSummary, ColumnProfile, SemanticType};
