//! Main Analyst struct and public API.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chart::{ChartPayload, ChartProjector, ChartRequest, ProjectorConfig};
use crate::error::Result;
use crate::inference::{ColumnClassifier, ProfilerConfig, StatisticalProfiler};
use crate::input::{Dataset, Parser, ParserConfig, SourceMetadata};
use crate::insight::{
    CandidateValidator, Insight, InsightSynthesizer, SynthesizerConfig, ValidatorConfig,
};
use crate::llm::{LlmProvider, PromptContext};
use crate::schema::{AnalysisSummary, ColumnProfile};

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct AnalystConfig {
    pub parser: ParserConfig,
    pub profiler: ProfilerConfig,
    pub projector: ProjectorConfig,
    pub synthesizer: SynthesizerConfig,
    pub validator: ValidatorConfig,
}

/// Where a report's insights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSource {
    /// Validated suggestions from the configured LLM provider.
    Llm,
    /// The built-in rule ladder.
    Rules,
}

impl fmt::Display for InsightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightSource::Llm => f.write_str("llm"),
            InsightSource::Rules => f.write_str("rules"),
        }
    }
}

/// Result of analyzing a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub row_count: usize,
    pub column_names: Vec<String>,
    /// Classified columns (placeholders excluded).
    pub profiles: Vec<ColumnProfile>,
    pub summary: AnalysisSummary,
    /// At most four, most important first.
    pub insights: Vec<Insight>,
    pub insight_source: InsightSource,
}

/// The analysis engine: classification, profiling, insights and charts.
///
/// An `Analyst` holds no datasets. Every call takes the dataset it works on,
/// so one instance can serve concurrent requests.
pub struct Analyst {
    parser: Parser,
    profiler: StatisticalProfiler,
    projector: ChartProjector,
    synthesizer: InsightSynthesizer,
    validator: CandidateValidator,
    llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl Analyst {
    /// Create a new Analyst with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalystConfig::default())
    }

    /// Create an Analyst with custom configuration.
    pub fn with_config(config: AnalystConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            profiler: StatisticalProfiler::with_config(config.profiler),
            projector: ChartProjector::with_config(config.projector),
            synthesizer: InsightSynthesizer::with_config(config.synthesizer),
            validator: CandidateValidator::with_config(config.validator),
            llm_provider: None,
        }
    }

    /// Ask an LLM provider for insights before falling back to the rules.
    pub fn with_llm(self, provider: impl LlmProvider + 'static) -> Self {
        self.with_shared_llm(Arc::new(provider))
    }

    pub fn with_shared_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm_provider = Some(provider);
        self
    }

    /// Name of the configured provider, if any.
    pub fn llm_name(&self) -> Option<&str> {
        self.llm_provider.as_deref().map(|p| p.name())
    }

    /// Parse a data file into a dataset.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Parse uploaded bytes into a dataset.
    pub fn load_bytes(&self, contents: &[u8], file_name: &str) -> Result<(Dataset, SourceMetadata)> {
        self.parser.parse_bytes(contents, file_name)
    }

    /// Classify, profile and produce insights for a dataset.
    ///
    /// Never fails: a statistic that cannot be computed is omitted, and an
    /// LLM failure or an unusable suggestion list falls back to the rules.
    pub fn analyze(&self, dataset: &Dataset) -> AnalysisReport {
        let profiles = ColumnClassifier::classify(dataset);
        let summary = self.profiler.profile(dataset, &profiles);

        let (insights, insight_source) = match self.llm_insights(dataset, &summary) {
            Some(insights) => (insights, InsightSource::Llm),
            None => (
                self.synthesizer.synthesize(dataset, &summary),
                InsightSource::Rules,
            ),
        };

        info!(source = %insight_source, count = insights.len(), "insights ready");

        AnalysisReport {
            row_count: dataset.row_count(),
            column_names: dataset.column_names().into_iter().map(String::from).collect(),
            profiles,
            summary,
            insights,
            insight_source,
        }
    }

    /// Parse and analyze a data file.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<(SourceMetadata, AnalysisReport)> {
        let (dataset, source) = self.load(path)?;
        Ok((source, self.analyze(&dataset)))
    }

    /// Chart-ready data for one request.
    pub fn chart_data(&self, dataset: &Dataset, request: &ChartRequest) -> Result<ChartPayload> {
        self.projector.project(dataset, request)
    }

    /// Validated LLM suggestions, or `None` to use the rules.
    fn llm_insights(&self, dataset: &Dataset, summary: &AnalysisSummary) -> Option<Vec<Insight>> {
        let llm = self.llm_provider.as_deref()?;
        let context = PromptContext::from_analysis(dataset, summary);

        let candidates = match llm.suggest_insights(&context) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(provider = llm.name(), error = %e, "suggestion request failed, using rules");
                return None;
            }
        };

        let valid_columns = dataset.column_names();
        match self.validator.validate(&candidates, &valid_columns) {
            Ok(insights) => Some(insights),
            Err(e) => {
                info!(provider = llm.name(), error = %e, "suggestions rejected, using rules");
                None
            }
        }
    }
}

impl Default for Analyst {
    fn default() -> Self {
        Self::new()
    }
}
