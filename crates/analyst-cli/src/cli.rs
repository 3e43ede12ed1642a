//! CLI argument definitions using clap.

use std::path::PathBuf;

use analyst::ChartType;
use clap::{ArgAction, Parser, Subcommand};

use crate::logging::LogFormat;

/// Instant statistical insights and chart data for tabular datasets.
#[derive(Parser, Debug)]
#[command(name = "analyst")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Profile a data file and print its insights
    Analyze {
        /// Path to the data file (CSV, TSV, XLSX, XLS, ODS)
        file: PathBuf,

        /// Where suggestions come from: none, mock, anthropic, gemini, ollama
        #[arg(long)]
        llm: Option<LlmProviderChoice>,

        /// Model name for the chosen provider
        #[arg(long)]
        model: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print chart data for a column pair
    Chart {
        /// Path to the data file
        file: PathBuf,

        /// Chart type: bar, line, pie, scatter, area
        #[arg(long = "type", short = 't')]
        chart_type: ChartType,

        /// Column for the x axis (or pie slices)
        #[arg(long)]
        x: String,

        /// Column for the y axis
        #[arg(long)]
        y: Option<String>,

        /// Print the payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Suggestion provider (overrides ANALYST_LLM)
        #[arg(long)]
        llm: Option<LlmProviderChoice>,

        /// Model name (overrides ANALYST_LLM_MODEL)
        #[arg(long)]
        model: Option<String>,
    },
}

/// LLM provider choice for insight suggestions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmProviderChoice {
    /// Rule-based insights only
    #[default]
    None,
    /// Scripted mock provider (for testing)
    Mock,
    /// Anthropic Claude API
    Anthropic,
    /// Google Gemini API
    Gemini,
    /// Ollama local models
    Ollama,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "rules" => Ok(LlmProviderChoice::None),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            "anthropic" | "claude" => Ok(LlmProviderChoice::Anthropic),
            "gemini" | "google" => Ok(LlmProviderChoice::Gemini),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, mock, anthropic, gemini, or ollama.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::Mock => write!(f, "mock"),
            LlmProviderChoice::Anthropic => write!(f, "anthropic"),
            LlmProviderChoice::Gemini => write!(f, "gemini"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
        }
    }
}
