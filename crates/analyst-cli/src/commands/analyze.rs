//! Analyze command - profile a data file and print its insights.

use std::fs;
use std::path::PathBuf;

use analyst::{AnalysisReport, Analyst, SourceMetadata};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::LlmProviderChoice;

use super::build_provider;

/// What `--json` and `--output` write.
#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a SourceMetadata,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

pub fn run(
    file: PathBuf,
    llm: LlmProviderChoice,
    model: Option<String>,
    timeout_secs: u64,
    json: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut analyst = Analyst::new();
    if let Some(provider) = build_provider(llm, model, timeout_secs)? {
        analyst = analyst.with_shared_llm(provider);
    }

    let (source, report) = analyst.analyze_file(&file)?;
    let rendered = serde_json::to_string_pretty(&JsonReport {
        source: &source,
        report: &report,
    })?;

    if let Some(path) = &output {
        fs::write(path, &rendered)?;
        info!(path = %path.display(), "report written");
    }

    if json {
        println!("{}", rendered);
        return Ok(());
    }

    print_report(&source, &report);

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn print_report(source: &SourceMetadata, report: &AnalysisReport) {
    let summary = &report.summary;

    println!(
        "{} {} ({} rows, {} columns, {})",
        "Analyzed".cyan().bold(),
        source.file.white(),
        report.row_count.to_string().white().bold(),
        report.column_names.len().to_string().white().bold(),
        source.format
    );

    println!();
    println!("{}", "Columns:".yellow().bold());
    for profile in &report.profiles {
        let kind = if profile.is_numeric() {
            "numeric".blue()
        } else {
            "categorical".magenta()
        };
        println!("  {:24} {}", profile.name, kind);
    }

    if !summary.correlations.is_empty() {
        println!();
        println!("{}", "Correlations:".yellow().bold());
        for pair in &summary.correlations {
            println!(
                "  {} ~ {}  r = {:.2} ({} {})",
                pair.column_a, pair.column_b, pair.coefficient, pair.strength, pair.direction
            );
        }
    }

    if let Some(top) = &summary.top_performer {
        println!();
        println!("{}", "Top performer:".yellow().bold());
        println!(
            "  {} leads {} by {}% on mean {} ({} vs {}, {} of {} groups shown)",
            top.top_group.name.green().bold(),
            top.second_group.name,
            top.percent_difference,
            top.metric_column,
            top.top_group.mean_value,
            top.second_group.mean_value,
            top.shown_group_count,
            top.total_group_count
        );
    }

    if !summary.distributions.is_empty() {
        println!();
        println!("{}", "Distributions:".yellow().bold());
        for dist in &summary.distributions {
            println!(
                "  {:24} mean {} median {} sd {} cv {}% outliers {}% {}",
                dist.column,
                dist.mean,
                dist.median,
                dist.std_dev,
                dist.coefficient_of_variation,
                dist.outlier_percent,
                dist.skew_class
            );
        }
    }

    println!();
    println!(
        "{} {}",
        "Insights".yellow().bold(),
        format!("(from {})", report.insight_source).dimmed()
    );
    if report.insights.is_empty() {
        println!("  {}", "No insights: the dataset has no usable columns.".dimmed());
    }
    for (i, insight) in report.insights.iter().enumerate() {
        let axes = match &insight.parameters.y {
            Some(y) => format!("{} x {}", insight.parameters.x, y),
            None => insight.parameters.x.clone(),
        };
        println!("  {}. {}", i + 1, insight.title.white().bold());
        println!("     {} chart of {}", insight.chart_type, axes.cyan());
        println!("     {}", insight.narrative);
    }
}
