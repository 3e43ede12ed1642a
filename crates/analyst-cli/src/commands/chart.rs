//! Chart command - print chart-ready data for a column pair.

use std::path::PathBuf;

use analyst::chart::{CategoricalSeries, ScatterSample};
use analyst::{Analyst, ChartPayload, ChartRequest, ChartType};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    chart_type: ChartType,
    x: String,
    y: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let analyst = Analyst::new();
    let (dataset, _) = analyst.load(&file)?;
    let payload = analyst.chart_data(&dataset, &ChartRequest::new(chart_type, x, y))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "{} {}",
        format!("{} chart", chart_type).cyan().bold(),
        file.display().to_string().white()
    );
    match &payload {
        ChartPayload::Categorical(series) => print_series(series),
        ChartPayload::Scatter(sample) => print_scatter(sample),
    }

    Ok(())
}

fn print_series(series: &CategoricalSeries) {
    let width = series.labels.iter().map(|l| l.len()).max().unwrap_or(0).min(32);
    for (label, value) in series.labels.iter().zip(&series.values) {
        println!("  {:width$}  {}", label, value.as_f64(), width = width);
    }
    println!(
        "{} {:?} over {} items",
        "Aggregation:".dimmed(),
        series.aggregation,
        series.total_items
    );
}

fn print_scatter(sample: &ScatterSample) {
    println!("  {} vs {}", sample.x.white().bold(), sample.y.white().bold());
    for point in sample.points.iter().take(20) {
        println!("  ({}, {})", point.x, point.y);
    }
    if sample.points.len() > 20 {
        println!("  ... {} more", sample.points.len() - 20);
    }
    let note = if sample.sampled {
        format!(
            "showing a sample of {} of {} rows",
            sample.displayed_count, sample.original_count
        )
    } else {
        format!("{} points", sample.displayed_count)
    };
    println!("{}", note.dimmed());
}
