//! Integration tests for the file -> report -> chart pipeline.

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use analyst::chart::Aggregation;
use analyst::schema::{CorrelationDirection, CorrelationStrength};
use analyst::{
    Analyst, AnalystError, ChartPayload, ChartRequest, ChartType, InsightSource, MockProvider,
};

/// Helper to create a temporary file with the given extension and content.
fn create_test_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const SALES: &str = "region,sales,units\n\
                     North,100,10\n\
                     South,40,4\n\
                     North,300,29\n\
                     East,20,2\n\
                     South,60,7\n\
                     East,40,4\n";

// =============================================================================
// Ingestion
// =============================================================================

#[test]
fn test_analyze_sales_csv() {
    let file = create_test_file(".csv", SALES);
    let (source, report) = Analyst::new()
        .analyze_file(file.path())
        .expect("Analysis failed");

    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 6);
    assert_eq!(source.column_count, 3);
    assert!(source.hash.starts_with("sha256:"));

    assert_eq!(report.row_count, 6);
    assert_eq!(report.column_names, vec!["region", "sales", "units"]);
    assert_eq!(report.summary.numeric_columns, vec!["sales", "units"]);
    assert_eq!(report.summary.categorical_columns, vec!["region"]);
}

#[test]
fn test_tsv_auto_detect() {
    let content = "region\tsales\nNorth\t10\nSouth\t20\n";
    let file = create_test_file(".tsv", content);

    let (source, report) = Analyst::new().analyze_file(file.path()).unwrap();
    assert_eq!(source.format, "tsv");
    assert_eq!(report.column_names, vec!["region", "sales"]);
}

#[test]
fn test_null_tokens_keep_column_numeric() {
    let content = "score,label\n1,a\nNA,b\n3,c\nnull,d\n5,e\n";
    let file = create_test_file(".csv", content);

    let (_, report) = Analyst::new().analyze_file(file.path()).unwrap();
    assert_eq!(report.summary.numeric_columns, vec!["score"]);

    let distribution = &report.summary.distributions[0];
    assert_eq!(distribution.mean, 3.0);
    assert_eq!(distribution.median, 3.0);
}

#[test]
fn test_index_column_excluded_from_profiles() {
    let content = ",region,sales\n0,North,10\n1,South,20\n2,North,30\n";
    let file = create_test_file(".csv", content);

    let (_, report) = Analyst::new().analyze_file(file.path()).unwrap();
    assert_eq!(report.column_names[0], "Unnamed: 0");
    assert!(report.profiles.iter().all(|p| p.name != "Unnamed: 0"));
    assert_eq!(report.summary.numeric_columns, vec!["sales"]);
}

#[test]
fn test_unsupported_extension() {
    let file = create_test_file(".json", "{}");
    let err = Analyst::new().analyze_file(file.path()).unwrap_err();
    assert!(matches!(err, AnalystError::UnsupportedFormat(_)));
}

#[test]
fn test_header_only_file() {
    let file = create_test_file(".csv", "a,b,c\n");
    let err = Analyst::new().analyze_file(file.path()).unwrap_err();
    assert!(matches!(err, AnalystError::EmptyData(_)));
}

#[test]
fn test_missing_file() {
    let err = Analyst::new()
        .analyze_file("/nonexistent/sales.csv")
        .unwrap_err();
    assert!(matches!(err, AnalystError::Io { .. }));
}

// =============================================================================
// Profiling and insights
// =============================================================================

#[test]
fn test_sales_summary() {
    let file = create_test_file(".csv", SALES);
    let (_, report) = Analyst::new().analyze_file(file.path()).unwrap();
    let summary = &report.summary;

    assert_eq!(summary.correlations.len(), 1);
    let pair = &summary.correlations[0];
    assert_eq!((pair.column_a.as_str(), pair.column_b.as_str()), ("sales", "units"));
    assert_eq!(pair.coefficient, 1.0);
    assert_eq!(pair.strength, CorrelationStrength::Strong);
    assert_eq!(pair.direction, CorrelationDirection::Positive);

    let top = summary.top_performer.as_ref().expect("top performer");
    assert_eq!(top.top_group.name, "North");
    assert_eq!(top.top_group.mean_value, 200.0);
    assert_eq!(top.second_group.name, "South");
    assert_eq!(top.percent_difference, 300.0);
    assert_eq!(top.total_group_count, 3);
    assert_eq!(top.shown_group_count, 3);

    assert_eq!(summary.distributions.len(), 2);
}

#[test]
fn test_rule_insights_ladder() {
    let file = create_test_file(".csv", SALES);
    let (_, report) = Analyst::new().analyze_file(file.path()).unwrap();

    assert_eq!(report.insight_source, InsightSource::Rules);
    let charts: Vec<ChartType> = report.insights.iter().map(|i| i.chart_type).collect();
    assert_eq!(
        charts,
        vec![ChartType::Bar, ChartType::Scatter, ChartType::Area, ChartType::Line]
    );
    assert_eq!(report.insights[0].title, "🏆 North is 4.0x the runner-up in Sales");
}

#[test]
fn test_every_insight_can_be_charted() {
    let analyst = Analyst::new();
    let file = create_test_file(".csv", SALES);
    let (dataset, _) = analyst.load(file.path()).unwrap();
    let report = analyst.analyze(&dataset);

    for insight in &report.insights {
        let payload = analyst.chart_data(&dataset, &insight.chart_request());
        assert!(payload.is_ok(), "insight '{}' not chartable", insight.title);
    }
}

#[test]
fn test_text_only_dataset_has_no_insights() {
    let file = create_test_file(".csv", "name,city\nAda,London\nAlan,Wilmslow\n");
    let (_, report) = Analyst::new().analyze_file(file.path()).unwrap();

    assert!(report.summary.numeric_columns.is_empty());
    assert!(report.summary.correlations.is_empty());
    assert!(report.summary.top_performer.is_none());
    assert!(report.insights.is_empty());
}

#[test]
fn test_mock_suggestions_accepted_with_three_metrics() {
    let content = "team,goals,shots,assists\nA,3,10,2\nB,1,7,1\nA,2,9,2\nC,0,4,0\n";
    let file = create_test_file(".csv", content);

    let analyst = Analyst::new().with_llm(MockProvider::new());
    let (_, report) = analyst.analyze_file(file.path()).unwrap();

    assert_eq!(report.insight_source, InsightSource::Llm);
    assert_eq!(report.insights.len(), 3);
    assert!(report.insights.iter().all(|i| i.parameters.x == "team"));
}

#[test]
fn test_mock_suggestions_too_few_fall_back() {
    let file = create_test_file(".csv", SALES);
    let analyst = Analyst::new().with_llm(MockProvider::new());
    let (_, report) = analyst.analyze_file(file.path()).unwrap();

    // Two numeric columns give only two candidates.
    assert_eq!(report.insight_source, InsightSource::Rules);
    assert_eq!(report.insights.len(), 4);
}

#[test]
fn test_report_json_shape() {
    let file = create_test_file(".csv", SALES);
    let (_, report) = Analyst::new().analyze_file(file.path()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    let first = &value["insights"][0];
    assert_eq!(first["chart_type"], "bar");
    assert_eq!(first["parameters"], json!({"x": "region", "y": "sales"}));
    assert!(first["insight"].as_str().unwrap().contains("North"));
    assert_eq!(value["summary"]["correlations"][0]["strength"], "strong");
}

// =============================================================================
// Chart data
// =============================================================================

#[test]
fn test_pie_chart_counts() {
    let analyst = Analyst::new();
    let (dataset, _) = analyst.load_bytes(SALES.as_bytes(), "sales.csv").unwrap();
    let request = ChartRequest::new(ChartType::Pie, "region", None);

    match analyst.chart_data(&dataset, &request).unwrap() {
        ChartPayload::Categorical(series) => {
            assert_eq!(series.labels, vec!["North", "South", "East"]);
            assert_eq!(series.aggregation, Aggregation::Count);
            let values: Vec<f64> = series.values.iter().map(|v| v.as_f64()).collect();
            assert_eq!(values, vec![2.0, 2.0, 2.0]);
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn test_chart_errors_are_input_errors() {
    let analyst = Analyst::new();
    let (dataset, _) = analyst.load_bytes(SALES.as_bytes(), "sales.csv").unwrap();

    let err = analyst
        .chart_data(&dataset, &ChartRequest::new(ChartType::Bar, "ghost", None))
        .unwrap_err();
    assert!(err.is_input_error());
    assert!(matches!(err, AnalystError::MissingColumn { ref column } if column == "ghost"));

    let err = analyst
        .chart_data(&dataset, &ChartRequest::new(ChartType::Scatter, "sales", None))
        .unwrap_err();
    assert!(matches!(err, AnalystError::MissingParameter { .. }));
}
