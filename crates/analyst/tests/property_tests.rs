//! Property-based tests for profiling, insight synthesis and chart projection.
//!
//! These tests generate random datasets and check the guarantees callers rely
//! on:
//! 1. **Bounded output**: never more than four insights or fifteen shown groups
//! 2. **Determinism**: the same dataset always yields the same results
//! 3. **Order**: groups and scatter points keep their order of appearance
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p analyst --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p analyst --test property_tests
//! ```

use proptest::prelude::*;

use analyst::chart::CategoricalSeries;
use analyst::{Analyst, CellValue, ChartPayload, ChartRequest, ChartType, Column, Dataset};

// =============================================================================
// Test Strategies
// =============================================================================

const LABELS: &[&str] = &["North", "South", "East", "West", "Central"];

/// A numeric cell: mostly present, occasionally missing.
fn numeric_cell() -> impl Strategy<Value = Option<f64>> {
    prop::option::weighted(0.9, -1000i32..1000).prop_map(|v| v.map(f64::from))
}

fn label_cell() -> impl Strategy<Value = Option<usize>> {
    prop::option::weighted(0.95, 0..LABELS.len())
}

/// A dataset with one label column and one to four numeric columns.
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (1usize..40, 1usize..5).prop_flat_map(|(rows, metrics)| {
        (
            prop::collection::vec(label_cell(), rows),
            prop::collection::vec(prop::collection::vec(numeric_cell(), rows), metrics),
        )
            .prop_map(|(labels, metrics)| build_dataset(&labels, &metrics))
    })
}

fn build_dataset(labels: &[Option<usize>], metrics: &[Vec<Option<f64>>]) -> Dataset {
    let mut columns = vec![Column::text(
        "region",
        labels.iter().map(|l| l.map(|i| LABELS[i])),
    )];
    for (i, values) in metrics.iter().enumerate() {
        columns.push(Column::numeric(format!("metric_{}", i), values.clone()));
    }
    Dataset::new(columns)
}

fn engine() -> Analyst {
    Analyst::new()
}

// =============================================================================
// Analysis
// =============================================================================

proptest! {
    #[test]
    fn insights_are_bounded(dataset in arb_dataset()) {
        let report = engine().analyze(&dataset);
        prop_assert!(report.insights.len() <= 4);

        if let Some(top) = &report.summary.top_performer {
            prop_assert!(top.shown_group_count <= 15);
            prop_assert!(top.shown_group_count <= top.total_group_count);
            prop_assert!(top.top_group.mean_value >= top.second_group.mean_value);
        }
    }

    #[test]
    fn analysis_is_idempotent(dataset in arb_dataset()) {
        let analyst = engine();
        let first = analyst.analyze(&dataset);
        let second = analyst.analyze(&dataset);

        prop_assert_eq!(first.summary, second.summary);
        prop_assert_eq!(first.insights, second.insights);
    }

    #[test]
    fn correlations_sorted_and_above_threshold(dataset in arb_dataset()) {
        let report = engine().analyze(&dataset);
        let coefficients: Vec<f64> = report
            .summary
            .correlations
            .iter()
            .map(|c| c.coefficient.abs())
            .collect();

        for pair in coefficients.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
        for c in &coefficients {
            prop_assert!(*c >= 0.3 && *c <= 1.0);
        }
    }

    #[test]
    fn insights_reference_existing_columns(dataset in arb_dataset()) {
        let analyst = engine();
        let report = analyst.analyze(&dataset);

        for insight in &report.insights {
            prop_assert!(dataset.has_column(&insight.parameters.x));
            if let Some(y) = &insight.parameters.y {
                prop_assert!(dataset.has_column(y));
            }
            prop_assert!(analyst.chart_data(&dataset, &insight.chart_request()).is_ok());
        }
    }
}

// =============================================================================
// Chart projection
// =============================================================================

fn categorical(payload: ChartPayload) -> CategoricalSeries {
    match payload {
        ChartPayload::Categorical(series) => series,
        other => panic!("expected categorical payload, got {:?}", other),
    }
}

proptest! {
    #[test]
    fn bar_groups_keep_first_appearance_order(
        labels in prop::collection::vec(0..LABELS.len(), 1..60),
        seed in 0i32..100,
    ) {
        let metric: Vec<Option<f64>> = (0..labels.len())
            .map(|i| Some(f64::from(seed) + i as f64))
            .collect();
        let labels: Vec<Option<usize>> = labels.into_iter().map(Some).collect();
        let dataset = build_dataset(&labels, &[metric]);

        let request = ChartRequest::new(ChartType::Bar, "region", Some("metric_0".to_string()));
        let series = categorical(engine().chart_data(&dataset, &request).unwrap());

        let mut expected: Vec<String> = Vec::new();
        for label in labels.iter().flatten() {
            let name = LABELS[*label].to_string();
            if !expected.contains(&name) {
                expected.push(name);
            }
        }
        prop_assert_eq!(series.labels, expected);
        prop_assert_eq!(series.total_items, series.values.len());
    }

    #[test]
    fn pie_counts_sum_to_present_labels(dataset in arb_dataset()) {
        let request = ChartRequest::new(ChartType::Pie, "region", None);
        let series = categorical(engine().chart_data(&dataset, &request).unwrap());

        let present = dataset
            .column("region")
            .unwrap()
            .values
            .iter()
            .filter(|v| !v.is_missing())
            .count();
        let total: f64 = series.values.iter().map(|v| v.as_f64()).sum();
        prop_assert_eq!(total as usize, present);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn large_scatter_is_sampled_deterministically(rows in 501usize..800) {
        let xs: Vec<Option<f64>> = (0..rows).map(|i| Some(i as f64)).collect();
        let ys: Vec<Option<f64>> = (0..rows).map(|i| Some((i * 7 % 13) as f64)).collect();
        let dataset = Dataset::new(vec![Column::numeric("x", xs), Column::numeric("y", ys)]);
        let request = ChartRequest::new(ChartType::Scatter, "x", Some("y".to_string()));

        let analyst = engine();
        let first = analyst.chart_data(&dataset, &request).unwrap();
        let second = analyst.chart_data(&dataset, &request).unwrap();
        prop_assert_eq!(&first, &second);

        let sample = match first {
            ChartPayload::Scatter(sample) => sample,
            other => panic!("expected scatter payload, got {:?}", other),
        };
        prop_assert!(sample.sampled);
        prop_assert_eq!(sample.displayed_count, 500);
        prop_assert_eq!(sample.points.len(), 500);
        prop_assert_eq!(sample.original_count, rows);

        // Sampled points stay in row order.
        let xs: Vec<f64> = sample
            .points
            .iter()
            .map(|p| match p.x {
                CellValue::Number(v) => v,
                _ => f64::NAN,
            })
            .collect();
        for pair in xs.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}
