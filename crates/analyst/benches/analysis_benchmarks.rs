//! Analysis pipeline performance benchmarks.
//!
//! Measures parsing, profiling, insight synthesis and chart projection on
//! generated sales data.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use analyst::{
    Analyst, ChartProjector, ChartRequest, ChartType, ColumnClassifier, Dataset,
    InsightSynthesizer, StatisticalProfiler,
};

const REGIONS: &[&str] = &["North", "South", "East", "West", "Central", "Overseas"];

/// Generate sales CSV with correlated metrics, a few gaps and outliers.
fn generate_sales_csv(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut data = String::from("region,units,revenue,discount,rating\n");

    for row in 0..rows {
        let region = REGIONS[rng.gen_range(0..REGIONS.len())];
        let units: u32 = rng.gen_range(1..200);
        let revenue = if row % 97 == 0 {
            (units as f64) * 400.0
        } else {
            (units as f64) * rng.gen_range(18.0..22.0)
        };
        let discount = rng.gen_range(0.0..0.3);
        let rating = if row % 23 == 0 {
            "NA".to_string()
        } else {
            format!("{:.1}", rng.gen_range(1.0..5.0))
        };
        data.push_str(&format!(
            "{},{},{:.2},{:.3},{}\n",
            region, units, revenue, discount, rating
        ));
    }

    data
}

fn load(rows: usize) -> Dataset {
    let csv = generate_sales_csv(rows);
    let (dataset, _) = Analyst::new()
        .load_bytes(csv.as_bytes(), "sales.csv")
        .expect("generated data parses");
    dataset
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let analyst = Analyst::new();

    for rows in [100, 1_000, 10_000].iter() {
        let csv = generate_sales_csv(*rows);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::new("csv_rows", rows), &csv, |b, csv| {
            b.iter(|| analyst.load_bytes(black_box(csv.as_bytes()), "sales.csv"))
        });
    }

    group.finish();
}

fn bench_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");
    let profiler = StatisticalProfiler::new();

    for rows in [100, 1_000, 10_000].iter() {
        let dataset = load(*rows);
        let profiles = ColumnClassifier::classify(&dataset);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, dataset| {
            b.iter(|| profiler.profile(black_box(dataset), &profiles))
        });
    }

    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let dataset = load(1_000);
    let profiles = ColumnClassifier::classify(&dataset);
    let summary = StatisticalProfiler::new().profile(&dataset, &profiles);
    let synthesizer = InsightSynthesizer::new();

    c.bench_function("synthesize_1000_rows", |b| {
        b.iter(|| synthesizer.synthesize(black_box(&dataset), black_box(&summary)))
    });
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    let projector = ChartProjector::new();
    let bar = ChartRequest::new(ChartType::Bar, "region", Some("revenue".to_string()));
    let scatter = ChartRequest::new(ChartType::Scatter, "units", Some("revenue".to_string()));

    for rows in [1_000, 10_000].iter() {
        let dataset = load(*rows);
        group.bench_with_input(BenchmarkId::new("bar", rows), &dataset, |b, dataset| {
            b.iter(|| projector.project(black_box(dataset), &bar))
        });
        // Above 500 complete rows this includes sampling.
        group.bench_with_input(BenchmarkId::new("scatter", rows), &dataset, |b, dataset| {
            b.iter(|| projector.project(black_box(dataset), &scatter))
        });
    }

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    let analyst = Analyst::new();

    for rows in [100, 1_000, 10_000].iter() {
        let dataset = load(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, dataset| {
            b.iter(|| analyst.analyze(black_box(dataset)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_profile,
    bench_synthesize,
    bench_project,
    bench_full_analysis
);

criterion_main!(benches);
