/// Widget render benchmarks using Criterion
///
/// Run with: cargo bench --bench render_benchmark
///
/// Benchmarks cover:
/// - Per-strategy render cost as record counts grow
/// - Threshold set mutation (sort on every change)
/// - Whole-board rendering
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hercules_core::threshold::{Threshold, ThresholdPreset, ThresholdSet};
use hercules_core::widget::{ConfigPatch, WidgetDescriptor};
use hercules_core::{library, ChartType, DisplayMode, WidgetRenderer, WidgetType};
use serde_json::{json, Value};

fn make_records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("asset-{}", i),
                "name": format!("line-{}", i % 4),
                "value": (i * 37 % 120) as f64,
                "unit": "%",
                "connections": [format!("asset-{}", (i + 1) % count)],
            })
        })
        .collect()
}

fn make_widget(widget_type: WidgetType, mode: DisplayMode) -> WidgetDescriptor {
    let mut patch = ConfigPatch {
        display_mode: Some(mode),
        thresholds: Some(ThresholdPreset::Standard.thresholds()),
        ..Default::default()
    };
    if widget_type == WidgetType::Chart {
        patch.chart_type = Some(ChartType::Line);
    }
    WidgetDescriptor::new("bench", widget_type, "Benchmark")
        .and_then(|w| w.apply(patch))
        .unwrap()
}

/// Benchmark: each strategy at increasing record counts
fn bench_strategies(c: &mut Criterion) {
    let renderer = WidgetRenderer::default();
    let cases = [
        (WidgetType::Kpi, DisplayMode::Single),
        (WidgetType::Chart, DisplayMode::Trend),
        (WidgetType::Gauge, DisplayMode::Multiple),
        (WidgetType::Network, DisplayMode::Multiple),
        (WidgetType::Table, DisplayMode::Multiple),
    ];

    for (widget_type, mode) in cases {
        let mut group = c.benchmark_group(format!("render_{}", widget_type));
        let widget = make_widget(widget_type, mode);

        for count in [10, 100, 1_000].iter() {
            let data = make_records(*count);
            group.throughput(Throughput::Elements(*count as u64));
            group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
                b.iter(|| black_box(renderer.render(&widget, Some(data))));
            });
        }
        group.finish();
    }
}

/// Benchmark: building a threshold set one add at a time
fn bench_threshold_adds(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold_adds");

    for count in [8, 64].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let mut set = ThresholdSet::new();
                for i in 0..count {
                    let value = ((i * 7919) % 100) as f64;
                    set = set
                        .add(Threshold::new(value, "#00ffff", format!("t{}", i)))
                        .unwrap();
                }
                black_box(set)
            });
        });
    }
    group.finish();
}

/// Benchmark: a full board built from the widget library
fn bench_board(c: &mut Criterion) {
    let renderer = WidgetRenderer::default();
    let data = make_records(200);
    let board: Vec<WidgetDescriptor> = WidgetType::ALL
        .iter()
        .map(|t| {
            library::instantiate(*t, format!("{}-1", t))
                .unwrap()
                .with_data(data.clone())
        })
        .collect();

    c.bench_function("render_board", |b| {
        b.iter(|| black_box(renderer.render_board(&board)))
    });
}

criterion_group!(benches, bench_strategies, bench_threshold_adds, bench_board);
criterion_main!(benches);
