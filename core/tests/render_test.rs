//! Render dispatch tests
//!
//! One section per widget type, plus the cross-cutting guarantees:
//! placeholders instead of errors, idempotence, and shared use across threads.

use hercules_core::render::{
    ChartBody, CustomRenderRequest, PlaceholderReason, RenderInstruction, Trend,
};
use hercules_core::threshold::ThresholdPreset;
use hercules_core::widget::{ConfigPatch, WidgetDescriptor};
use hercules_core::{
    library, ChartType, CustomRenderer, CustomRendererRegistry, DisplayMode, RendererConfig,
    WidgetRenderer, WidgetType,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn widget(widget_type: WidgetType, mode: DisplayMode) -> WidgetDescriptor {
    WidgetDescriptor::new(format!("{}-1", widget_type), widget_type, "Test widget")
        .unwrap()
        .apply(ConfigPatch {
            display_mode: Some(mode),
            ..Default::default()
        })
        .unwrap()
}

fn with(descriptor: WidgetDescriptor, patch: ConfigPatch) -> WidgetDescriptor {
    descriptor.apply(patch).unwrap()
}

// ============================================================================
// Chart
// ============================================================================

#[test]
fn xy_chart_without_y_axis_is_unbound_placeholder() {
    let chart = with(
        widget(WidgetType::Chart, DisplayMode::XyChart),
        ConfigPatch {
            x_axis_field: Some("timestamp".into()),
            ..Default::default()
        },
    );
    let data = vec![json!({"timestamp": 1, "output": 5})];

    let out = WidgetRenderer::default().render(&chart, Some(&data));
    let placeholder = out.as_placeholder().expect("placeholder");
    assert_eq!(
        placeholder.reason,
        PlaceholderReason::UnboundField {
            fields: vec!["yAxisField".into()]
        }
    );
    assert_eq!(placeholder.message, "Field not bound: yAxisField");
}

#[test]
fn xy_chart_reads_timestamps() {
    let chart = with(
        widget(WidgetType::Chart, DisplayMode::XyChart),
        ConfigPatch {
            x_axis_field: Some("at".into()),
            y_axis_field: Some("output".into()),
            ..Default::default()
        },
    );
    let data = vec![
        json!({"at": "2024-05-01T08:00:00Z", "output": 10}),
        json!({"at": "2024-05-01T09:00:00Z", "output": 14}),
    ];

    match WidgetRenderer::default().render(&chart, Some(&data)) {
        RenderInstruction::Chart(c) => match c.body {
            ChartBody::Cartesian { series, .. } => {
                assert_eq!(series.len(), 1);
                let pts = &series[0].points;
                assert_eq!(pts[1].x - pts[0].x, 3_600_000.0);
                assert_eq!(pts[1].y, 14.0);
            }
            other => panic!("expected cartesian body, got {:?}", other),
        },
        other => panic!("expected chart, got {:?}", other),
    }
}

#[test]
fn trend_mode_adds_derived_series() {
    let chart = widget(WidgetType::Chart, DisplayMode::Trend);
    let data: Vec<Value> = (0..5).map(|i| json!({"value": i * 2})).collect();

    match WidgetRenderer::default().render(&chart, Some(&data)) {
        RenderInstruction::Chart(c) => match c.body {
            ChartBody::Cartesian { series, .. } => {
                assert_eq!(series.len(), 2);
                assert!(series[1].derived);
                let last = series[1].points.last().unwrap();
                assert!((last.y - 8.0).abs() < 1e-9);
            }
            other => panic!("expected cartesian body, got {:?}", other),
        },
        other => panic!("expected chart, got {:?}", other),
    }
}

#[test]
fn categorical_x_axis_falls_back_to_index() {
    let chart = with(
        widget(WidgetType::Chart, DisplayMode::Single),
        ConfigPatch {
            x_axis_field: Some("day".into()),
            ..Default::default()
        },
    );
    let data = vec![
        json!({"day": "Mon", "value": 5}),
        json!({"day": "Tue", "value": 7}),
        json!({"day": "Wed"}),
    ];

    match WidgetRenderer::default().render(&chart, Some(&data)) {
        RenderInstruction::Chart(c) => match c.body {
            ChartBody::Cartesian { series, .. } => {
                let xs: Vec<f64> = series[0].points.iter().map(|p| p.x).collect();
                let ys: Vec<f64> = series[0].points.iter().map(|p| p.y).collect();
                assert_eq!(xs, vec![0.0, 1.0]);
                assert_eq!(ys, vec![5.0, 7.0]);
            }
            other => panic!("expected cartesian body, got {:?}", other),
        },
        other => panic!("expected chart, got {:?}", other),
    }
}

#[test]
fn donut_slices_sum_to_one() {
    let chart = with(
        widget(WidgetType::Chart, DisplayMode::Single),
        ConfigPatch {
            chart_type: Some(ChartType::Donut),
            ..Default::default()
        },
    );
    let data = vec![
        json!({"name": "A", "value": 30}),
        json!({"name": "B", "value": 10}),
        json!({"name": "A", "value": 20}),
    ];

    match WidgetRenderer::default().render(&chart, Some(&data)) {
        RenderInstruction::Chart(c) => {
            assert_eq!(c.chart_type, ChartType::Donut);
            match c.body {
                ChartBody::Radial { hole_ratio, slices } => {
                    assert_eq!(hole_ratio, 0.6);
                    assert_eq!(slices.len(), 2);
                    assert_eq!(slices[0].label, "A");
                    assert_eq!(slices[0].value, 50.0);
                    let total: f64 = slices.iter().map(|s| s.fraction).sum();
                    assert!((total - 1.0).abs() < 1e-9);
                }
                other => panic!("expected radial body, got {:?}", other),
            }
        }
        other => panic!("expected chart, got {:?}", other),
    }
}

#[test]
fn multiple_series_grouped_by_label() {
    let chart = widget(WidgetType::Chart, DisplayMode::Multiple);
    let data = vec![
        json!({"name": "north", "value": 1}),
        json!({"name": "south", "value": 2}),
        json!({"name": "north", "value": 3}),
    ];
    match WidgetRenderer::default().render(&chart, Some(&data)) {
        RenderInstruction::Chart(c) => match c.body {
            ChartBody::Cartesian { series, .. } => {
                let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["north", "south"]);
                assert_eq!(series[0].points.len(), 2);
            }
            other => panic!("expected cartesian body, got {:?}", other),
        },
        other => panic!("expected chart, got {:?}", other),
    }
}

// ============================================================================
// Gauge
// ============================================================================

#[test]
fn multiple_gauges_one_per_record_clamped() {
    let gauge = widget(WidgetType::Gauge, DisplayMode::Multiple);
    let data = vec![
        json!({"value": 140}),
        json!({"value": -20}),
        json!({"value": 42.5}),
    ];

    match WidgetRenderer::default().render(&gauge, Some(&data)) {
        RenderInstruction::Gauge(g) => {
            assert_eq!(g.dials.len(), 3);
            assert_eq!(g.radius, 30.0);
            let percents: Vec<f64> = g.dials.iter().map(|d| d.percent).collect();
            assert_eq!(percents, vec![100.0, 0.0, 42.5]);
            for d in &g.dials {
                assert!((0.0..=100.0).contains(&d.percent));
                assert!(d.arc_length <= g.circumference + 1e-9);
            }
        }
        other => panic!("expected gauge, got {:?}", other),
    }
}

#[test]
fn single_gauge_uses_latest_reading_and_band() {
    let gauge = with(
        widget(WidgetType::Gauge, DisplayMode::Single),
        ConfigPatch {
            thresholds: Some(ThresholdPreset::Standard.thresholds()),
            ..Default::default()
        },
    );
    let data = vec![json!({"value": 20}), json!({"value": 65}), json!({"note": "offline"})];

    match WidgetRenderer::default().render(&gauge, Some(&data)) {
        RenderInstruction::Gauge(g) => {
            assert_eq!(g.dials.len(), 1);
            assert_eq!(g.dials[0].value, Some(65.0));
            assert_eq!(g.dials[0].color, "#ffaa00");
            assert_eq!(g.dials[0].band.as_ref().unwrap().label, "Warning");
        }
        other => panic!("expected gauge, got {:?}", other),
    }
}

#[test]
fn gauge_with_nan_scale_stays_in_range() {
    let config = RendererConfig {
        gauge_min: f64::NAN,
        ..Default::default()
    };
    let gauge = widget(WidgetType::Gauge, DisplayMode::Multiple);
    match WidgetRenderer::new(config).render(&gauge, Some(&[json!({"value": 50})])) {
        RenderInstruction::Gauge(g) => {
            let d = &g.dials[0];
            assert!((0.0..=100.0).contains(&d.percent));
            assert!(d.sweep_degrees.is_finite());
            assert!(d.arc_length.is_finite());
        }
        other => panic!("expected gauge, got {:?}", other),
    }
}

#[test]
fn gauge_scale_comes_from_config() {
    let config = RendererConfig {
        gauge_min: 0.0,
        gauge_max: 10.0,
        ..Default::default()
    };
    let gauge = widget(WidgetType::Gauge, DisplayMode::Single);
    match WidgetRenderer::new(config).render(&gauge, Some(&[json!({"value": 2.5})])) {
        RenderInstruction::Gauge(g) => assert_eq!(g.dials[0].percent, 25.0),
        other => panic!("expected gauge, got {:?}", other),
    }
}

// ============================================================================
// KPI
// ============================================================================

#[test]
fn kpi_single_reports_trend() {
    let kpi = widget(WidgetType::Kpi, DisplayMode::Single);
    let data = vec![
        json!({"value": 80, "unit": "%"}),
        json!({"value": 100, "unit": "%", "name": "OEE"}),
    ];

    match WidgetRenderer::default().render(&kpi, Some(&data)) {
        RenderInstruction::Kpi(k) => {
            let tile = &k.tiles[0];
            assert_eq!(tile.label, "OEE");
            assert_eq!(tile.value, 100.0);
            assert_eq!(tile.previous, Some(80.0));
            assert_eq!(tile.trend, Trend::Up);
            assert_eq!(tile.change_percent, Some(25.0));
            assert_eq!(tile.unit.as_deref(), Some("%"));
            assert_eq!(tile.sparkline, vec![80.0, 100.0]);
        }
        other => panic!("expected kpi, got {:?}", other),
    }
}

#[test]
fn kpi_multiple_one_tile_per_numeric_record() {
    let kpi = widget(WidgetType::Kpi, DisplayMode::Multiple);
    let data = vec![json!({"value": 1}), json!({"value": "n/a"}), json!(7)];
    match WidgetRenderer::default().render(&kpi, Some(&data)) {
        RenderInstruction::Kpi(k) => {
            assert_eq!(k.tiles.len(), 2);
            assert_eq!(k.tiles[1].value, 7.0);
        }
        other => panic!("expected kpi, got {:?}", other),
    }
}

#[test]
fn kpi_without_numeric_readings_is_no_data() {
    let kpi = widget(WidgetType::Kpi, DisplayMode::Single);
    let out = WidgetRenderer::default().render(&kpi, Some(&[json!({"status": "ok"})]));
    assert_eq!(out.as_placeholder().unwrap().reason, PlaceholderReason::NoData);
}

// ============================================================================
// Network
// ============================================================================

#[test]
fn network_edges_from_links() {
    let net = widget(WidgetType::Network, DisplayMode::Multiple);
    let data = vec![
        json!({"id": "pump", "connections": ["valve", "tank"]}),
        json!({"id": "valve", "connections": ["pump", "ghost"]}),
        json!({"id": "tank"}),
        json!({"id": "pump"}),
    ];

    match WidgetRenderer::default().render(&net, Some(&data)) {
        RenderInstruction::Network(n) => {
            assert_eq!(n.nodes.len(), 3);
            assert_eq!(n.edges.len(), 2);
        }
        other => panic!("expected network, got {:?}", other),
    }
}

#[test]
fn synthesized_ids_do_not_shadow_declared_ids() {
    let net = widget(WidgetType::Network, DisplayMode::Multiple);
    let data = vec![
        json!({"value": 1}),
        json!({"id": "node-0", "value": 2}),
        json!({"id": "node-2", "value": 3}),
        json!({"value": 4}),
    ];
    match WidgetRenderer::default().render(&net, Some(&data)) {
        RenderInstruction::Network(n) => {
            let ids: Vec<_> = n.nodes.iter().map(|node| node.id.as_str()).collect();
            assert_eq!(ids, vec!["node-0-1", "node-0", "node-2", "node-3"]);
        }
        other => panic!("expected network, got {:?}", other),
    }
}

#[test]
fn network_without_links_chains_nodes() {
    let net = widget(WidgetType::Network, DisplayMode::Single);
    let data = vec![json!({"value": 1}), json!({"value": 2}), json!({"value": 3})];
    match WidgetRenderer::default().render(&net, Some(&data)) {
        RenderInstruction::Network(n) => {
            assert_eq!(n.nodes[0].id, "node-0");
            assert_eq!(n.edges.len(), 2);
            assert_eq!(n.edges[1].from, "node-1");
            assert_eq!(n.edges[1].to, "node-2");
        }
        other => panic!("expected network, got {:?}", other),
    }
}

// ============================================================================
// Table
// ============================================================================

#[test]
fn simple_table_has_no_grouping() {
    let table = widget(WidgetType::Table, DisplayMode::Single);
    let data = vec![json!({"name": "A", "value": 1}), json!({"name": "B"})];
    match WidgetRenderer::default().render(&table, Some(&data)) {
        RenderInstruction::Table(t) => {
            assert_eq!(t.columns, vec!["name".to_string(), "value".to_string()]);
            assert_eq!(t.rows[1].cells[1], Value::Null);
            assert!(t.grouping.is_none());
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn advanced_table_groups_and_facets() {
    let table = widget(WidgetType::Table, DisplayMode::Multiple);
    let data = vec![
        json!({"name": "line-1", "shift": "day", "value": 3}),
        json!({"name": "line-2", "shift": "night", "value": 5}),
        json!({"name": "line-1", "shift": "night", "value": 4}),
        json!({"shift": "day", "value": 1}),
    ];
    match WidgetRenderer::default().render(&table, Some(&data)) {
        RenderInstruction::Table(t) => {
            let grouping = t.grouping.expect("grouping");
            assert_eq!(grouping.group_by, "name");
            let keys: Vec<_> = grouping.groups.iter().map(|g| g.key.as_str()).collect();
            assert_eq!(keys, vec!["line-1", "line-2", "(none)"]);
            assert_eq!(grouping.groups[0].rows, vec![0, 2]);

            let shift = grouping.filters.iter().find(|f| f.column == "shift").unwrap();
            assert_eq!(shift.values, vec!["day".to_string(), "night".to_string()]);
            assert!(grouping.filters.iter().all(|f| f.column != "value"));
        }
        other => panic!("expected table, got {:?}", other),
    }
}

// ============================================================================
// Custom
// ============================================================================

struct RecordCounter;

impl CustomRenderer for RecordCounter {
    fn name(&self) -> String {
        "record_counter".to_string()
    }

    fn render(&self, request: &CustomRenderRequest) -> Value {
        json!({ "count": request.data.len(), "mode": request.mode })
    }
}

#[test]
fn custom_widget_delegates_even_without_data() {
    init_logging();
    let registry = CustomRendererRegistry::new();
    registry.register(Arc::new(RecordCounter));
    let renderer = WidgetRenderer::default().with_registry(registry);

    let custom = with(
        widget(WidgetType::Custom, DisplayMode::Single),
        ConfigPatch {
            renderer: Some("record_counter".into()),
            ..Default::default()
        },
    );
    match renderer.render(&custom, None) {
        RenderInstruction::Custom(c) => {
            assert_eq!(c.payload, json!({"count": 0, "mode": "single"}));
        }
        other => panic!("expected custom, got {:?}", other),
    }
}

#[test]
fn registry_replace_and_unregister() {
    let registry = CustomRendererRegistry::new();
    assert!(registry.register(Arc::new(RecordCounter)).is_none());
    assert!(registry.register(Arc::new(RecordCounter)).is_some());
    assert_eq!(registry.names(), vec!["record_counter".to_string()]);
    assert!(registry.unregister("record_counter").is_some());
    assert!(registry.is_empty());
}

// ============================================================================
// Cross-cutting
// ============================================================================

#[test]
fn every_type_without_data_is_a_placeholder() {
    init_logging();
    let renderer = WidgetRenderer::default();
    for t in WidgetType::ALL {
        let w = library::instantiate(t, "w").unwrap();
        let out = renderer.render(&w, None);
        assert!(out.is_placeholder(), "{t} rendered {:?}", out);
        assert_eq!(out.widget_id(), "w");
    }
}

#[test]
fn rendering_is_idempotent() {
    let renderer = WidgetRenderer::default();
    let table = widget(WidgetType::Table, DisplayMode::Multiple)
        .with_data(vec![json!({"name": "a", "value": 1}), json!({"name": "b", "value": 2})]);
    let first = renderer.render_embedded(&table);
    let second = renderer.render_embedded(&table);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn board_preserves_widget_order() {
    let board: Vec<WidgetDescriptor> = WidgetType::ALL
        .iter()
        .map(|t| library::instantiate(*t, format!("{}-w", t)).unwrap().with_data(vec![json!({"value": 5})]))
        .collect();
    let out = WidgetRenderer::default().render_board(&board);
    let ids: Vec<_> = out.iter().map(|i| i.widget_id().to_string()).collect();
    let expected: Vec<_> = board.iter().map(|w| w.id().to_string()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn renderer_is_shared_across_threads() {
    let renderer = WidgetRenderer::default();
    let gauge = widget(WidgetType::Gauge, DisplayMode::Multiple);
    let data: Vec<Value> = (0..20).map(|i| json!({"value": i * 10})).collect();
    let expected = renderer.render(&gauge, Some(&data));

    let (renderer, gauge, data) = (&renderer, &gauge, data.as_slice());
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(move || renderer.render(gauge, Some(data))))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn instructions_are_tagged_by_kind() {
    let kpi = widget(WidgetType::Kpi, DisplayMode::Single);
    let out = WidgetRenderer::default().render(&kpi, Some(&[json!({"value": 3})]));
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["kind"], "kpi");

    let none = WidgetRenderer::default().render(&kpi, None);
    let json = serde_json::to_value(&none).unwrap();
    assert_eq!(json["kind"], "placeholder");
    assert_eq!(json["reason"]["code"], "no_data");
}
