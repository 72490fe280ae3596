use fortigate_exporter::error::ExporterError;
use fortigate_exporter::metrics::{render, ExporterMetrics, MetricDesc, MetricKind, Observation};

static TEST_GAUGE: MetricDesc = MetricDesc::gauge(
    "fortigate_test_gauge",
    "Gauge used in tests",
    &["name", "vdom"],
);

static TEST_COUNTER: MetricDesc =
    MetricDesc::counter("fortigate_test_total", "Counter used in tests", &["server"]);

static TEST_PLAIN: MetricDesc = MetricDesc::gauge("fortigate_test_plain", "Unlabelled gauge", &[]);

fn obs(desc: &'static MetricDesc, value: f64, labels: &[&str]) -> Observation {
    Observation::new(desc, value, labels.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_render_emits_help_type_and_samples() {
    // Given: Gauge and counter observations
    let observations = vec![
        obs(&TEST_GAUGE, 0.5, &["pool-a", "root"]),
        obs(&TEST_GAUGE, 2.0, &["pool-b", "root"]),
        obs(&TEST_COUNTER, 85742.0, &["HA-TEST"]),
    ];

    // When: Rendering
    let rendered = render(&observations).expect("Failed to render metrics");

    // Then: Standard text exposition
    assert!(rendered.contains("# HELP fortigate_test_gauge Gauge used in tests"));
    assert!(rendered.contains("# TYPE fortigate_test_gauge gauge"));
    assert!(rendered.contains("fortigate_test_gauge{name=\"pool-a\",vdom=\"root\"} 0.5"));
    assert!(rendered.contains("fortigate_test_gauge{name=\"pool-b\",vdom=\"root\"} 2"));
    assert!(rendered.contains("# TYPE fortigate_test_total counter"));
    assert!(rendered.contains("fortigate_test_total{server=\"HA-TEST\"} 85742"));
}

#[test]
fn test_render_empty_scrape() {
    let rendered = render(&[]).expect("Failed to render metrics");
    assert!(rendered.is_empty());
}

#[test]
fn test_render_unlabelled_gauge() {
    let rendered = render(&[Observation::unlabeled(&TEST_PLAIN, 3.0)]).unwrap();
    assert!(rendered.contains("fortigate_test_plain 3"));
}

#[test]
fn test_render_drops_repeated_series() {
    // Given: The same series observed twice
    let observations = vec![
        obs(&TEST_GAUGE, 1.0, &["pool-a", "root"]),
        obs(&TEST_GAUGE, 9.0, &["pool-a", "root"]),
    ];

    // When: Rendering
    let rendered = render(&observations).unwrap();

    // Then: The first value wins and the series appears once
    assert!(rendered.contains("fortigate_test_gauge{name=\"pool-a\",vdom=\"root\"} 1"));
    assert_eq!(rendered.matches("pool-a").count(), 1);
}

#[test]
fn test_render_rejects_wrong_label_cardinality() {
    // Given: An observation missing one of its labels
    let broken = Observation {
        desc: &TEST_GAUGE,
        value: 1.0,
        label_values: vec!["pool-a".to_string()],
    };

    // When: Rendering
    let result = render(&[broken]);

    // Then: A metrics error instead of a panic
    assert!(matches!(result, Err(ExporterError::Metrics(_))));
}

#[test]
fn test_render_skips_negative_counter() {
    let rendered = render(&[obs(&TEST_COUNTER, -5.0, &["HA-TEST"])]).unwrap();
    assert!(!rendered.contains("HA-TEST"));
}

#[test]
fn test_descriptor_constructors() {
    assert_eq!(TEST_GAUGE.kind, MetricKind::Gauge);
    assert_eq!(TEST_COUNTER.kind, MetricKind::Counter);
    assert_eq!(TEST_GAUGE.labels, &["name", "vdom"]);
}

#[test]
fn test_observation_label_lookup() {
    let o = obs(&TEST_GAUGE, 1.0, &["pool-a", "root"]);
    assert_eq!(o.label("vdom"), Some("root"));
    assert_eq!(o.label("name"), Some("pool-a"));
    assert_eq!(o.label("missing"), None);
}

#[test]
fn test_exporter_metrics_registration() {
    // Verify that self-metrics can be created and rendered
    let metrics = ExporterMetrics::new().expect("Failed to create exporter metrics");

    metrics.record_scrape(true);
    metrics.record_scrape(false);
    metrics.record_scrape(false);
    metrics.record_probe_failure("system_status");

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("fortigate_exporter_scrapes_total{outcome=\"success\"} 1"));
    assert!(rendered.contains("fortigate_exporter_scrapes_total{outcome=\"failure\"} 2"));
    assert!(rendered.contains("fortigate_exporter_probe_failures_total{probe=\"system_status\"} 1"));
}
