//! Prometheus Metrics Definitions
//!
//! Probes do not write into a long-lived registry. Each probe returns a list of
//! [`Observation`]s tagged with a static [`MetricDesc`], and [`render`] turns the
//! observations of one scrape into Prometheus text format using a fresh
//! registry. Nothing survives between scrapes.
//!
//! The exporter's own health counters live in [`ExporterMetrics`], which keeps a
//! persistent registry served on `/metrics`.
//!
//! # Metric Types
//!
//! - **Gauge**: value reported as-is by the appliance (pool usage, NTP delay)
//! - **Counter**: monotonic value reported by the appliance (NTP reftime)
//!
//! All probe metrics use the `fortigate_` prefix.

use crate::error::Result;
use prometheus::{CounterVec, Encoder, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

/// Name, help text and label schema of one metric family.
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
    pub kind: MetricKind,
}

impl MetricDesc {
    pub const fn gauge(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            labels,
            kind: MetricKind::Gauge,
        }
    }

    pub const fn counter(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            labels,
            kind: MetricKind::Counter,
        }
    }
}

/// One emitted data point. `label_values` is ordered like `desc.labels`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub desc: &'static MetricDesc,
    pub value: f64,
    pub label_values: Vec<String>,
}

impl Observation {
    pub fn new(desc: &'static MetricDesc, value: f64, label_values: Vec<String>) -> Self {
        debug_assert_eq!(
            desc.labels.len(),
            label_values.len(),
            "label cardinality mismatch for {}",
            desc.name
        );
        Self {
            desc,
            value,
            label_values,
        }
    }

    /// Observation for a family without labels.
    pub fn unlabeled(desc: &'static MetricDesc, value: f64) -> Self {
        Self::new(desc, value, Vec::new())
    }

    /// Value of the label called `name`, if the descriptor declares one.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.desc
            .labels
            .iter()
            .position(|l| *l == name)
            .and_then(|i| self.label_values.get(i))
            .map(String::as_str)
    }
}

pub static PROBE_SUCCESS: MetricDesc = MetricDesc::gauge(
    "fortigate_probe_success",
    "Whether every probe against the target succeeded (1=yes, 0=no)",
    &[],
);

pub static PROBE_DURATION: MetricDesc = MetricDesc::gauge(
    "fortigate_probe_duration_seconds",
    "Time spent probing the target, in seconds",
    &[],
);

/// Renders the observations of one scrape in Prometheus text format.
///
/// Observations are grouped by descriptor name. A series whose label values
/// repeat an earlier one is dropped with a warning, and the first value wins.
/// Label cardinality errors and conflicting descriptors surface as
/// [`ExporterError::Metrics`](crate::error::ExporterError::Metrics).
pub fn render(observations: &[Observation]) -> Result<String> {
    let registry = Registry::new();
    let mut gauges: HashMap<&'static str, GaugeVec> = HashMap::new();
    let mut counters: HashMap<&'static str, CounterVec> = HashMap::new();
    let mut seen: HashSet<(&'static str, &[String])> = HashSet::new();

    for obs in observations {
        if !seen.insert((obs.desc.name, obs.label_values.as_slice())) {
            warn!(
                "Dropping duplicate series {}{:?}",
                obs.desc.name, obs.label_values
            );
            continue;
        }

        let values: Vec<&str> = obs.label_values.iter().map(String::as_str).collect();
        match obs.desc.kind {
            MetricKind::Gauge => {
                let vec = match gauges.entry(obs.desc.name) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => {
                        let vec = GaugeVec::new(
                            Opts::new(obs.desc.name, obs.desc.help),
                            obs.desc.labels,
                        )?;
                        registry.register(Box::new(vec.clone()))?;
                        e.insert(vec)
                    }
                };
                vec.get_metric_with_label_values(values.as_slice())?
                    .set(obs.value);
            }
            MetricKind::Counter => {
                if obs.value < 0.0 || obs.value.is_nan() {
                    warn!(
                        "Skipping invalid counter value {} for {}",
                        obs.value, obs.desc.name
                    );
                    continue;
                }
                let vec = match counters.entry(obs.desc.name) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => {
                        let vec = CounterVec::new(
                            Opts::new(obs.desc.name, obs.desc.help),
                            obs.desc.labels,
                        )?;
                        registry.register(Box::new(vec.clone()))?;
                        e.insert(vec)
                    }
                };
                vec.get_metric_with_label_values(values.as_slice())?
                    .inc_by(obs.value);
            }
        }
    }

    encode(&registry)
}

fn encode(registry: &Registry) -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    // TextEncoder only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Self-observability counters for the exporter process
#[derive(Clone)]
pub struct ExporterMetrics {
    registry: Arc<Registry>,
    pub scrapes_total: Arc<IntCounterVec>,
    pub probe_failures_total: Arc<IntCounterVec>,
}

impl ExporterMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let scrapes_total = IntCounterVec::new(
            Opts::new("scrapes_total", "Number of target scrapes by outcome")
                .namespace("fortigate_exporter"),
            &["outcome"],
        )?;

        let probe_failures_total = IntCounterVec::new(
            Opts::new("probe_failures_total", "Number of failed probe runs")
                .namespace("fortigate_exporter"),
            &["probe"],
        )?;

        registry.register(Box::new(scrapes_total.clone()))?;
        registry.register(Box::new(probe_failures_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            scrapes_total: Arc::new(scrapes_total),
            probe_failures_total: Arc::new(probe_failures_total),
        })
    }

    pub fn record_scrape(&self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.scrapes_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_probe_failure(&self, probe: &str) {
        self.probe_failures_total.with_label_values(&[probe]).inc();
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String> {
        encode(&self.registry)
    }
}
