//! HTTP Server and Scrape Handling
//!
//! This module implements the exporter's HTTP surface. Every request to
//! `/probe` performs a fresh scrape of one appliance; no results are cached
//! between requests.
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page
//! - `GET /probe?target=<url>` - Run the enabled probes against a configured target
//! - `GET /metrics` - Exporter self-metrics
//! - `GET /health` - Liveness check
//!
//! # Scrape Flow
//!
//! 1. Resolve the target in the configuration and build a client for it
//! 2. Read the system status once: it gives the firmware version for
//!    version-gated probes and feeds the `system_status` probe
//! 3. Run the enabled probes sequentially
//! 4. Append `fortigate_probe_success` and `fortigate_probe_duration_seconds`
//! 5. Render everything in Prometheus text format
//!
//! # Error Handling
//!
//! Individual probe failures are logged and turn `fortigate_probe_success` to 0,
//! but the metrics of the remaining probes are still returned.

use crate::config::Config;
use crate::error::ExporterError;
use crate::fortigate::metadata::fetch_status;
use crate::fortigate::{build_http_client, FortiHttp, FortigateClient, TargetMetadata};
use crate::metrics::{self, ExporterMetrics, Observation, PROBE_DURATION, PROBE_SUCCESS};
use crate::probes::{run_probes, system_status_outcome, ProbeKind, ScrapeReport};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    http: reqwest::Client,
    metrics: ExporterMetrics,
}

impl AppState {
    pub fn new(config: Config) -> crate::error::Result<Self> {
        Ok(Self {
            http: build_http_client(&config.fortigate)?,
            metrics: ExporterMetrics::new()?,
            config: Arc::new(config),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProbeParams {
    target: String,
}

/// Builds the exporter's HTTP routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/probe", get(probe_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let app = router(AppState::new(config)?);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Exporter listening on {}", addr);
    info!("Probe endpoint: http://{}/probe?target=<url>", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Scrapes one target: firmware metadata, the given probes, and the
/// `fortigate_probe_*` meta observations.
pub async fn scrape<C: FortiHttp>(client: &C, probes: &[ProbeKind]) -> ScrapeReport {
    let started = Instant::now();
    let status = fetch_status(client).await;
    let meta = match &status {
        Ok(status) => TargetMetadata::from_status(status),
        Err(e) => {
            warn!("Failed to read target firmware version: {}", e);
            None
        }
    };

    // The status envelope is already in hand, so system_status reuses it
    let remaining: Vec<ProbeKind> = probes
        .iter()
        .copied()
        .filter(|kind| *kind != ProbeKind::SystemStatus)
        .collect();
    let mut report = run_probes(client, meta.as_ref(), &remaining).await;
    if probes.contains(&ProbeKind::SystemStatus) {
        let outcome = system_status_outcome(status).await;
        report.record(ProbeKind::SystemStatus, outcome);
    }

    let success = if report.success() { 1.0 } else { 0.0 };
    report
        .observations
        .push(Observation::unlabeled(&PROBE_SUCCESS, success));
    report.observations.push(Observation::unlabeled(
        &PROBE_DURATION,
        started.elapsed().as_secs_f64(),
    ));
    report
}

async fn scrape_target(state: &AppState, target_url: &str) -> crate::error::Result<String> {
    let target = state
        .config
        .target(target_url)
        .ok_or_else(|| ExporterError::UnknownTarget(target_url.to_string()))?;

    let client = FortigateClient::new(state.http.clone(), &target.url, target.token.clone());
    let probes = state.config.probes_for(target);
    debug!("Probing {} with {} probes", client.base_url(), probes.len());

    let report = scrape(&client, &probes).await;

    for kind in &report.failed {
        state.metrics.record_probe_failure(kind.name());
    }
    state.metrics.record_scrape(report.success());
    if !report.success() {
        warn!(
            "Scrape of {} finished with {} failed probes",
            client.base_url(),
            report.failed.len()
        );
    }

    metrics::render(&report.observations)
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>FortiGate Exporter</title></head>
<body>
<h1>FortiGate Prometheus Exporter</h1>
<p>Probe a target: <code>/probe?target=https://fortigate.example.com</code></p>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn probe_handler(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
) -> Response {
    match scrape_target(&state, &params.target).await {
        Ok(body) => body.into_response(),
        Err(ExporterError::UnknownTarget(target)) => {
            warn!("Probe requested for unconfigured target {}", target);
            (
                StatusCode::BAD_REQUEST,
                format!("Unknown target: {}", target),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
