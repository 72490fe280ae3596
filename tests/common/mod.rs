//! Shared test helpers: an in-memory transport serving JSON fixtures.

#![allow(dead_code)]

use fortigate_exporter::error::{ExporterError, Result};
use fortigate_exporter::fortigate::FortiHttp;
use fortigate_exporter::metrics::Observation;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

pub const IPPOOL_FIXTURE: &str = include_str!("../fixtures/firewall-ippool.json");
pub const NTP_STATUS_FIXTURE: &str = include_str!("../fixtures/system-ntp-status.json");
pub const TRANSCEIVERS_FIXTURE: &str =
    include_str!("../fixtures/system-interface-transceivers.json");
pub const RESOURCE_USAGE_FIXTURE: &str = include_str!("../fixtures/system-resource-usage.json");
pub const SYSTEM_STATUS_FIXTURE: &str = include_str!("../fixtures/system-status.json");

/// Transport that answers from prepared bodies keyed by endpoint path
#[derive(Default)]
pub struct FakeClient {
    responses: HashMap<String, String>,
    fail: bool,
    requests: Mutex<Vec<(String, String)>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every GET fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn prepare(&mut self, path: &str, body: &str) -> &mut Self {
        self.responses.insert(path.to_string(), body.to_string());
        self
    }

    /// Every `(path, query)` requested so far, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl FortiHttp for FakeClient {
    async fn get<T>(&self, path: &str, query: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), query.to_string()));

        if self.fail {
            return Err(ExporterError::Api("connection refused".to_string()));
        }
        let body = self
            .responses
            .get(path)
            .ok_or_else(|| ExporterError::Api(format!("no fixture for {}", path)))?;
        serde_json::from_str(body).map_err(ExporterError::Json)
    }
}

/// Formats an observation like an exposition line, with labels in descriptor order.
pub fn series(obs: &Observation) -> String {
    let labels: Vec<String> = obs
        .desc
        .labels
        .iter()
        .zip(&obs.label_values)
        .map(|(name, value)| format!("{}=\"{}\"", name, value))
        .collect();
    format!("{}{{{}}} {}", obs.desc.name, labels.join(","), obs.value)
}

/// Observations as a sorted list of series lines, for order-independent comparison.
pub fn sorted_series(observations: &[Observation]) -> Vec<String> {
    let mut lines: Vec<String> = observations.iter().map(series).collect();
    lines.sort();
    lines
}

/// Observations belonging to one metric family
pub fn family<'a>(observations: &'a [Observation], name: &str) -> Vec<&'a Observation> {
    observations
        .iter()
        .filter(|o| o.desc.name == name)
        .collect()
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}
