//! FortiGate Probes
//!
//! Each probe queries one monitoring endpoint and translates the response into
//! [`Observation`]s.
//!
//! # Architecture
//!
//! Probes follow a consistent pattern:
//! - Accept the transport ([`FortiHttp`]) and optional [`TargetMetadata`]
//! - Issue one GET and decode the JSON response
//! - Translate fields into observations (usually via [`translate::ScopedTable`])
//! - Return a [`ProbeOutcome`]
//!
//! # Error Handling
//!
//! A failed GET is logged as a warning and turns into an empty, failed
//! outcome. Nothing from a failed fetch is ever emitted, and one failing probe
//! does not stop the others.

use crate::fortigate::{FortiHttp, TargetMetadata};
use crate::metrics::Observation;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

pub mod firewall_ippool;
pub mod system_interface_transceivers;
pub mod system_ntp_status;
pub mod system_resource_usage;
pub mod system_status;
pub mod translate;

pub use firewall_ippool::probe_firewall_ippool;
pub use system_interface_transceivers::probe_system_interface_transceivers;
pub use system_ntp_status::probe_system_ntp_status;
pub use system_resource_usage::probe_system_resource_usage;
pub use system_status::{probe_system_status, system_status_outcome};

/// Status of a probe run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The endpoint was read; observations may still be empty
    Success,
    /// The GET failed (already logged as warning)
    Failed,
}

/// Observations produced by one probe run together with its status
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub observations: Vec<Observation>,
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    pub fn success(observations: Vec<Observation>) -> Self {
        Self {
            observations,
            status: ProbeStatus::Success,
        }
    }

    pub fn failed() -> Self {
        Self {
            observations: Vec::new(),
            status: ProbeStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ProbeStatus::Success
    }
}

/// Helper to reduce boilerplate in probes
///
/// Wraps an API query with consistent error handling:
/// - On success: translates the data and returns a successful outcome
/// - On error: logs a warning and returns an empty, failed outcome
///
/// # Arguments
///
/// * `name` - Probe name (for logging)
/// * `query_future` - Async API call that returns the decoded response
/// * `translate` - Maps the response onto observations
pub async fn probe_with_handler<T, F, P, E>(
    name: &str,
    query_future: F,
    translate: P,
) -> ProbeOutcome
where
    F: std::future::Future<Output = Result<T, E>>,
    E: fmt::Display,
    P: FnOnce(T) -> Vec<Observation>,
{
    match query_future.await {
        Ok(data) => {
            let observations = translate(data);
            debug!("Probe {} produced {} observations", name, observations.len());
            ProbeOutcome::success(observations)
        }
        Err(e) => {
            warn!("Probe {} failed: {}", name, e);
            ProbeOutcome::failed()
        }
    }
}

/// Every probe the exporter knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    FirewallIpPool,
    SystemInterfaceTransceivers,
    SystemNtpStatus,
    SystemResourceUsage,
    SystemStatus,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 5] = [
        ProbeKind::FirewallIpPool,
        ProbeKind::SystemInterfaceTransceivers,
        ProbeKind::SystemNtpStatus,
        ProbeKind::SystemResourceUsage,
        ProbeKind::SystemStatus,
    ];

    /// Name used in configuration and logs
    pub fn name(self) -> &'static str {
        match self {
            ProbeKind::FirewallIpPool => "firewall_ippool",
            ProbeKind::SystemInterfaceTransceivers => "system_interface_transceivers",
            ProbeKind::SystemNtpStatus => "system_ntp_status",
            ProbeKind::SystemResourceUsage => "system_resource_usage",
            ProbeKind::SystemStatus => "system_status",
        }
    }

    pub async fn run<C: FortiHttp>(
        self,
        client: &C,
        meta: Option<&TargetMetadata>,
    ) -> ProbeOutcome {
        match self {
            ProbeKind::FirewallIpPool => probe_firewall_ippool(client, meta).await,
            ProbeKind::SystemInterfaceTransceivers => {
                probe_system_interface_transceivers(client, meta).await
            }
            ProbeKind::SystemNtpStatus => probe_system_ntp_status(client, meta).await,
            ProbeKind::SystemResourceUsage => probe_system_resource_usage(client, meta).await,
            ProbeKind::SystemStatus => probe_system_status(client, meta).await,
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProbeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProbeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown probe: {}", s))
    }
}

/// Combined result of running a set of probes against one target
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub observations: Vec<Observation>,
    pub failed: Vec<ProbeKind>,
}

impl ScrapeReport {
    /// Merges one probe's outcome into the report
    pub fn record(&mut self, kind: ProbeKind, outcome: ProbeOutcome) {
        match outcome.status {
            ProbeStatus::Success => self.observations.extend(outcome.observations),
            ProbeStatus::Failed => self.failed.push(kind),
        }
    }

    /// True when no probe failed
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the given probes one after another and merges their observations.
pub async fn run_probes<C: FortiHttp>(
    client: &C,
    meta: Option<&TargetMetadata>,
    probes: &[ProbeKind],
) -> ScrapeReport {
    let mut report = ScrapeReport::default();
    for &kind in probes {
        let outcome = kind.run(client, meta).await;
        report.record(kind, outcome);
    }
    report
}
