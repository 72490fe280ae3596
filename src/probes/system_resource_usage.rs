//! Resource Usage Probe
//!
//! Global CPU, memory and session usage over the last minute.
//!
//! # Metrics Produced
//! - `fortigate_cpu_usage_ratio` - CPU usage (0 - 1.0)
//! - `fortigate_memory_usage_ratio` - Memory usage (0 - 1.0)
//! - `fortigate_current_sessions` - Number of active sessions
//!
//! A family is omitted when the appliance reports no sample for it.

use super::translate::ratio;
use super::{probe_with_handler, ProbeOutcome};
use crate::fortigate::types::{ApiResponse, ResourceSample, ResourceUsage};
use crate::fortigate::{FortiHttp, TargetMetadata};
use crate::metrics::{MetricDesc, Observation};

pub const PATH: &str = "api/v2/monitor/system/resource/usage";
pub const QUERY: &str = "interval=1-min&scope=global";

pub static CPU: MetricDesc = MetricDesc::gauge(
    "fortigate_cpu_usage_ratio",
    "Current resource usage ratio of system CPU, range 0.0-1.0",
    &[],
);
pub static MEMORY: MetricDesc = MetricDesc::gauge(
    "fortigate_memory_usage_ratio",
    "Current resource usage ratio of system memory, range 0.0-1.0",
    &[],
);
pub static SESSIONS: MetricDesc = MetricDesc::gauge(
    "fortigate_current_sessions",
    "Current amount of sessions",
    &[],
);

fn latest(samples: &[ResourceSample]) -> Option<f64> {
    samples.first().map(|s| s.current)
}

pub async fn probe_system_resource_usage<C: FortiHttp>(
    client: &C,
    _meta: Option<&TargetMetadata>,
) -> ProbeOutcome {
    probe_with_handler(
        "system_resource_usage",
        client.get::<ApiResponse<ResourceUsage>>(PATH, QUERY),
        |response: ApiResponse<ResourceUsage>| {
            let usage = response.results;
            [
                latest(&usage.cpu).map(|v| Observation::unlabeled(&CPU, ratio(v))),
                latest(&usage.mem).map(|v| Observation::unlabeled(&MEMORY, ratio(v))),
                latest(&usage.session).map(|v| Observation::unlabeled(&SESSIONS, v)),
            ]
            .into_iter()
            .flatten()
            .collect()
        },
    )
    .await
}
