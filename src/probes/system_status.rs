//! System Status Probe
//!
//! # Metrics Produced
//! - `fortigate_version_info` - Always 1
//!   - Labels: build, serial, version

use super::{probe_with_handler, ProbeOutcome};
use crate::error::Result;
use crate::fortigate::metadata::fetch_status;
use crate::fortigate::types::{ApiResponse, SystemStatus};
use crate::fortigate::{FortiHttp, TargetMetadata};
use crate::metrics::{MetricDesc, Observation};

pub static VERSION_INFO: MetricDesc = MetricDesc::gauge(
    "fortigate_version_info",
    "System version and build information",
    &["build", "serial", "version"],
);

pub async fn probe_system_status<C: FortiHttp>(
    client: &C,
    _meta: Option<&TargetMetadata>,
) -> ProbeOutcome {
    system_status_outcome(fetch_status(client).await).await
}

/// Translates an already fetched status envelope, so a scrape that read it
/// for the firmware version does not request it again.
pub async fn system_status_outcome(status: Result<ApiResponse<SystemStatus>>) -> ProbeOutcome {
    probe_with_handler(
        "system_status",
        std::future::ready(status),
        |status: ApiResponse<SystemStatus>| {
            vec![Observation::new(
                &VERSION_INFO,
                1.0,
                vec![status.build, status.serial, status.version],
            )]
        },
    )
    .await
}
