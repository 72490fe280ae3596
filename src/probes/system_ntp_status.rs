//! NTP Status Probe
//!
//! Per-server NTP synchronisation state, available from FortiOS 7.4. On older
//! firmware, or when the firmware version is unknown, the probe emits nothing
//! and still reports success.
//!
//! # Metrics Produced
//! - `fortigate_system_ntp_delay_seconds` - Round trip delay
//! - `fortigate_system_ntp_dispersion_seconds` - Dispersion to primary clock
//! - `fortigate_system_ntp_dispersion_peer_seconds` - Peer dispersion
//! - `fortigate_system_ntp_expires_seconds` - Expire time
//! - `fortigate_system_ntp_offset_seconds` - Combined offset
//! - `fortigate_system_ntp_reftime_seconds` - Reference time, epoch seconds (counter)
//! - `fortigate_system_ntp_stratum` - Stratum
//!
//! All labelled `ip`, `reachable`, `selected`, `server`, `vdom`, `version`.

use super::translate::{bool_label, Family, ScopedTable};
use super::{probe_with_handler, ProbeOutcome};
use crate::fortigate::metadata::supports;
use crate::fortigate::types::{ApiResponse, NtpServer};
use crate::fortigate::{FortiHttp, TargetMetadata};
use crate::metrics::MetricDesc;
use tracing::debug;

pub const PATH: &str = "api/v2/monitor/system/ntp/status";

/// First firmware release that reports per-server NTP state
pub const MIN_VERSION: (u32, u32) = (7, 4);

const LABELS: &[&str] = &["ip", "reachable", "selected", "server", "vdom", "version"];

pub static DELAY: MetricDesc = MetricDesc::gauge(
    "fortigate_system_ntp_delay_seconds",
    "NTP round trip delay, in seconds",
    LABELS,
);
pub static DISPERSION: MetricDesc = MetricDesc::gauge(
    "fortigate_system_ntp_dispersion_seconds",
    "NTP dispersion to primary clock, in seconds",
    LABELS,
);
pub static DISPERSION_PEER: MetricDesc = MetricDesc::gauge(
    "fortigate_system_ntp_dispersion_peer_seconds",
    "NTP peer dispersion, in seconds",
    LABELS,
);
pub static EXPIRES: MetricDesc = MetricDesc::gauge(
    "fortigate_system_ntp_expires_seconds",
    "NTP expire time, in seconds",
    LABELS,
);
pub static OFFSET: MetricDesc = MetricDesc::gauge(
    "fortigate_system_ntp_offset_seconds",
    "NTP combined offset, in seconds",
    LABELS,
);
pub static REFTIME: MetricDesc = MetricDesc::counter(
    "fortigate_system_ntp_reftime_seconds",
    "NTP reftime in epoch seconds",
    LABELS,
);
pub static STRATUM: MetricDesc =
    MetricDesc::gauge("fortigate_system_ntp_stratum", "NTP stratum value", LABELS);

fn labels(vdom: &str, server: &NtpServer) -> Vec<String> {
    vec![
        server.ip.clone(),
        bool_label(server.reachable),
        bool_label(server.selected),
        server.server.clone(),
        vdom.to_string(),
        server.version.clone(),
    ]
}

pub async fn probe_system_ntp_status<C: FortiHttp>(
    client: &C,
    meta: Option<&TargetMetadata>,
) -> ProbeOutcome {
    let (major, minor) = MIN_VERSION;
    if !supports(meta, major, minor) {
        debug!(
            "Skipping NTP status: needs firmware {}.{}, target has {:?}",
            major, minor, meta
        );
        return ProbeOutcome::success(Vec::new());
    }

    let families: [Family<NtpServer>; 7] = [
        Family::new(&DELAY, |s: &NtpServer| s.delay),
        Family::new(&DISPERSION, |s: &NtpServer| s.dispersion),
        Family::new(&DISPERSION_PEER, |s: &NtpServer| s.peer_dispersion),
        Family::new(&EXPIRES, |s: &NtpServer| s.expires),
        Family::new(&OFFSET, |s: &NtpServer| s.offset),
        Family::new(&REFTIME, |s: &NtpServer| s.reftime),
        Family::new(&STRATUM, |s: &NtpServer| s.stratum),
    ];
    let table = ScopedTable::new(labels, &families);

    probe_with_handler(
        "system_ntp_status",
        client.get::<Vec<ApiResponse<Vec<NtpServer>>>>(PATH, "vdom=*"),
        |responses: Vec<ApiResponse<Vec<NtpServer>>>| {
            table.translate(
                responses
                    .iter()
                    .map(|r| (r.vdom.as_str(), r.results.iter())),
            )
        },
    )
    .await
}
