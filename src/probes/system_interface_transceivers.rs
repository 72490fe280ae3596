//! Interface Transceivers Probe
//!
//! # Metrics Produced
//! - `fortigate_inteface_transceivers_info` - Always 1, one series per plugged transceiver
//!   - Labels: interface, type, vendor, vendorpartnumber, vendorserialnumber
//!
//! The metric name keeps its historical spelling so existing dashboards match.

use super::translate::{Family, ScopedTable};
use super::{probe_with_handler, ProbeOutcome};
use crate::fortigate::types::{ApiResponse, Transceiver};
use crate::fortigate::{FortiHttp, TargetMetadata};
use crate::metrics::MetricDesc;

pub const PATH: &str = "api/v2/monitor/system/interface/transceivers";

pub static INFO: MetricDesc = MetricDesc::gauge(
    "fortigate_inteface_transceivers_info",
    "Interface transceivers information",
    &[
        "interface",
        "type",
        "vendor",
        "vendorpartnumber",
        "vendorserialnumber",
    ],
);

fn labels(_scope: &str, t: &Transceiver) -> Vec<String> {
    vec![
        t.interface.clone(),
        t.kind.clone(),
        t.vendor.clone(),
        t.vendor_part_number.clone(),
        t.vendor_serial_number.clone(),
    ]
}

pub async fn probe_system_interface_transceivers<C: FortiHttp>(
    client: &C,
    _meta: Option<&TargetMetadata>,
) -> ProbeOutcome {
    let families: [Family<Transceiver>; 1] = [Family::new(&INFO, |_: &Transceiver| 1.0)];
    let table = ScopedTable::new(labels, &families);

    probe_with_handler(
        "system_interface_transceivers",
        client.get::<ApiResponse<Vec<Transceiver>>>(PATH, ""),
        |response: ApiResponse<Vec<Transceiver>>| {
            table.translate([(response.vdom.as_str(), response.results.iter())])
        },
    )
    .await
}
