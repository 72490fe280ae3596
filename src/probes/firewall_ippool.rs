//! Firewall IP Pool Probe
//!
//! # Metrics Produced
//! - `fortigate_ippool_available_ratio` - Share of the pool still available (0 - 1.0)
//! - `fortigate_ippool_used_ips` / `fortigate_ippool_total_ips` - NAT IPs in use / total
//! - `fortigate_ippool_clients` - Clients using the pool
//! - `fortigate_ippool_used_items` / `fortigate_ippool_total_items` - Allocation items
//! - `fortigate_ippool_pba_per_ip` - Port block allocations per IP
//!
//! All labelled `vdom`, `name`.

use super::translate::{ratio, Family, ScopedTable};
use super::{probe_with_handler, ProbeOutcome};
use crate::fortigate::types::{ApiResponse, IpPool, IpPoolResults};
use crate::fortigate::{FortiHttp, TargetMetadata};
use crate::metrics::MetricDesc;

pub const PATH: &str = "api/v2/monitor/firewall/ippool";

const LABELS: &[&str] = &["vdom", "name"];

pub static AVAILABLE: MetricDesc = MetricDesc::gauge(
    "fortigate_ippool_available_ratio",
    "Percentage available in ippool (0 - 1.0)",
    LABELS,
);
pub static IP_USED: MetricDesc = MetricDesc::gauge(
    "fortigate_ippool_used_ips",
    "Ip addresses in use in ippool",
    LABELS,
);
pub static IP_TOTAL: MetricDesc = MetricDesc::gauge(
    "fortigate_ippool_total_ips",
    "Ip addresses total in ippool",
    LABELS,
);
pub static CLIENTS: MetricDesc = MetricDesc::gauge(
    "fortigate_ippool_clients",
    "Amount of clients using ippool",
    LABELS,
);
pub static USED: MetricDesc = MetricDesc::gauge(
    "fortigate_ippool_used_items",
    "Amount of items used in ippool",
    LABELS,
);
pub static TOTAL: MetricDesc = MetricDesc::gauge(
    "fortigate_ippool_total_items",
    "Amount of items total in ippool",
    LABELS,
);
pub static PBA_PER_IP: MetricDesc = MetricDesc::gauge(
    "fortigate_ippool_pba_per_ip",
    "Amount of available port block allocations per ip",
    LABELS,
);

pub async fn probe_firewall_ippool<C: FortiHttp>(
    client: &C,
    _meta: Option<&TargetMetadata>,
) -> ProbeOutcome {
    let families: [Family<IpPool>; 7] = [
        Family::new(&AVAILABLE, |p: &IpPool| ratio(p.available)),
        Family::new(&IP_USED, |p: &IpPool| p.ip_in_use as f64),
        Family::new(&IP_TOTAL, |p: &IpPool| p.ip_total as f64),
        Family::new(&CLIENTS, |p: &IpPool| p.clients as f64),
        Family::new(&USED, |p: &IpPool| p.used as f64),
        Family::new(&TOTAL, |p: &IpPool| p.total as f64),
        Family::new(&PBA_PER_IP, |p: &IpPool| p.pba_per_ip as f64),
    ];
    let table = ScopedTable::new(
        |vdom: &str, pool: &IpPool| vec![vdom.to_string(), pool.name.clone()],
        &families,
    );

    probe_with_handler(
        "firewall_ippool",
        client.get::<Vec<ApiResponse<IpPoolResults>>>(PATH, "vdom=*"),
        |responses: Vec<ApiResponse<IpPoolResults>>| {
            table.translate(
                responses
                    .iter()
                    .map(|r| (r.vdom.as_str(), r.results.values())),
            )
        },
    )
    .await
}
