//! FortiGate API Type Definitions
//!
//! Response shapes for the monitoring endpoints the probes query.
//!
//! # Design Notes
//!
//! - **Envelope**: every monitor endpoint wraps its payload in the same
//!   envelope ([`ApiResponse`]) carrying `results`, `vdom`, `serial`,
//!   `version` and `build`. Queries with `vdom=*` return a JSON array of
//!   envelopes, one per VDOM.
//! - **Permissive decoding**: every struct is `#[serde(default)]` and every
//!   scalar goes through a [`lenient`](super::lenient) decoder, so missing or
//!   drifted fields become zero values instead of decode failures.
//! - **Unknown fields** are ignored (serde's default behaviour).
//!
//! # API Endpoints Covered
//!
//! - `monitor/firewall/ippool` → [`IpPool`]
//! - `monitor/system/interface/transceivers` → [`Transceiver`]
//! - `monitor/system/ntp/status` → [`NtpServer`]
//! - `monitor/system/resource/usage` → [`ResourceUsage`]
//! - `monitor/system/status` → [`SystemStatus`]

use super::lenient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Common envelope of a monitor API response
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, bound(deserialize = "R: DeserializeOwned + Default"))]
pub struct ApiResponse<R> {
    #[serde(deserialize_with = "lenient::results")]
    pub results: R,
    #[serde(deserialize_with = "lenient::string")]
    pub vdom: String,
    #[serde(deserialize_with = "lenient::string")]
    pub serial: String,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub build: String,
}

/// Firewall IP pool usage, keyed by pool name in the response
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct IpPool {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "natip_total", deserialize_with = "lenient::int")]
    pub ip_total: i64,
    #[serde(rename = "natip_in_use", deserialize_with = "lenient::int")]
    pub ip_in_use: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub clients: i64,
    /// Percentage, 0-100
    #[serde(deserialize_with = "lenient::float")]
    pub available: f64,
    #[serde(deserialize_with = "lenient::int")]
    pub used: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub total: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub pba_per_ip: i64,
}

pub type IpPoolResults = HashMap<String, IpPool>;

/// Optical transceiver plugged into an interface
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Transceiver {
    #[serde(deserialize_with = "lenient::string")]
    pub interface: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub vendor: String,
    #[serde(deserialize_with = "lenient::string")]
    pub vendor_part_number: String,
    #[serde(deserialize_with = "lenient::string")]
    pub vendor_serial_number: String,
}

/// One configured NTP server as seen by the appliance.
///
/// Populated from firmware 7.4 onwards.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NtpServer {
    #[serde(deserialize_with = "lenient::string")]
    pub ip: String,
    #[serde(deserialize_with = "lenient::string")]
    pub server: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub reachable: bool,
    #[serde(deserialize_with = "lenient::boolean")]
    pub selected: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(deserialize_with = "lenient::float")]
    pub stratum: f64,
    /// Epoch seconds
    #[serde(deserialize_with = "lenient::float")]
    pub reftime: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub offset: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub delay: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub dispersion: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub peer_dispersion: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub expires: f64,
}

/// Sample of a resource counter; `current` is the latest value
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ResourceSample {
    #[serde(deserialize_with = "lenient::float")]
    pub current: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ResourceUsage {
    #[serde(deserialize_with = "lenient::results")]
    pub cpu: Vec<ResourceSample>,
    #[serde(deserialize_with = "lenient::results")]
    pub mem: Vec<ResourceSample>,
    #[serde(deserialize_with = "lenient::results")]
    pub session: Vec<ResourceSample>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SystemStatus {
    #[serde(deserialize_with = "lenient::string")]
    pub model_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub model_number: String,
    #[serde(deserialize_with = "lenient::string")]
    pub model: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hostname: String,
}
