//! Firmware metadata of a target, used for version gating.

use super::client::FortiHttp;
use super::types::{ApiResponse, SystemStatus};
use crate::error::Result;
use tracing::{debug, warn};

pub const SYSTEM_STATUS_PATH: &str = "api/v2/monitor/system/status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMetadata {
    pub version_major: u32,
    pub version_minor: u32,
}

impl TargetMetadata {
    pub fn new(version_major: u32, version_minor: u32) -> Self {
        Self {
            version_major,
            version_minor,
        }
    }

    /// Parses firmware strings such as `"v7.4.1"` or `"7.2"`.
    pub fn parse(version: &str) -> Option<Self> {
        let trimmed = version.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let mut parts = trimmed.split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let minor = parts.next()?.trim().parse().ok()?;
        Some(Self::new(major, minor))
    }

    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.version_major, self.version_minor) >= (major, minor)
    }
}

/// Version gate: absent metadata never satisfies a minimum.
pub fn supports(meta: Option<&TargetMetadata>, major: u32, minor: u32) -> bool {
    meta.is_some_and(|m| m.at_least(major, minor))
}

impl TargetMetadata {
    /// Firmware version carried in a system status envelope.
    pub fn from_status(status: &ApiResponse<SystemStatus>) -> Option<Self> {
        let meta = Self::parse(&status.version);
        if meta.is_none() {
            warn!("Unrecognised firmware version {:?}", status.version);
        }
        debug!("Target metadata: {:?}", meta);
        meta
    }
}

/// Reads the system status envelope, which carries the firmware version.
pub async fn fetch_status<C: FortiHttp>(client: &C) -> Result<ApiResponse<SystemStatus>> {
    client.get(SYSTEM_STATUS_PATH, "").await
}

/// Reads the firmware version from the system status endpoint.
///
/// Failures are logged and yield `None`; version-gated probes then treat
/// every gated family as unavailable.
pub async fn fetch_metadata<C: FortiHttp>(client: &C) -> Option<TargetMetadata> {
    match fetch_status(client).await {
        Ok(status) => TargetMetadata::from_status(&status),
        Err(e) => {
            warn!("Failed to read target firmware version: {}", e);
            None
        }
    }
}
