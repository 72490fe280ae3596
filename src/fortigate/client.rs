//! FortiGate REST API Client
//!
//! # Architecture
//!
//! - **Transport**: HTTPS `GET` against `<target>/api/v2/monitor/...`
//! - **Authentication**: REST API admin token sent as a bearer token
//! - **Decoding**: JSON body decoded straight into the caller's response type
//!
//! Probes only depend on the [`FortiHttp`] trait, so tests can swap in an
//! in-memory transport.
//!
//! # Example
//!
//! ```no_run
//! use fortigate_exporter::config::FortigateConfig;
//! use fortigate_exporter::fortigate::{build_http_client, FortiHttp, FortigateClient};
//! use fortigate_exporter::fortigate::types::{ApiResponse, SystemStatus};
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let http = build_http_client(&FortigateConfig::default())?;
//! let client = FortigateClient::new(
//!     http,
//!     "https://fortigate.local",
//!     SecretString::from("api-token"),
//! );
//! let status: ApiResponse<SystemStatus> = client.get("api/v2/monitor/system/status", "").await?;
//! # Ok(())
//! # }
//! ```

use crate::config::FortigateConfig;
use crate::error::{ExporterError, Result};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Authenticated access to one appliance's REST API
pub trait FortiHttp: Send + Sync {
    /// `GET <path>?<query>` and decode the JSON body into `T`.
    ///
    /// `query` is appended verbatim (e.g. `"vdom=*"`); an empty query adds
    /// nothing to the URL.
    fn get<T>(&self, path: &str, query: &str) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send;
}

/// Builds the HTTP client shared by all targets.
///
/// With `verify_ssl = false` a TLS connector that accepts self-signed
/// certificates and mismatching hostnames is installed.
pub fn build_http_client(config: &FortigateConfig) -> Result<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_seconds));

    if !config.verify_ssl {
        let connector = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()?;
        builder = builder.use_preconfigured_tls(connector);
    }

    builder.build().map_err(ExporterError::Http)
}

/// Client for a single FortiGate appliance
pub struct FortigateClient {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl FortigateClient {
    pub fn new(http: reqwest::Client, base_url: &str, token: SecretString) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for an endpoint path and literal query string
    pub fn endpoint_url(&self, path: &str, query: &str) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

impl FortiHttp for FortigateClient {
    async fn get<T>(&self, path: &str, query: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint_url(path, query);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExporterError::Auth(format!(
                "{} rejected the API token (HTTP {})",
                self.base_url, status
            )));
        }
        if !status.is_success() {
            return Err(ExporterError::Api(format!(
                "{} returned HTTP {}",
                path, status
            )));
        }

        let body = response.bytes().await?;
        debug!("{} response received ({} bytes)", path, body.len());
        serde_json::from_slice(&body).map_err(ExporterError::Json)
    }
}
