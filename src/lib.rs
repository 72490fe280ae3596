//! FortiGate Prometheus Exporter
//!
//! A Prometheus metrics exporter for FortiGate appliances running FortiOS.
//!
//! # Overview
//!
//! The exporter queries the FortiOS monitoring REST API on demand: each request
//! to `/probe?target=<url>` runs a set of probes against that appliance and
//! returns the results in Prometheus text format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      HTTPS GET       ┌──────────────┐
//! │  FortiGate  │ ◄─────────────────►  │   Exporter   │
//! │  REST API   │   JSON responses     │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Probes │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │    /probe      └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Metrics │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`fortigate`] - REST client, response types and firmware metadata
//! - [`probes`] - One fetch-and-translate function per endpoint
//! - [`metrics`] - Metric descriptors, observations and text exposition
//! - [`server`] - HTTP server and scrape handling
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use fortigate_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fortigate;
pub mod metrics;
pub mod probes;
pub mod server;
