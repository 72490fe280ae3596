pub mod client;
pub mod lenient;
pub mod metadata;
pub mod types;

pub use client::{build_http_client, FortiHttp, FortigateClient};
pub use metadata::TargetMetadata;
