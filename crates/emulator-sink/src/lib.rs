//! HTTP streaming destination clients for the pinboard activity emulator.
//!
//! Two transports are supported behind the single [`Sink`] capability:
//!
//! - [`RestProxySink`] - a Kafka REST proxy (`POST /topics/<topic>` with the
//!   `records` envelope)
//! - [`ApiGatewaySink`] - a managed-stream gateway in front of a Kinesis-style
//!   service (`PUT /streams/<stream>/record` with the `StreamName`/`Data`/
//!   `PartitionKey` envelope)
//!
//! Neither variant retries or buffers: one invocation is exactly one network
//! call, and any non-200 status or transport failure surfaces as a
//! [`DispatchError`] for the caller to log and move past.

pub mod gateway;
pub mod proxy;

use async_trait::async_trait;
use thiserror::Error;

pub use gateway::{ApiGatewaySink, DEFAULT_PARTITION_KEY};
pub use proxy::RestProxySink;

/// Error from one dispatch attempt. Always non-fatal to the emulation loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The envelope could not be encoded as JSON.
    #[error("failed to encode envelope for '{destination}': {source}")]
    Encode {
        /// Stream or topic name.
        destination: String,
        /// Underlying encoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The endpoint answered with a status other than 200.
    #[error("destination '{destination}' rejected record ({payload_bytes} byte payload): {status}: {body}")]
    Rejected {
        /// Stream or topic name.
        destination: String,
        /// HTTP status returned by the endpoint.
        status: reqwest::StatusCode,
        /// Response body, for the logs.
        body: String,
        /// Size of the serialized envelope.
        payload_bytes: usize,
    },

    /// Connection refused, timeout, or another transport-level failure.
    #[error("transport error sending to '{destination}' ({payload_bytes} byte payload): {source}")]
    Transport {
        /// Stream or topic name.
        destination: String,
        /// Size of the serialized envelope.
        payload_bytes: usize,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
}

/// One HTTP-reachable streaming endpoint that accepts one record per call.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Short transport name for logging (`rest-proxy`, `api-gateway`).
    fn transport(&self) -> &'static str;

    /// Attempt one delivery of one serialized record to `destination`.
    ///
    /// Performs exactly one outbound call; never retries and never panics.
    async fn send(
        &self,
        destination: &str,
        record: &serde_json::Value,
    ) -> Result<(), DispatchError>;
}

/// HTTP client with the timeout both sink variants share.
pub(crate) fn http_client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?)
}
