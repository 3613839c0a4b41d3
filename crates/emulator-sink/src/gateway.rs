//! Managed-stream gateway destination client.

use crate::{http_client, DispatchError, Sink};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

/// Partition key sent when the configuration does not name one.
pub const DEFAULT_PARTITION_KEY: &str = "partition-key";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GatewayEnvelope<'a> {
    stream_name: &'a str,
    data: &'a serde_json::Value,
    partition_key: &'a str,
}

/// Destination client for a Kinesis-style stream behind an HTTP gateway.
///
/// Puts `{"StreamName": .., "Data": .., "PartitionKey": ..}` to
/// `<base>/streams/<stream>/record` and deems the send successful iff the
/// gateway answers 200. The envelope and the raw response are logged at debug
/// level around the call.
pub struct ApiGatewaySink {
    client: reqwest::Client,
    base_url: String,
    partition_key: String,
}

impl ApiGatewaySink {
    /// Create a client for the gateway stage at `base_url`, e.g.
    /// `https://host/dev`.
    pub fn new(base_url: impl Into<String>, partition_key: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            partition_key: partition_key.into(),
        })
    }

    fn record_url(&self, stream: &str) -> String {
        format!("{}/streams/{}/record", self.base_url, stream)
    }

    fn envelope_json(
        &self,
        destination: &str,
        record: &serde_json::Value,
    ) -> Result<String, DispatchError> {
        let envelope = GatewayEnvelope {
            stream_name: destination,
            data: record,
            partition_key: &self.partition_key,
        };
        serde_json::to_string(&envelope).map_err(|source| DispatchError::Encode {
            destination: destination.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Sink for ApiGatewaySink {
    fn transport(&self) -> &'static str {
        "api-gateway"
    }

    async fn send(
        &self,
        destination: &str,
        record: &serde_json::Value,
    ) -> Result<(), DispatchError> {
        let body = self.envelope_json(destination, record)?;
        let payload_bytes = body.len();
        let url = self.record_url(destination);

        tracing::debug!(%url, envelope = %body, "putting record to stream gateway");

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| DispatchError::Transport {
                destination: destination.to_string(),
                payload_bytes,
                source,
            })?;

        let status = response.status();
        let response_body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %response_body, "stream gateway response");

        if status != StatusCode::OK {
            return Err(DispatchError::Rejected {
                destination: destination.to_string(),
                status,
                body: response_body,
                payload_bytes,
            });
        }
        Ok(())
    }
}
