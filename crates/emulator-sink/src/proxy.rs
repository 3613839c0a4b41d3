//! Kafka REST proxy destination client.

use crate::{http_client, DispatchError, Sink};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

/// Content type declaring the REST-proxy JSON protocol.
const KAFKA_JSON_V2: &str = "application/vnd.kafka.json.v2+json";

#[derive(Serialize)]
struct ProxyEnvelope<'a> {
    records: Vec<ProxyRecord<'a>>,
}

#[derive(Serialize)]
struct ProxyRecord<'a> {
    value: &'a serde_json::Value,
}

/// Destination client for a Kafka REST proxy.
///
/// Posts `{"records": [{"value": <record>}]}` to `<base>/topics/<topic>` and
/// deems the send successful iff the proxy answers 200.
pub struct RestProxySink {
    client: reqwest::Client,
    base_url: String,
}

impl RestProxySink {
    /// Create a client for the proxy at `base_url`, e.g. `http://host:8082`.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn topic_url(&self, topic: &str) -> String {
        format!("{}/topics/{}", self.base_url, topic)
    }
}

fn envelope_json(
    destination: &str,
    record: &serde_json::Value,
) -> Result<String, DispatchError> {
    let envelope = ProxyEnvelope {
        records: vec![ProxyRecord { value: record }],
    };
    serde_json::to_string(&envelope).map_err(|source| DispatchError::Encode {
        destination: destination.to_string(),
        source,
    })
}

#[async_trait]
impl Sink for RestProxySink {
    fn transport(&self) -> &'static str {
        "rest-proxy"
    }

    async fn send(
        &self,
        destination: &str,
        record: &serde_json::Value,
    ) -> Result<(), DispatchError> {
        let body = envelope_json(destination, record)?;
        let payload_bytes = body.len();
        let url = self.topic_url(destination);

        tracing::debug!(%url, payload_bytes, "posting record to REST proxy");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, KAFKA_JSON_V2)
            .body(body)
            .send()
            .await
            .map_err(|source| DispatchError::Transport {
                destination: destination.to_string(),
                payload_bytes,
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected {
                destination: destination.to_string(),
                status,
                body,
                payload_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let record = serde_json::json!({"id": 7, "created_at": "2024-01-01T00:00:00"});
        let body = envelope_json("demo.pin", &record).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({"records": [{"value": {"id": 7, "created_at": "2024-01-01T00:00:00"}}]})
        );
    }

    #[test]
    fn test_topic_url_strips_trailing_slash() {
        let sink = RestProxySink::new("http://localhost:8082/").unwrap();
        assert_eq!(
            sink.topic_url("demo.pin"),
            "http://localhost:8082/topics/demo.pin"
        );
    }
}
