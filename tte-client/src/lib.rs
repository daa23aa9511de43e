//! TTE Client Library
//!
//! Delivers composed activity messages to the local time-tracking daemon and
//! classifies its acknowledgement. One POST per message, no retries.

pub mod config;

use std::error::Error as _;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use tte_core::{interpret, DeliveryResult, Message, TransportFailure};
use url::Url;

pub use config::{
    DeliveryConfig, DEFAULT_ENDPOINT, DEFAULT_PORT, DEFAULT_TIMEOUT, ERROR_BODY_TIMEOUT,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("http client error: {0}")]
    Build(String),
}

/// Sends one message and reports how the daemon answered.
///
/// Implementations never fail; every problem is folded into the returned
/// [`DeliveryResult`].
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, message: &Message) -> DeliveryResult;
}

/// HTTP delivery to the daemon endpoint.
#[derive(Debug, Clone)]
pub struct HttpDelivery {
    http: Client,
    endpoint: Url,
}

impl HttpDelivery {
    pub fn new(config: &DeliveryConfig) -> Result<Self, ClientError> {
        let endpoint = config.endpoint_url()?;

        // Idle connections are dropped right away: each event gets its own.
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    /// Client for the stock daemon address.
    pub fn local() -> Result<Self, ClientError> {
        Self::new(&DeliveryConfig::default())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Delivery for HttpDelivery {
    async fn deliver(&self, message: &Message) -> DeliveryResult {
        let sent = self
            .http
            .post(self.endpoint.clone())
            .body(message.as_str().to_owned())
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                let failure = transport_failure(&err);
                warn!(target: "tte.delivery", endpoint=%self.endpoint, error=%failure, "delivery failed");
                return DeliveryResult::TransportFailure(failure);
            }
        };

        let status = response.status();
        let body = if status.is_success() {
            response.text().await.map_err(|e| transport_failure(&e))
        } else {
            // A stalled error body must not hold up classification.
            match tokio::time::timeout(ERROR_BODY_TIMEOUT, response.text()).await {
                Ok(read) => read.map_err(|e| transport_failure(&e)),
                Err(_) => Err(TransportFailure::Timeout),
            }
        };
        let status = status.as_u16();
        let result = interpret(status, body);

        match &result {
            DeliveryResult::TransportFailure(TransportFailure::Status { code, body }) => {
                warn!(target: "tte.delivery", endpoint=%self.endpoint, status=%code, body=?body, "daemon answered with an error status");
            }
            other => {
                debug!(target: "tte.delivery", endpoint=%self.endpoint, status=%status, outcome=other.label(), "daemon answered");
            }
        }
        result
    }
}

fn transport_failure(err: &reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        return TransportFailure::Timeout;
    }

    let reason = error_chain(err);
    if err.is_connect() {
        TransportFailure::Connect { reason }
    } else {
        TransportFailure::Network { reason }
    }
}

/// reqwest keeps the useful part (e.g. "Connection refused") in the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_targets_the_local_daemon() {
        let client = HttpDelivery::local().unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:7138/");
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let config = DeliveryConfig::default().with_endpoint("ftp://localhost:7138");
        let err = HttpDelivery::new(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    }
}
