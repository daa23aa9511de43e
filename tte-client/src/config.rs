use std::time::Duration;

use url::Url;

use crate::ClientError;

/// Port the time-tracking daemon listens on ('R' + 'T' * 'T').
pub const DEFAULT_PORT: u16 = 7138;
pub const DEFAULT_ENDPOINT: &str = "http://localhost:7138/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// How long the body of an error response is waited for. It is only logged.
pub const ERROR_BODY_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub endpoint: String,
    /// Upper bound on one request. `None` waits as long as the OS allows.
    pub timeout: Option<Duration>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl DeliveryConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn endpoint_url(&self) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let url = Url::parse(self.endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{other}'"))),
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        Ok(url)
    }
}
