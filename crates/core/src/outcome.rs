//! Classification of the daemon's acknowledgement.

use serde::Serialize;
use thiserror::Error;

use crate::wire::ACK_VALID;
use crate::{ReportError, ReportResult};

/// The request did not produce a usable success response.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportFailure {
    /// A response arrived with a non-success status. `body` is whatever could
    /// be read from it and is only kept for logging.
    #[error("HTTP status {code}")]
    Status { code: u16, body: Option<String> },

    #[error("could not connect: {reason}")]
    Connect { reason: String },

    #[error("request timed out")]
    Timeout,

    #[error("{reason}")]
    Network { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DeliveryResult {
    Valid,
    Invalid(String),
    TransportFailure(TransportFailure),
}

impl DeliveryResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, DeliveryResult::Valid)
    }

    /// Short label for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryResult::Valid => "valid",
            DeliveryResult::Invalid(_) => "invalid",
            DeliveryResult::TransportFailure(_) => "transport_failure",
        }
    }

    pub fn into_result(self) -> ReportResult<()> {
        match self {
            DeliveryResult::Valid => Ok(()),
            DeliveryResult::Invalid(body) => Err(ReportError::ProtocolRejection(body)),
            DeliveryResult::TransportFailure(failure) => Err(ReportError::TransportFailure(failure)),
        }
    }
}

impl From<TransportFailure> for DeliveryResult {
    fn from(failure: TransportFailure) -> Self {
        DeliveryResult::TransportFailure(failure)
    }
}

/// Classify a received response.
///
/// `body` is the outcome of reading the response text. On a non-success
/// status a read failure is ignored; on success it is a transport failure.
pub fn interpret(status: u16, body: Result<String, TransportFailure>) -> DeliveryResult {
    if !(200..300).contains(&status) {
        return DeliveryResult::TransportFailure(TransportFailure::Status {
            code: status,
            body: body.ok(),
        });
    }

    match body {
        Ok(text) if text == ACK_VALID => DeliveryResult::Valid,
        Ok(text) => DeliveryResult::Invalid(text),
        Err(failure) => DeliveryResult::TransportFailure(failure),
    }
}
