use thiserror::Error;

use crate::outcome::TransportFailure;

pub type ReportResult<T> = Result<T, ReportError>;

/// Why an event did not end in a `VALID` acknowledgement.
///
/// The first two variants stop the pipeline before anything is sent; the
/// last two describe a delivery that happened but was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no usable identity")]
    EmptyIdentity,

    #[error("malformed url '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("transport failure: {0}")]
    TransportFailure(TransportFailure),

    #[error("daemon reachable but rejected the identity: '{0}'")]
    ProtocolRejection(String),
}

impl ReportError {
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::EmptyIdentity => "EMPTY_IDENTITY",
            ReportError::MalformedUrl { .. } => "MALFORMED_URL",
            ReportError::TransportFailure(_) => "TRANSPORT_FAILURE",
            ReportError::ProtocolRejection(_) => "PROTOCOL_REJECTION",
        }
    }

    /// True when the error was raised before any request left the agent.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ReportError::EmptyIdentity | ReportError::MalformedUrl { .. }
        )
    }
}

impl From<TransportFailure> for ReportError {
    fn from(failure: TransportFailure) -> Self {
        ReportError::TransportFailure(failure)
    }
}
