//! The shared per-event path: normalize, compose, deliver, classify.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use tte_client::Delivery;
use tte_core::{
    CanonicalIdentity, DeliveryResult, HostnameNormalizer, Message, Normalizer, ReportError,
    ReportResult, Source, Verbatim,
};
use uuid::Uuid;

/// What happened to one event that made it onto the wire.
#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    pub trace_id: Uuid,
    pub source: Source,
    pub identity: CanonicalIdentity,
    pub message: Message,
    pub result: DeliveryResult,
}

impl EventReport {
    /// The outcome in terms of the error taxonomy.
    pub fn outcome(&self) -> ReportResult<()> {
        self.result.clone().into_result()
    }
}

/// One pipeline per agent. Holds no per-event state, so a single instance
/// serves any number of concurrent events.
#[derive(Clone)]
pub struct Pipeline {
    source: Source,
    normalizer: Arc<dyn Normalizer>,
    delivery: Arc<dyn Delivery>,
}

impl Pipeline {
    pub fn new(
        source: Source,
        normalizer: Arc<dyn Normalizer>,
        delivery: Arc<dyn Delivery>,
    ) -> Self {
        Self {
            source,
            normalizer,
            delivery,
        }
    }

    /// Pipeline with the stock normalizer of `source`: hostnames for the
    /// browser, names taken as-is for everything else.
    pub fn for_source(source: Source, delivery: Arc<dyn Delivery>) -> Self {
        let normalizer: Arc<dyn Normalizer> = match source {
            Source::Browser => Arc::new(HostnameNormalizer),
            Source::Obsidian | Source::VSCode => Arc::new(Verbatim),
        };
        Self::new(source, normalizer, delivery)
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Normalize and compose without sending.
    pub fn compose(&self, raw: &str) -> ReportResult<(CanonicalIdentity, Message)> {
        if raw.is_empty() {
            return Err(ReportError::EmptyIdentity);
        }
        let identity = self.normalizer.normalize(raw)?;
        let message = Message::compose(self.source, &identity);
        Ok((identity, message))
    }

    /// Run one event through the whole pipeline.
    ///
    /// `Err` means nothing was sent. Delivery problems are not errors here:
    /// they are carried in [`EventReport::result`].
    pub async fn run(&self, raw: &str) -> ReportResult<EventReport> {
        let trace_id = Uuid::new_v4();
        let source = self.source;

        let (identity, message) = match self.compose(raw) {
            Ok(composed) => composed,
            Err(err @ ReportError::EmptyIdentity) => {
                debug!(target: "tte.pipeline", %trace_id, %source, "empty identity, nothing to report");
                return Err(err);
            }
            Err(err) => {
                warn!(target: "tte.pipeline", %trace_id, %source, raw=%raw, error=%err, code=err.code(), "event skipped");
                return Err(err);
            }
        };

        if !message.is_unambiguous() {
            warn!(target: "tte.pipeline", %trace_id, %source, identity=%identity, "identity contains ':', the daemon cannot split this message");
        }
        debug!(target: "tte.pipeline", %trace_id, %source, message=%message, "sending");

        let result = self.delivery.deliver(&message).await;
        info!(target: "tte.pipeline", %trace_id, %source, identity=%identity, outcome=result.label(), "event reported");

        Ok(EventReport {
            trace_id,
            source,
            identity,
            message,
            result,
        })
    }
}
