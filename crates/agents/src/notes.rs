//! Note-app agent: reports the vault name once, when the plugin loads.

use std::sync::Arc;

use tte_client::Delivery;
use tte_core::{DeliveryResult, ReportResult, Source};

use crate::notifier::{HostNotifier, Severity};
use crate::pipeline::{EventReport, Pipeline};

/// Host access to the open vault.
pub trait Vault: Send + Sync {
    fn name(&self) -> String;
}

/// A vault known only by its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedVault(pub String);

impl Vault for NamedVault {
    fn name(&self) -> String {
        self.0.clone()
    }
}

pub struct NotesAgent {
    pipeline: Pipeline,
    vault: Arc<dyn Vault>,
    notices: Arc<dyn HostNotifier>,
}

impl NotesAgent {
    pub fn new(
        delivery: Arc<dyn Delivery>,
        vault: Arc<dyn Vault>,
        notices: Arc<dyn HostNotifier>,
    ) -> Self {
        Self {
            pipeline: Pipeline::for_source(Source::Obsidian, delivery),
            vault,
            notices,
        }
    }

    pub async fn on_load(&self) -> ReportResult<EventReport> {
        let vault_name = self.vault.name();
        let report = match self.pipeline.run(&vault_name).await {
            Ok(report) => report,
            Err(err) => {
                // Only the browser skips silently; here every miss is shown.
                self.notices.notify(
                    &format!("Unable to connect to the RTT: {err}"),
                    Severity::Error,
                );
                return Err(err);
            }
        };

        match &report.result {
            DeliveryResult::Valid => self.notices.notify(
                &format!("Successfully connected to the RTT: {vault_name}"),
                Severity::Info,
            ),
            DeliveryResult::Invalid(body) => self.notices.notify(
                &format!("Unable to connect to the RTT: Invalid response '{body}'"),
                Severity::Error,
            ),
            DeliveryResult::TransportFailure(failure) => self.notices.notify(
                &format!("Unable to connect to the RTT: {failure}"),
                Severity::Error,
            ),
        }
        Ok(report)
    }
}
