//! Editor agent: reports the open workspace when the extension activates.

use std::sync::Arc;

use serde::Deserialize;
use tte_client::Delivery;
use tte_core::{DeliveryResult, ReportResult, Source};

use crate::notifier::{HostNotifier, Severity};
use crate::pipeline::{EventReport, Pipeline};

/// Identity reported when no workspace folder is open.
pub const UNKNOWN_WORKSPACE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkspaceFolder {
    pub name: String,
}

impl WorkspaceFolder {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Host access to the editor workspace. `None` when no workspace is open.
pub trait Workspace: Send + Sync {
    fn folders(&self) -> Option<Vec<WorkspaceFolder>>;
}

impl Workspace for Option<Vec<WorkspaceFolder>> {
    fn folders(&self) -> Option<Vec<WorkspaceFolder>> {
        self.clone()
    }
}

/// Name of the first workspace folder, or [`UNKNOWN_WORKSPACE`].
pub fn extract(folders: Option<&[WorkspaceFolder]>) -> &str {
    folders
        .and_then(|folders| folders.first())
        .map(|folder| folder.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_WORKSPACE)
}

pub struct EditorAgent {
    pipeline: Pipeline,
    workspace: Arc<dyn Workspace>,
    messages: Arc<dyn HostNotifier>,
}

impl EditorAgent {
    pub fn new(
        delivery: Arc<dyn Delivery>,
        workspace: Arc<dyn Workspace>,
        messages: Arc<dyn HostNotifier>,
    ) -> Self {
        Self {
            pipeline: Pipeline::for_source(Source::VSCode, delivery),
            workspace,
            messages,
        }
    }

    pub async fn activate(&self) -> ReportResult<EventReport> {
        let folders = self.workspace.folders();
        let name = extract(folders.as_deref());
        let report = self.pipeline.run(name).await?;

        match &report.result {
            DeliveryResult::Valid => {}
            DeliveryResult::Invalid(body) => self.messages.notify(
                &format!("The RTT rejected workspace '{name}': '{body}'"),
                Severity::Error,
            ),
            DeliveryResult::TransportFailure(_) => {
                self.messages.notify("Unable to connect to the RTT", Severity::Error)
            }
        }
        Ok(report)
    }
}
