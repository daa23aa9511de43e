//! Browser agent: reports the hostname of the tab the user is looking at.
//!
//! Outcomes only go to the developer console; the browser has no
//! user-facing surface for them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use tte_client::Delivery;
use tte_core::{DeliveryResult, ReportError, ReportResult, Source, TransportFailure};

use crate::notifier::{HostNotifier, Severity};
use crate::pipeline::{EventReport, Pipeline};

pub type TabId = i32;

/// The subset of a browser tab the agent reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default)]
    pub id: Option<TabId>,
    #[serde(default)]
    pub url: Option<String>,
    /// Set while a navigation is committing and `url` is still empty.
    #[serde(default)]
    pub pending_url: Option<String>,
}

/// Properties of a tab that changed in an update event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangeInfo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Host lookup of a tab by id.
#[async_trait]
pub trait TabLookup: Send + Sync {
    async fn get(&self, tab_id: TabId) -> Option<Tab>;
}

/// The raw location of a tab: `url`, or `pending_url` when `url` is empty.
pub fn extract(tab: &Tab) -> Option<&str> {
    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|s| !s.is_empty())
    }
    non_empty(&tab.url).or_else(|| non_empty(&tab.pending_url))
}

pub struct BrowserAgent {
    pipeline: Pipeline,
    tabs: Arc<dyn TabLookup>,
    console: Arc<dyn HostNotifier>,
}

impl BrowserAgent {
    pub fn new(
        delivery: Arc<dyn Delivery>,
        tabs: Arc<dyn TabLookup>,
        console: Arc<dyn HostNotifier>,
    ) -> Self {
        Self {
            pipeline: Pipeline::for_source(Source::Browser, delivery),
            tabs,
            console,
        }
    }

    /// A tab became the active one.
    pub async fn on_activated(&self, tab_id: TabId) -> ReportResult<EventReport> {
        let Some(tab) = self.tabs.get(tab_id).await else {
            debug!(target: "tte.browser", tab_id, "activated tab is gone");
            return Err(ReportError::EmptyIdentity);
        };
        self.handle_tab(&tab).await
    }

    /// A tab changed. Returns `None` when the change did not touch its URL.
    pub async fn on_updated(
        &self,
        tab_id: TabId,
        change: &ChangeInfo,
        tab: &Tab,
    ) -> Option<ReportResult<EventReport>> {
        if change.url.is_none() {
            debug!(target: "tte.browser", tab_id, status=?change.status, "update without url change");
            return None;
        }
        Some(self.handle_tab(tab).await)
    }

    async fn handle_tab(&self, tab: &Tab) -> ReportResult<EventReport> {
        let Some(raw) = extract(tab) else {
            debug!(target: "tte.browser", tab_id=?tab.id, "tab has neither url nor pending url");
            return Err(ReportError::EmptyIdentity);
        };

        let report = self.pipeline.run(raw).await?;
        self.log_outcome(&report.result);
        Ok(report)
    }

    fn log_outcome(&self, result: &DeliveryResult) {
        match result {
            DeliveryResult::Valid => self.console.notify("Valid", Severity::Info),
            DeliveryResult::Invalid(body) => {
                self.console.notify(&format!("Error: {body}"), Severity::Error)
            }
            DeliveryResult::TransportFailure(TransportFailure::Status { code, body }) => {
                self.console.notify(&format!("Error: {code}"), Severity::Error);
                if let Some(body) = body.as_deref().filter(|b| !b.is_empty()) {
                    self.console.notify(&format!("Error: {body}"), Severity::Error);
                }
            }
            DeliveryResult::TransportFailure(failure) => {
                self.console.notify(&format!("Error: {failure}"), Severity::Error)
            }
        }
    }
}
