use std::sync::Mutex;

use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// The host's way of telling the user something (console line, toast,
/// editor error popup).
pub trait HostNotifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Developer-console sink: notices only go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl HostNotifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => info!(target: "tte.console", "{message}"),
            Severity::Error => error!(target: "tte.console", "{message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

/// Keeps notices until the host drains them into its own UI.
#[derive(Debug, Default)]
pub struct BufferedNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl BufferedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(notices) => notices.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl HostNotifier for BufferedNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let notice = Notice {
            message: message.to_string(),
            severity,
        };
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
