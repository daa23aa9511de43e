//! The terminal as an agent host: a fixed tab table and a stderr notice sink.

use async_trait::async_trait;
use tte_agents::{HostNotifier, Severity, Tab, TabId, TabLookup};

/// The single tab described on the command line.
pub struct CommandLineTab {
    tab: Tab,
}

impl CommandLineTab {
    pub const ID: TabId = 0;

    pub fn new(url: Option<String>, pending_url: Option<String>) -> Self {
        Self {
            tab: Tab {
                id: Some(Self::ID),
                url,
                pending_url,
            },
        }
    }
}

#[async_trait]
impl TabLookup for CommandLineTab {
    async fn get(&self, tab_id: TabId) -> Option<Tab> {
        (tab_id == Self::ID).then(|| self.tab.clone())
    }
}

/// Notices a user sees on a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl HostNotifier for TerminalNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => eprintln!("{message}"),
            Severity::Error => eprintln!("error: {message}"),
        }
    }
}
