//! TTE activity agents
//!
//! Three host adapters (browser, note-app, code editor) around one shared
//! pipeline. Each adapter pulls a raw identity out of its host, runs it
//! through the pipeline and tells the user about the outcome in the way its
//! host does.
//!
//! The delivery capability is handed in at construction, so an agent is
//! ready to report before the host registers any of its event handlers.

pub mod browser;
pub mod editor;
pub mod notes;
pub mod notifier;
pub mod pipeline;

pub use browser::{BrowserAgent, ChangeInfo, Tab, TabId, TabLookup};
pub use editor::{EditorAgent, Workspace, WorkspaceFolder, UNKNOWN_WORKSPACE};
pub use notes::{NamedVault, NotesAgent, Vault};
pub use notifier::{BufferedNotifier, ConsoleNotifier, HostNotifier, Notice, Severity};
pub use pipeline::{EventReport, Pipeline};
