use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tte_agents::{
    BrowserAgent, ConsoleNotifier, EditorAgent, EventReport, NamedVault, NotesAgent, Pipeline,
    WorkspaceFolder,
};
use tte_client::{Delivery, DeliveryConfig, HttpDelivery, DEFAULT_ENDPOINT};
use tte_core::{ReportError, ReportResult, Source};

mod host;

use host::{CommandLineTab, TerminalNotifier};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(
    name = "tte-report",
    version = VERSION,
    about = "Report activity to the local time-tracking daemon the way the TTE agents do"
)]
struct Args {
    /// Daemon endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Give up on the daemon after this many milliseconds
    #[arg(long = "timeout-ms", value_name = "MS", global = true)]
    timeout_ms: Option<u64>,

    /// Wait for the daemon without any time limit
    #[arg(long = "no-timeout", action = ArgAction::SetTrue, conflicts_with = "timeout_ms", global = true)]
    no_timeout: bool,

    /// Log filter (e.g. info, debug, tte.delivery=trace)
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Print the event report as JSON on stdout
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Activate a browser tab with the given location
    Browser {
        /// Committed URL of the tab
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// URL still being navigated to
        #[arg(long = "pending-url", value_name = "URL")]
        pending_url: Option<String>,
    },

    /// Load the note-app plugin inside a vault
    Obsidian {
        /// Display name of the vault
        #[arg(long, value_name = "NAME")]
        vault: String,
    },

    /// Activate the editor extension
    Vscode {
        /// Workspace folder names, first one wins
        #[arg(long = "folder", value_name = "NAME")]
        folders: Vec<String>,
    },

    /// Print the wire message for a raw identity without sending it
    Compose {
        /// Browser, Obsidian or VSCode
        source: Source,
        /// URL (Browser) or name (Obsidian, VSCode)
        raw: String,
    },
}

impl Args {
    fn delivery_config(&self) -> DeliveryConfig {
        let timeout = if self.no_timeout {
            None
        } else {
            Some(
                self.timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(tte_client::DEFAULT_TIMEOUT),
            )
        };
        DeliveryConfig::default()
            .with_endpoint(self.endpoint.clone())
            .with_timeout(timeout)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args);
    tracing::debug!(
        build_time = tte_build_info::BUILD_TIME,
        git_label = tte_build_info::GIT_LABEL,
        "{}",
        tte_build_info::banner("tte-report", VERSION)
    );

    // The HTTP capability exists before any event is handled.
    let delivery: Arc<dyn Delivery> = Arc::new(
        HttpDelivery::new(&args.delivery_config()).context("Failed to set up daemon delivery")?,
    );

    let outcome = match args.command {
        Command::Browser { url, pending_url } => {
            let agent = BrowserAgent::new(
                delivery,
                Arc::new(CommandLineTab::new(url, pending_url)),
                Arc::new(ConsoleNotifier),
            );
            agent.on_activated(CommandLineTab::ID).await
        }
        Command::Obsidian { vault } => {
            let agent = NotesAgent::new(
                delivery,
                Arc::new(NamedVault(vault)),
                Arc::new(TerminalNotifier),
            );
            agent.on_load().await
        }
        Command::Vscode { folders } => {
            let folders: Option<Vec<WorkspaceFolder>> = (!folders.is_empty())
                .then(|| folders.into_iter().map(WorkspaceFolder::named).collect());
            let agent = EditorAgent::new(delivery, Arc::new(folders), Arc::new(TerminalNotifier));
            agent.activate().await
        }
        Command::Compose { source, raw } => {
            return compose(Pipeline::for_source(source, delivery), &raw, args.json);
        }
    };

    print_outcome(&outcome, args.json)?;
    Ok(exit_code(&outcome))
}

fn compose(pipeline: Pipeline, raw: &str, json: bool) -> Result<ExitCode> {
    match pipeline.compose(raw) {
        Ok((identity, message)) => {
            if json {
                let value = serde_json::json!({
                    "source": pipeline.source(),
                    "identity": identity,
                    "message": message,
                    "unambiguous": message.is_unambiguous(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{message}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_outcome(outcome: &ReportResult<EventReport>, json: bool) -> Result<()> {
    match (outcome, json) {
        (Ok(report), true) => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        (Ok(report), false) => {
            println!("{} {}", report.message, report.result.label());
        }
        (Err(err), true) => {
            let value = serde_json::json!({
                "skipped": true,
                "code": err.code(),
                "error": err.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        (Err(err), false) => {
            eprintln!("skipped: {err}");
        }
    }
    Ok(())
}

fn exit_code(outcome: &ReportResult<EventReport>) -> ExitCode {
    match outcome {
        Ok(report) if report.result.is_valid() => ExitCode::SUCCESS,
        Err(ReportError::EmptyIdentity) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn init_tracing(args: &Args) {
    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
