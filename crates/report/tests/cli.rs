use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_cmd::Command;
use axum::extract::State;
use axum::routing::post;
use axum::Router;
use predicates::prelude::*;
use tokio::runtime::Runtime;

type Received = Arc<Mutex<Vec<String>>>;

/// Daemon stub answering `VALID` to everything, kept alive by the runtime.
fn start_daemon() -> (Runtime, SocketAddr, Received) {
    let runtime = Runtime::new().unwrap();
    let received: Received = Arc::default();
    let router = Router::new()
        .route(
            "/",
            post(|State(seen): State<Received>, body: String| async move {
                seen.lock().unwrap().push(body);
                "VALID"
            }),
        )
        .with_state(received.clone());

    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    runtime.spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    (runtime, addr, received)
}

fn unreachable_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

fn tte_report() -> Command {
    let mut cmd = Command::cargo_bin("tte-report").unwrap();
    cmd.timeout(Duration::from_secs(20));
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn compose_prints_the_wire_message() {
    tte_report()
        .args(["compose", "browser", "https://WWW.Example.COM/path"])
        .assert()
        .success()
        .stdout("TTE:Browser:example.com:\n");

    tte_report()
        .args(["compose", "obsidian", "My Vault"])
        .assert()
        .success()
        .stdout("TTE:Obsidian:My Vault:\n");
}

#[test]
fn debug_log_carries_build_stamp() {
    tte_report()
        .args(["--log-level", "debug", "compose", "obsidian", "Vault"])
        .assert()
        .success()
        .stderr(predicate::str::contains("tte-report 0.1.0 | "))
        .stderr(predicate::str::contains("git_label="))
        .stderr(predicate::str::contains("build_time="));
}

#[test]
fn compose_flags_identities_the_daemon_cannot_split() {
    let output = tte_report()
        .args(["--json", "compose", "vscode", "client:server"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["message"], "TTE:VSCode:client:server:");
    assert_eq!(value["unambiguous"], false);
}

#[test]
fn compose_rejects_malformed_urls() {
    tte_report()
        .args(["compose", "browser", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed url"));
}

#[test]
fn editor_without_folders_reports_unknown() {
    let (_runtime, addr, received) = start_daemon();

    tte_report()
        .args(["--endpoint", &format!("http://{addr}"), "vscode"])
        .assert()
        .success()
        .stdout("TTE:VSCode:unknown: valid\n");

    assert_eq!(received.lock().unwrap().clone(), vec!["TTE:VSCode:unknown:"]);
}

#[test]
fn browser_report_as_json() {
    let (_runtime, addr, received) = start_daemon();

    let output = tte_report()
        .args([
            "--json",
            "--endpoint",
            &format!("http://{addr}"),
            "browser",
            "--url",
            "",
            "--pending-url",
            "http://www.Test-Site.org/page?x=1",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["source"], "Browser");
    assert_eq!(value["identity"], "test-site.org");
    assert_eq!(value["result"]["kind"], "valid");
    assert_eq!(
        received.lock().unwrap().clone(),
        vec!["TTE:Browser:test-site.org:"]
    );
}

#[test]
fn browser_without_location_sends_nothing() {
    tte_report()
        .args(["--endpoint", &unreachable_endpoint(), "browser"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped: no usable identity"));
}

#[test]
fn unreachable_daemon_is_shown_to_note_app_users() {
    tte_report()
        .args(["--endpoint", &unreachable_endpoint(), "obsidian", "--vault", "Vault"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("TTE:Obsidian:Vault: transport_failure"))
        .stderr(predicate::str::contains("error: Unable to connect to the RTT: "));
}

#[test]
fn timeout_flags_conflict() {
    tte_report()
        .args(["--timeout-ms", "100", "--no-timeout", "vscode"])
        .assert()
        .failure();
}
