use std::env;
use std::path::Path;
use std::process::Command;

use chrono::Utc;

fn main() {
    println!("cargo:rerun-if-env-changed=TTE_BUILD_ID_OVERRIDE");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let git_label = git_describe().unwrap_or_else(|| "unknown".to_string());
    let build_id = env::var("TTE_BUILD_ID_OVERRIDE")
        .unwrap_or_else(|_| format!("{build_time} | {git_label}"));

    println!("cargo:rustc-env=TTE_BUILD_ID={build_id}");
    println!("cargo:rustc-env=TTE_BUILD_TIME={build_time}");
    println!("cargo:rustc-env=TTE_BUILD_GIT={git_label}");
}

fn git_describe() -> Option<String> {
    if !Path::new(".git").exists() && !Path::new("../../.git").exists() {
        return None;
    }

    let output = Command::new("git")
        .args(["describe", "--tags", "--dirty", "--always"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let label = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!label.is_empty()).then_some(label)
}
