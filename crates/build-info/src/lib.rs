//! Build stamp baked in by `build.rs`, shown in `--version` output and logs.

const fn or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "unknown",
    }
}

/// Full build id, e.g. "2026-03-02 09:14:55 UTC | v0.3.0-4-g1c2d3e4".
pub const BUILD_ID: &str = or_unknown(option_env!("TTE_BUILD_ID"));

/// UTC time of the build.
pub const BUILD_TIME: &str = or_unknown(option_env!("TTE_BUILD_TIME"));

/// `git describe` of the tree that was built.
pub const GIT_LABEL: &str = or_unknown(option_env!("TTE_BUILD_GIT"));

/// One-line banner for a binary.
pub fn banner(binary: &str, version: &str) -> String {
    format!("{binary} {version} | {BUILD_ID}")
}
