//! Raw host strings in, comparable identity tokens out.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use url::Url;

use crate::{ReportError, ReportResult};

const WWW_PREFIX: &str = "www.";

/// A normalized identity. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalIdentity(String);

impl CanonicalIdentity {
    pub fn new(value: impl Into<String>) -> ReportResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(ReportError::EmptyIdentity);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for CanonicalIdentity {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-host canonicalization step of the pipeline.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> ReportResult<CanonicalIdentity>;
}

/// Browser rule: URL hostname, one leading `www.` removed, lower-cased.
///
/// Multi-level domains are kept whole (`news.bbc.co.uk` stays as is).
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameNormalizer;

impl Normalizer for HostnameNormalizer {
    fn normalize(&self, raw: &str) -> ReportResult<CanonicalIdentity> {
        let url = Url::parse(raw).map_err(|err| ReportError::MalformedUrl {
            url: raw.to_string(),
            reason: err.to_string(),
        })?;

        // about:blank, data: and friends have no host at all
        let host = url.host_str().unwrap_or_default();
        let host = host.strip_prefix(WWW_PREFIX).unwrap_or(host);

        CanonicalIdentity::new(host.to_lowercase())
    }
}

/// Note-app and editor rule: the name is already the identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Normalizer for Verbatim {
    fn normalize(&self, raw: &str) -> ReportResult<CanonicalIdentity> {
        CanonicalIdentity::new(raw)
    }
}
