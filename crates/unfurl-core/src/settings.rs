//! Per-request backend origin resolution.
//!
//! The catalog backend may live on a dedicated host, on the platform
//! deployment URL, or behind the same host that received the preview request.
//! Which one applies is decided on every request from a [`SettingsSource`],
//! never from hidden global lookups inside the fetcher.

use std::collections::HashMap;

/// Explicit application backend URL shared with the frontend build.
pub const APP_BACKEND_URL: &str = "REACT_APP_BACKEND_URL";
/// Generic backend URL.
pub const BACKEND_URL: &str = "BACKEND_URL";
/// Scheme-less deployment host provided by the hosting platform.
pub const DEPLOYMENT_URL: &str = "VERCEL_URL";
/// Last-resort origin for local development.
pub const LOCAL_DEV_ORIGIN: &str = "http://localhost:8001";

/// Read-only key-value provider for settings that may change between requests.
pub trait SettingsSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads settings from the process environment at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Which rung of the precedence chain produced the backend origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginSource {
    AppBackendUrl,
    BackendUrl,
    DeploymentUrl,
    RequestHost,
    LocalDevelopment,
}

impl OriginSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OriginSource::AppBackendUrl => "app_backend_url",
            OriginSource::BackendUrl => "backend_url",
            OriginSource::DeploymentUrl => "deployment_url",
            OriginSource::RequestHost => "request_host",
            OriginSource::LocalDevelopment => "local_development",
        }
    }
}

impl std::fmt::Display for OriginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved backend origin, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOrigin {
    pub url: String,
    pub source: OriginSource,
}

/// Resolves the catalog backend origin.
///
/// Precedence, first non-blank wins: [`APP_BACKEND_URL`], [`BACKEND_URL`],
/// [`DEPLOYMENT_URL`] (prefixed with `https://` when scheme-less), the
/// request's own `host`, then [`LOCAL_DEV_ORIGIN`]. Never fails.
#[must_use]
pub fn resolve_backend_origin(settings: &dyn SettingsSource, host: Option<&str>) -> BackendOrigin {
    let setting = |key: &str| {
        settings
            .get(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let (raw, source) = if let Some(url) = setting(APP_BACKEND_URL) {
        (url, OriginSource::AppBackendUrl)
    } else if let Some(url) = setting(BACKEND_URL) {
        (url, OriginSource::BackendUrl)
    } else if let Some(url) = setting(DEPLOYMENT_URL) {
        (with_https_scheme(&url), OriginSource::DeploymentUrl)
    } else if let Some(host) = host.map(str::trim).filter(|h| !h.is_empty()) {
        (format!("https://{host}"), OriginSource::RequestHost)
    } else {
        (LOCAL_DEV_ORIGIN.to_owned(), OriginSource::LocalDevelopment)
    };

    BackendOrigin {
        url: raw.trim_end_matches('/').to_owned(),
        source,
    }
}

fn with_https_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else {
        format!("https://{url}")
    }
}
