use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings read once at startup.
///
/// Backend origin settings are deliberately absent: they are read per request
/// through a [`crate::SettingsSource`] so a redeploy of the catalog backend
/// does not require restarting the preview service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Rendered as `og:site_name`.
    pub site_name: String,
    /// Rendered as `og:locale`, e.g. `fr_FR`.
    pub locale: String,
    /// Public base URL used when the inbound request carries no `Host`.
    /// Always scheme-qualified, never ends with `/`.
    pub public_base_url: String,
    pub upstream_user_agent: String,
    pub primary_timeout_ms: u64,
    pub fallback_timeout_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn primary_timeout(&self) -> Duration {
        Duration::from_millis(self.primary_timeout_ms)
    }

    #[must_use]
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    /// Language tag for `<html lang>`, derived from the locale (`fr_FR` -> `fr`).
    #[must_use]
    pub fn html_lang(&self) -> &str {
        self.locale
            .split(['_', '-'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("en")
    }
}
