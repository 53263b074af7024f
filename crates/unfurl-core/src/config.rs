use url::Url;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_timeout_ms = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("UNFURL_ENV", "development"));
    let bind_addr = parse_addr("UNFURL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("UNFURL_LOG_LEVEL", "info");
    let site_name = or_default("UNFURL_SITE_NAME", "BoostTribe");
    let locale = or_default("UNFURL_LOCALE", "fr_FR");
    let public_base_url = parse_base_url(
        "UNFURL_PUBLIC_BASE_URL",
        &or_default("UNFURL_PUBLIC_BASE_URL", "https://localhost"),
    )?;
    let upstream_user_agent = or_default("UNFURL_UPSTREAM_USER_AGENT", "BoostTribe-Preview-Bot/1.0");
    let primary_timeout_ms = parse_timeout_ms("UNFURL_PRIMARY_TIMEOUT_MS", "10000")?;
    let fallback_timeout_ms = parse_timeout_ms("UNFURL_FALLBACK_TIMEOUT_MS", "5000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_name,
        locale,
        public_base_url,
        upstream_user_agent,
        primary_timeout_ms,
        fallback_timeout_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Parses `raw` as an absolute `http(s)` URL with a host, returned without a
/// trailing `/`.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(format!("\"{raw}\": {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("\"{raw}\" must use http:// or https://")));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("\"{raw}\" has no host")));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
