use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.site_name, "BoostTribe");
    assert_eq!(cfg.locale, "fr_FR");
    assert_eq!(cfg.public_base_url, "https://localhost");
    assert_eq!(cfg.upstream_user_agent, "BoostTribe-Preview-Bot/1.0");
    assert_eq!(cfg.primary_timeout_ms, 10_000);
    assert_eq!(cfg.fallback_timeout_ms, 5_000);
    assert_eq!(cfg.html_lang(), "fr");
}

#[test]
fn build_app_config_blank_value_falls_back_to_default() {
    let mut map = HashMap::new();
    map.insert("UNFURL_SITE_NAME", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.site_name, "BoostTribe");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("UNFURL_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNFURL_BIND_ADDR"),
        "expected InvalidEnvVar(UNFURL_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("UNFURL_PRIMARY_TIMEOUT_MS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNFURL_PRIMARY_TIMEOUT_MS"),
        "expected InvalidEnvVar(UNFURL_PRIMARY_TIMEOUT_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_fallback_timeout() {
    let mut map = HashMap::new();
    map.insert("UNFURL_FALLBACK_TIMEOUT_MS", "five seconds");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNFURL_FALLBACK_TIMEOUT_MS"),
        "expected InvalidEnvVar(UNFURL_FALLBACK_TIMEOUT_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_timeouts() {
    let mut map = HashMap::new();
    map.insert("UNFURL_PRIMARY_TIMEOUT_MS", "2500");
    map.insert("UNFURL_FALLBACK_TIMEOUT_MS", "750");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.primary_timeout().as_millis(), 2500);
    assert_eq!(cfg.fallback_timeout().as_millis(), 750);
}

#[test]
fn build_app_config_strips_trailing_slash_from_public_base_url() {
    let mut map = HashMap::new();
    map.insert("UNFURL_PUBLIC_BASE_URL", "https://shop.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.public_base_url, "https://shop.example.com");
}

#[test]
fn build_app_config_rejects_scheme_less_public_base_url() {
    let mut map = HashMap::new();
    map.insert("UNFURL_PUBLIC_BASE_URL", "shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNFURL_PUBLIC_BASE_URL"),
        "expected InvalidEnvVar(UNFURL_PUBLIC_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_public_base_url_without_host() {
    let mut map = HashMap::new();
    map.insert("UNFURL_PUBLIC_BASE_URL", "https://");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn html_lang_handles_hyphenated_locale() {
    let mut map = HashMap::new();
    map.insert("UNFURL_LOCALE", "en-US");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.html_lang(), "en");
}

#[test]
fn build_app_config_rejects_malformed_public_base_urls() {
    for raw in [
        "https://exa mple.com",
        "https://shop.example.com:notaport",
        "ftp://shop.example.com",
    ] {
        let mut map = HashMap::new();
        map.insert("UNFURL_PUBLIC_BASE_URL", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UNFURL_PUBLIC_BASE_URL"),
            "expected {raw:?} to be rejected, got: {result:?}"
        );
    }
}

#[test]
fn build_app_config_keeps_port_and_path_of_public_base_url() {
    let mut map = HashMap::new();
    map.insert("UNFURL_PUBLIC_BASE_URL", "http://localhost:3000/shop/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.public_base_url, "http://localhost:3000/shop");
}
