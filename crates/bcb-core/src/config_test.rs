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

/// Returns a map with the variables a production deployment must set.
fn production_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("BCB_ENV", "production");
    m.insert("STRIPE_SECRET_KEY", "sk_test_123");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BCB_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8888");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.site_url, "http://localhost:8888");
    assert_eq!(cfg.shipping, ShippingPolicy::default());
    assert!(cfg.stripe_secret_key.is_none());
    assert_eq!(cfg.stripe_api_base, "https://api.stripe.com");
    assert_eq!(cfg.allowed_countries, vec!["US"]);
    assert_eq!(cfg.sanity_project_id, "a9vovusz");
    assert_eq!(cfg.sanity_dataset, "production");
    assert_eq!(cfg.sanity_api_version, "2024-01-01");
    assert!(cfg.sanity_use_cdn);
    assert!(cfg.anthropic_api_key.is_none());
    assert_eq!(cfg.chat_max_tokens, 800);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.feed_max_retries, 2);
    assert_eq!(cfg.feed_retry_backoff_ms, 500);
    assert_eq!(cfg.relay_url, "http://localhost:8888");
    assert_eq!(cfg.cart_dir, std::path::PathBuf::from(".bcb"));
}

#[test]
fn build_app_config_production_requires_stripe_key() {
    let mut map = production_env();
    map.remove("STRIPE_SECRET_KEY");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STRIPE_SECRET_KEY"),
        "expected MissingEnvVar(STRIPE_SECRET_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_production_treats_blank_stripe_key_as_missing() {
    let mut map = production_env();
    map.insert("STRIPE_SECRET_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_production_succeeds_with_stripe_key() {
    let map = production_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.stripe_secret_key.as_deref(), Some("sk_test_123"));
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = production_env();
    map.insert("ANTHROPIC_API_KEY", "sk-ant-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("sk_test_123"), "debug leaked: {debug}");
    assert!(!debug.contains("sk-ant-secret"), "debug leaked: {debug}");
    assert!(debug.contains("[redacted]"));
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("BCB_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BCB_BIND_ADDR"),
        "expected InvalidEnvVar(BCB_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn shipping_policy_override() {
    let mut map = HashMap::new();
    map.insert("BCB_FREE_SHIPPING_THRESHOLD", "100");
    map.insert("BCB_FLAT_SHIPPING_FEE", "$7.50");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.shipping.free_shipping_threshold, Cents::new(10_000));
    assert_eq!(cfg.shipping.flat_fee, Cents::new(750));
}

#[test]
fn shipping_threshold_invalid() {
    let mut map = HashMap::new();
    map.insert("BCB_FREE_SHIPPING_THRESHOLD", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BCB_FREE_SHIPPING_THRESHOLD"),
        "expected InvalidEnvVar(BCB_FREE_SHIPPING_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn flat_fee_invalid() {
    let mut map = HashMap::new();
    map.insert("BCB_FLAT_SHIPPING_FEE", "cheap");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BCB_FLAT_SHIPPING_FEE"),
        "expected InvalidEnvVar(BCB_FLAT_SHIPPING_FEE), got: {result:?}"
    );
}

#[test]
fn site_and_relay_urls_drop_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("URL", "https://shop.example.com/");
    map.insert("BCB_RELAY_URL", "https://relay.example.com//");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.site_url, "https://shop.example.com");
    assert_eq!(cfg.relay_url, "https://relay.example.com");
}

#[test]
fn allowed_countries_are_split_and_uppercased() {
    let mut map = HashMap::new();
    map.insert("BCB_ALLOWED_COUNTRIES", "us, ca ,,gb");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.allowed_countries, vec!["US", "CA", "GB"]);
}

#[test]
fn allowed_countries_empty_fails() {
    let mut map = HashMap::new();
    map.insert("BCB_ALLOWED_COUNTRIES", " , ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BCB_ALLOWED_COUNTRIES"),
        "got: {result:?}"
    );
}

#[test]
fn sanity_use_cdn_parses_booleans() {
    let mut map = HashMap::new();
    map.insert("SANITY_USE_CDN", "false");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.sanity_use_cdn);

    map.insert("SANITY_USE_CDN", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SANITY_USE_CDN"),
        "got: {result:?}"
    );
}

#[test]
fn chat_max_tokens_override_and_invalid() {
    let mut map = HashMap::new();
    map.insert("BCB_CHAT_MAX_TOKENS", "256");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.chat_max_tokens, 256);

    map.insert("BCB_CHAT_MAX_TOKENS", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BCB_CHAT_MAX_TOKENS"),
        "got: {result:?}"
    );
}

#[test]
fn feed_retry_settings_override() {
    let mut map = HashMap::new();
    map.insert("BCB_FEED_MAX_RETRIES", "0");
    map.insert("BCB_FEED_RETRY_BACKOFF_MS", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.feed_max_retries, 0);
    assert_eq!(cfg.feed_retry_backoff_ms, 25);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("BCB_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BCB_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BCB_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}
