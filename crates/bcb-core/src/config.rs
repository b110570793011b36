use crate::app_config::{AppConfig, Environment};
use crate::money::Cents;
use crate::totals::ShippingPolicy;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset for optional secrets.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_cents = |var: &str, default: &str| -> Result<Cents, ConfigError> {
        or_default(var, default)
            .parse::<Cents>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let env = parse_environment(&or_default("BCB_ENV", "development"))?;

    let bind_addr = or_default("BCB_BIND_ADDR", "0.0.0.0:8888")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BCB_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("BCB_LOG_LEVEL", "info");
    let site_url = or_default("URL", "http://localhost:8888")
        .trim_end_matches('/')
        .to_string();

    let shipping = ShippingPolicy::new(
        parse_cents("BCB_FREE_SHIPPING_THRESHOLD", "75.00")?,
        parse_cents("BCB_FLAT_SHIPPING_FEE", "5.99")?,
    );

    let stripe_secret_key = optional("STRIPE_SECRET_KEY");
    if env == Environment::Production && stripe_secret_key.is_none() {
        return Err(ConfigError::MissingEnvVar("STRIPE_SECRET_KEY".to_string()));
    }
    let stripe_api_base = or_default("STRIPE_API_BASE", "https://api.stripe.com");
    let allowed_countries: Vec<String> = or_default("BCB_ALLOWED_COUNTRIES", "US")
        .split(',')
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .collect();
    if allowed_countries.is_empty() {
        return Err(invalid(
            "BCB_ALLOWED_COUNTRIES",
            "at least one country code is required".to_string(),
        ));
    }

    let sanity_project_id = or_default("SANITY_PROJECT_ID", "a9vovusz");
    let sanity_dataset = or_default("SANITY_DATASET", "production");
    let sanity_api_version = or_default("SANITY_API_VERSION", "2024-01-01");
    let sanity_use_cdn = parse_bool("SANITY_USE_CDN", "true")?;

    let anthropic_api_key = optional("ANTHROPIC_API_KEY");
    let anthropic_api_base = or_default("ANTHROPIC_API_BASE", "https://api.anthropic.com");
    let chat_model = or_default("BCB_CHAT_MODEL", "claude-sonnet-4-20250514");
    let chat_max_tokens = parse_u32("BCB_CHAT_MAX_TOKENS", "800")?;

    let request_timeout_secs = parse_u64("BCB_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BCB_USER_AGENT", "bcb-store/0.1 (merch-storefront)");
    let feed_max_retries = parse_u32("BCB_FEED_MAX_RETRIES", "2")?;
    let feed_retry_backoff_ms = parse_u64("BCB_FEED_RETRY_BACKOFF_MS", "500")?;

    let relay_url = or_default("BCB_RELAY_URL", "http://localhost:8888")
        .trim_end_matches('/')
        .to_string();
    let cart_dir = PathBuf::from(or_default("BCB_CART_DIR", ".bcb"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_url,
        shipping,
        stripe_secret_key,
        stripe_api_base,
        allowed_countries,
        sanity_project_id,
        sanity_dataset,
        sanity_api_version,
        sanity_use_cdn,
        anthropic_api_key,
        anthropic_api_base,
        chat_model,
        chat_max_tokens,
        request_timeout_secs,
        user_agent,
        feed_max_retries,
        feed_retry_backoff_ms,
        relay_url,
        cart_dir,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BCB_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
