use std::net::SocketAddr;
use std::path::PathBuf;

use crate::totals::ShippingPolicy;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Public base URL of the storefront; success/cancel redirects hang off it.
    pub site_url: String,
    pub shipping: ShippingPolicy,
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
    /// ISO country codes accepted for the shipping address.
    pub allowed_countries: Vec<String>,
    pub sanity_project_id: String,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub sanity_use_cdn: bool,
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_base: String,
    pub chat_model: String,
    pub chat_max_tokens: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub feed_max_retries: u32,
    pub feed_retry_backoff_ms: u64,
    /// Base URL the CLI uses to reach the checkout and chat relay.
    pub relay_url: String,
    /// Directory holding the CLI's cart slot.
    pub cart_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("site_url", &self.site_url)
            .field("shipping", &self.shipping)
            .field(
                "stripe_secret_key",
                &self.stripe_secret_key.as_ref().map(|_| "[redacted]"),
            )
            .field("stripe_api_base", &self.stripe_api_base)
            .field("allowed_countries", &self.allowed_countries)
            .field("sanity_project_id", &self.sanity_project_id)
            .field("sanity_dataset", &self.sanity_dataset)
            .field("sanity_api_version", &self.sanity_api_version)
            .field("sanity_use_cdn", &self.sanity_use_cdn)
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("anthropic_api_base", &self.anthropic_api_base)
            .field("chat_model", &self.chat_model)
            .field("chat_max_tokens", &self.chat_max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("feed_max_retries", &self.feed_max_retries)
            .field("feed_retry_backoff_ms", &self.feed_retry_backoff_ms)
            .field("relay_url", &self.relay_url)
            .field("cart_dir", &self.cart_dir)
            .finish()
    }
}
