//! HTTP client for Stripe Checkout.
//!
//! Requests are never retried: a timed-out create may still have produced a
//! session, and the shopper can simply try again.

use std::time::Duration;

use bcb_core::CheckoutPayload;
use reqwest::{Client, Url};

use crate::error::PaymentsError;
use crate::form::session_form;
use crate::types::{CheckoutSession, ErrorEnvelope, SessionOptions};

const DEFAULT_BASE_URL: &str = "https://api.stripe.com/";

/// Client for the Stripe REST API.
///
/// Use [`StripeClient::new`] for production or
/// [`StripeClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: Url,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("secret_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Creates a client pointed at the production Stripe API.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(secret_key: &str, timeout_secs: u64) -> Result<Self, PaymentsError> {
        Self::with_base_url(secret_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PaymentsError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        secret_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PaymentsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("bcb-store/0.1 (checkout-relay)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PaymentsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            secret_key: secret_key.to_owned(),
            base_url,
        })
    }

    /// Creates a hosted Checkout Session for `payload` and returns its
    /// redirect URL.
    ///
    /// # Errors
    ///
    /// - [`PaymentsError::Api`] on a non-2xx response.
    /// - [`PaymentsError::MissingUrl`] if the session has no `url`.
    /// - [`PaymentsError::Http`] on network failure.
    /// - [`PaymentsError::Deserialize`] if a 2xx body is not a session object.
    pub async fn create_checkout_session(
        &self,
        payload: &CheckoutPayload,
        options: &SessionOptions,
    ) -> Result<String, PaymentsError> {
        let url = self.endpoint("v1/checkout/sessions")?;
        let form = session_form(payload, options);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = Self::error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned());
            tracing::warn!(status = status.as_u16(), %message, "checkout session rejected");
            return Err(PaymentsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession =
            serde_json::from_str(&body).map_err(|e| PaymentsError::Deserialize {
                context: "checkout session".to_owned(),
                source: e,
            })?;

        tracing::info!(
            session_id = %session.id,
            items = payload.items.len(),
            amount_total = payload.amount_total().get(),
            "checkout session created"
        );
        session
            .url
            .filter(|u| !u.is_empty())
            .ok_or(PaymentsError::MissingUrl)
    }

    fn endpoint(&self, path: &str) -> Result<Url, PaymentsError> {
        self.base_url
            .join(path)
            .map_err(|e| PaymentsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Extracts `error.message` from a Stripe error body.
    fn error_message(body: &str) -> Option<String> {
        let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
        match (envelope.error.message, envelope.error.kind) {
            (Some(message), _) => Some(message),
            (None, Some(kind)) => Some(kind),
            (None, None) => None,
        }
    }
}
