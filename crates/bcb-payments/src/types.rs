use serde::Deserialize;

/// Per-deployment settings for a checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Public storefront URL, without trailing slash.
    pub site_url: String,
    /// ISO country codes accepted for the shipping address.
    pub allowed_countries: Vec<String>,
}

impl SessionOptions {
    #[must_use]
    pub fn success_url(&self) -> String {
        format!("{}/success", self.site_url.trim_end_matches('/'))
    }

    #[must_use]
    pub fn cancel_url(&self) -> String {
        format!("{}/", self.site_url.trim_end_matches('/'))
    }
}

/// Subset of a Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page; absent once the session has expired or completed.
    #[serde(default)]
    pub url: Option<String>,
}

/// Stripe's error envelope: `{ "error": { "message": "...", "type": "..." } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
