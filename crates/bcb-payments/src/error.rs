use thiserror::Error;

/// Errors returned by the Stripe client.
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe answered with a non-2xx status. `message` is Stripe's
    /// `error.message` when the body carried one.
    #[error("payment provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The session was created but the response had no redirect URL.
    #[error("payment provider returned a session without a URL")]
    MissingUrl,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid payments base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
