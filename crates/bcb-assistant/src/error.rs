use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat message is empty")]
    EmptyMessage,

    #[error("assistant API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid assistant base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
