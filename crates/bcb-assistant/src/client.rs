//! HTTP client for the Anthropic Messages API.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::AssistantError;
use crate::types::{
    ChatRole, ChatTurn, ErrorEnvelope, MessagesRequest, MessagesResponse, WireMessage,
};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const API_VERSION: &str = "2023-06-01";

/// Reply shown when the model answers without any text.
pub const FALLBACK_REPLY: &str = "Sorry, try again!";

/// Most recent transcript turns forwarded with each message.
const MAX_HISTORY_TURNS: usize = 20;

#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
    max_tokens: u32,
}

impl std::fmt::Debug for AssistantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl AssistantClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self, AssistantError> {
        Self::with_base_url(api_key, model, max_tokens, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`AssistantError::InvalidBaseUrl`] for an unparseable URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AssistantError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
            max_tokens,
        })
    }

    /// Sends `message` after the prior `history` and returns the model's reply.
    ///
    /// Returns [`FALLBACK_REPLY`] when the response carries no text block.
    ///
    /// # Errors
    ///
    /// - [`AssistantError::EmptyMessage`] if `message` is blank.
    /// - [`AssistantError::Api`] on a non-2xx response.
    /// - [`AssistantError::Http`] on network failure.
    /// - [`AssistantError::Deserialize`] if a 2xx body is not a message.
    pub async fn reply(
        &self,
        system: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let mut messages = conversation(history);
        messages.push(WireMessage {
            role: ChatRole::User,
            content: message,
        });
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
        };

        let url = self
            .base_url
            .join("v1/messages")
            .map_err(|e| AssistantError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned());
            tracing::warn!(status = status.as_u16(), %message, "assistant request failed");
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| AssistantError::Deserialize {
                context: "messages response".to_owned(),
                source: e,
            })?;

        Ok(first_text(parsed).unwrap_or_else(|| FALLBACK_REPLY.to_owned()))
    }
}

/// Converts the transcript to API messages: blank turns are dropped, only the
/// most recent turns are kept, and the conversation must open with the user.
fn conversation(history: &[ChatTurn]) -> Vec<WireMessage<'_>> {
    let turns: Vec<&ChatTurn> = history
        .iter()
        .filter(|t| !t.text.trim().is_empty())
        .collect();
    let start = turns.len().saturating_sub(MAX_HISTORY_TURNS);
    turns[start..]
        .iter()
        .skip_while(|t| t.role != ChatRole::User)
        .map(|t| WireMessage {
            role: t.role,
            content: t.text.as_str(),
        })
        .collect()
}

fn first_text(response: MessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text.filter(|t| !t.trim().is_empty()))
}
