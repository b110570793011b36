//! HTTP client for the storefront relay (`bcb-server`).

use std::time::Duration;

use bcb_assistant::ChatTurn;
use bcb_core::{AppConfig, CheckoutPayload};
use serde::{Deserialize, Serialize};

/// Body shape shared by the relay's JSON endpoints.
#[derive(Debug, Default, Deserialize)]
struct RelayReply {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    #[serde(rename = "chatMessage")]
    chat_message: &'a str,
    history: &'a [ChatTurn],
}

pub(crate) struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(&config.relay_url, config.request_timeout_secs, &config.user_agent)
    }

    pub(crate) fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// POSTs the payload to `/api/checkout` and returns the payment page URL.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, a non-2xx status (carrying the relay's
    /// `error` message when present), or a response without `url`.
    pub(crate) async fn checkout(&self, payload: &CheckoutPayload) -> anyhow::Result<String> {
        let reply = self.post("/api/checkout", payload).await?;
        reply
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| anyhow::anyhow!("checkout relay returned no payment URL"))
    }

    /// POSTs a chat message with prior turns to `/api/chat`.
    pub(crate) async fn chat(&self, message: &str, history: &[ChatTurn]) -> anyhow::Result<String> {
        let request = ChatRequest {
            chat_message: message,
            history,
        };
        let reply = self.post("/api/chat", &request).await?;
        reply
            .reply
            .ok_or_else(|| anyhow::anyhow!("chat relay returned no reply"))
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> anyhow::Result<RelayReply> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let reply: RelayReply = serde_json::from_str(&text).unwrap_or_default();

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), body = %text, "relay request failed");
            let message = reply
                .error
                .unwrap_or_else(|| format!("relay returned HTTP {}", status.as_u16()));
            anyhow::bail!(message);
        }
        Ok(reply)
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
