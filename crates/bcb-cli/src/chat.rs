//! Chat with the shopping assistant. A message on the command line is a
//! single turn; without one, an interactive session reads stdin and keeps the
//! transcript in memory until it ends.

use bcb_assistant::ChatTurn;
use bcb_core::AppConfig;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::relay::RelayClient;

/// Shown when the relay cannot produce a reply.
pub(crate) const CHAT_FAILURE_REPLY: &str = "Something went wrong!";

pub(crate) async fn run_chat(config: &AppConfig, message: &str) -> anyhow::Result<()> {
    let relay = RelayClient::from_config(config)?;
    let mut transcript = Vec::new();

    let message = message.trim();
    if !message.is_empty() {
        println!("{}", chat_turn(&relay, &mut transcript, message).await);
        return Ok(());
    }

    println!("Ask about merch or watch parties. An empty line or `exit` ends the chat.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("exit") {
            break;
        }
        println!("{}", chat_turn(&relay, &mut transcript, line).await);
    }
    Ok(())
}

/// Sends one message with the session's history and returns the text to
/// show. The transcript only grows when the relay answers.
pub(crate) async fn chat_turn(
    relay: &RelayClient,
    transcript: &mut Vec<ChatTurn>,
    message: &str,
) -> String {
    match relay.chat(message, transcript.as_slice()).await {
        Ok(reply) => {
            transcript.push(ChatTurn::user(message));
            transcript.push(ChatTurn::assistant(reply.clone()));
            reply
        }
        Err(e) => {
            tracing::warn!(error = %e, "chat relay failed");
            CHAT_FAILURE_REPLY.to_owned()
        }
    }
}
