//! Shopping assistant for the storefront.
//!
//! Builds a system prompt from the live catalog and the matchday calendar and
//! relays conversations to the Anthropic Messages API.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{AssistantClient, FALLBACK_REPLY};
pub use error::AssistantError;
pub use prompt::build_system_prompt;
pub use types::{ChatRole, ChatTurn};
