use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use bcb_assistant::{build_system_prompt, ChatTurn};
use bcb_catalog::load_products;
use bcb_core::upcoming_events;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ChatRequest {
    #[serde(rename = "chatMessage")]
    chat_message: String,
    #[serde(default)]
    history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatReply {
    reply: String,
}

pub(super) async fn chat(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    if request.chat_message.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "chatMessage must not be empty",
        ));
    }

    let Some(assistant) = state.assistant.as_ref() else {
        return Err(ApiError::new(
            req_id.0,
            "not_configured",
            "chat is not configured",
        ));
    };

    let catalog = load_products(&state.catalog).await;
    let system = build_system_prompt(&catalog.products, &upcoming_events());

    match assistant
        .reply(&system, &request.history, &request.chat_message)
        .await
    {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "assistant reply failed");
            Err(ApiError::new(
                req_id.0,
                "upstream_error",
                "assistant unavailable",
            ))
        }
    }
}
