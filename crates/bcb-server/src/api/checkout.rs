use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use bcb_core::CheckoutPayload;
use bcb_payments::PaymentsError;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct CheckoutResponse {
    url: String,
}

/// Validates a storefront checkout payload and exchanges it for a hosted
/// payment page URL. The payload's prices are forwarded as given.
pub(super) async fn create_checkout(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<CheckoutPayload>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(payload) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    payload
        .validate()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let Some(stripe) = state.stripe.as_ref() else {
        return Err(ApiError::new(
            req_id.0,
            "not_configured",
            "checkout is not configured",
        ));
    };

    match stripe.create_checkout_session(&payload, &state.session).await {
        Ok(url) => Ok(Json(CheckoutResponse { url })),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "checkout session failed");
            Err(ApiError::new(req_id.0, "upstream_error", client_message(&e)))
        }
    }
}

/// Provider messages are safe to show; transport details are not.
fn client_message(error: &PaymentsError) -> String {
    match error {
        PaymentsError::Api { message, .. } => message.clone(),
        _ => "payment provider unavailable".to_owned(),
    }
}
