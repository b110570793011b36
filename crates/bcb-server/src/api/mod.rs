mod chat;
mod checkout;
mod products;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use bcb_assistant::AssistantClient;
use bcb_catalog::ContentClient;
use bcb_core::AppConfig;
use bcb_payments::{SessionOptions, StripeClient};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Shared handler state. Payment and assistant clients are absent when their
/// API keys are not configured; the matching routes then answer 503.
#[derive(Clone)]
pub struct AppState {
    pub catalog: ContentClient,
    pub stripe: Option<StripeClient>,
    pub assistant: Option<AssistantClient>,
    pub session: SessionOptions,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = ContentClient::from_config(config)?;

        let stripe = config
            .stripe_secret_key
            .as_deref()
            .map(|key| {
                StripeClient::with_base_url(
                    key,
                    config.request_timeout_secs,
                    &config.stripe_api_base,
                )
            })
            .transpose()?;
        if stripe.is_none() {
            tracing::warn!("STRIPE_SECRET_KEY not set; checkout relay disabled");
        }

        let assistant = config
            .anthropic_api_key
            .as_deref()
            .map(|key| {
                AssistantClient::with_base_url(
                    key,
                    &config.chat_model,
                    config.chat_max_tokens,
                    config.request_timeout_secs,
                    &config.anthropic_api_base,
                )
            })
            .transpose()?;
        if assistant.is_none() {
            tracing::warn!("ANTHROPIC_API_KEY not set; chat relay disabled");
        }

        Ok(Self {
            catalog,
            stripe,
            assistant,
            session: SessionOptions {
                site_url: config.site_url.clone(),
                allowed_countries: config.allowed_countries.clone(),
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Error body. `error` is the human-readable message storefront clients
/// display; `code` selects the HTTP status.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    payments: &'static str,
    assistant: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            "not_configured" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

/// Routes that call paid upstream APIs sit behind the rate limiter.
fn relay_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(checkout::create_checkout))
        .route("/api/chat", post(chat::chat))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/products", get(products::list_products));

    Router::new()
        .merge(public_routes)
        .merge(relay_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let configured = |present: bool| if present { "configured" } else { "not_configured" };
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            payments: configured(state.stripe.is_some()),
            assistant: configured(state.assistant.is_some()),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
