//! Request handlers for the gateway endpoints

use axum::{
    extract::rejection::JsonRejection,
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::openai::ChatRequest;
use crate::prompt;
use crate::tokens::count_prompt_tokens;
use crate::upstream;

use super::assembler;
use super::error::GatewayError;
use super::state::GatewayState;
use super::testpage::TEST_PAGE;

/// Extract the caller's credential from the Authorization header
///
/// `Bearer <key>` yields the key. A bare non-empty value is used verbatim,
/// since some OpenAI clients send the key without the scheme. A missing or
/// empty header yields `None`, and the caller falls back to the configured
/// default.
fn extract_credential(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;

    if let Some(key) = value.strip_prefix("Bearer ") {
        return Some(key.to_string());
    }
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// `POST /v1/chat/completions`
///
/// The `model` field names the upstream bot and is passed through without
/// catalog validation; the `stream` flag selects the assembly mode. A body
/// that does not parse is rejected before any upstream query is opened.
/// Upstream failures after that point surface as response content, never
/// as an HTTP error.
pub(super) async fn chat_completions(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(request) = payload?;

    let credential =
        extract_credential(&headers).unwrap_or_else(|| state.default_api_key.clone());
    let prompt = prompt::compose(&request.messages);

    tracing::info!(
        "Chat completion request: bot={} messages={} stream={}",
        request.model,
        request.messages.len(),
        request.stream
    );

    let fragments = upstream::open(state.transport.clone(), &credential, &request.model, &prompt);

    if request.stream {
        Ok(assembler::incremental(request.model, fragments).into_response())
    } else {
        let prompt_tokens = count_prompt_tokens(&request.messages);
        let response = assembler::buffered(prompt_tokens, fragments).await;
        Ok(Json(response).into_response())
    }
}

/// Query parameters for the browser streaming endpoint; all required
#[derive(Debug, Deserialize)]
pub(super) struct StreamParams {
    api_key: String,
    bot_name: String,
    message: String,
}

/// `GET /stream-response`
///
/// Single-message streaming entry point for the test page: the reply is
/// emitted as bare text frames instead of chunk JSON. Missing parameters
/// are rejected by extraction, before any upstream call.
pub(super) async fn stream_response(
    State(state): State<GatewayState>,
    Query(params): Query<StreamParams>,
) -> impl IntoResponse {
    let prompt = format!("user: {}", params.message);

    tracing::info!("Stream test request: bot={}", params.bot_name);

    let fragments = upstream::open(
        state.transport.clone(),
        &params.api_key,
        &params.bot_name,
        &prompt,
    );
    assembler::raw(fragments)
}

/// Bots advertised by the catalog endpoint, as (id, owner) pairs
///
/// Purely informational: inbound model names are never checked against
/// this list.
const CATALOG: &[(&str, &str)] = &[
    ("Claude-3.7-Sonnet", "anthropic"),
    ("Claude-3.5-Sonnet", "anthropic"),
    ("o3-mini", "openai"),
    ("DeepSeek-R1-FW", "deepseek"),
    ("GPT-4o", "openai"),
    ("Gemini-2.0-Pro", "google"),
    ("FLUX-pro-1.1", "stability"),
    ("ElevenLabs", "elevenlabs"),
    ("Runway", "runway"),
];

/// `GET /v1/models` - static bot catalog in the OpenAI list shape
pub(super) async fn list_models() -> Json<serde_json::Value> {
    let created = chrono::Utc::now().timestamp();
    let data: Vec<_> = CATALOG
        .iter()
        .map(|(id, owned_by)| {
            json!({
                "id": id,
                "object": "model",
                "created": created,
                "owned_by": owned_by,
            })
        })
        .collect();

    Json(json!({ "object": "list", "data": data }))
}

/// `GET /` - embedded browser test page
pub(super) async fn test_page() -> Html<&'static str> {
    Html(TEST_PAGE)
}
