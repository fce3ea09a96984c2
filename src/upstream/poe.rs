//! Poe bot-query protocol client
//!
//! One POST per query with a JSON payload, answered by a server-sent-event
//! stream of typed frames: `text` appends, `replace_response` replaces,
//! `error` aborts, `done` closes. Frames that carry no response text
//! (`meta`, `json`, attachments) are skipped.

use async_stream::stream;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use super::{BotEvent, BotTransport, EventStream, UpstreamError};

/// Protocol version sent with every query
const PROTOCOL_VERSION: &str = "1.0";

// ─────────────────────────────────────────────────────────────────────────────
// Wire Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// One turn of the query payload
#[derive(Debug, Serialize)]
struct ProtocolMessage {
    role: &'static str,
    content: String,
    content_type: &'static str,
    timestamp: i64,
    message_id: String,
}

/// Query request body
///
/// Conversation state lives on the caller's side of the gateway, so the
/// identifier fields are sent empty and every query is a fresh single-turn
/// exchange with the fixed `"user"` role.
#[derive(Debug, Serialize)]
struct QueryRequest {
    version: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    query: Vec<ProtocolMessage>,
    user_id: String,
    conversation_id: String,
    message_id: String,
}

impl QueryRequest {
    fn single_turn(prompt: &str) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            kind: "query",
            query: vec![ProtocolMessage {
                role: "user",
                content: prompt.to_string(),
                content_type: "text/markdown",
                timestamp: 0,
                message_id: String::new(),
            }],
            user_id: String::new(),
            conversation_id: String::new(),
            message_id: String::new(),
        }
    }
}

/// Data payload of `text` and `replace_response` frames
#[derive(Debug, Deserialize)]
struct TextData {
    text: String,
}

/// Data payload of `error` frames
#[derive(Debug, Deserialize)]
struct ErrorData {
    #[serde(default)]
    text: String,
    #[serde(default)]
    allow_retry: bool,
}

/// Map one decoded SSE frame to a bot event
///
/// Returns `None` for frame types that carry no response text.
fn map_event(name: &str, data: String) -> Option<Result<BotEvent, UpstreamError>> {
    match name {
        "text" => Some(match serde_json::from_str::<TextData>(&data) {
            Ok(payload) => Ok(BotEvent::Text(payload.text)),
            Err(e) => Err(UpstreamError::Protocol(format!("bad text frame: {}", e))),
        }),
        "replace_response" => Some(match serde_json::from_str::<TextData>(&data) {
            Ok(payload) => Ok(BotEvent::ReplaceResponse(payload.text)),
            Err(e) => Err(UpstreamError::Protocol(format!(
                "bad replace_response frame: {}",
                e
            ))),
        }),
        "error" => {
            // A malformed error payload still aborts; fall back to the raw
            // frame data as the message.
            let payload: ErrorData = serde_json::from_str(&data).unwrap_or_else(|_| ErrorData {
                text: data.clone(),
                allow_retry: false,
            });
            let text = if payload.text.is_empty() {
                data
            } else {
                payload.text
            };
            Some(Err(UpstreamError::Bot {
                text,
                allow_retry: payload.allow_retry,
            }))
        }
        "done" => Some(Ok(BotEvent::Done)),
        other => {
            tracing::debug!("Skipping upstream frame type: {}", other);
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the Poe bot API
#[derive(Clone)]
pub struct PoeClient {
    client: reqwest::Client,
    base_url: String,
}

impl PoeClient {
    /// Create a client over a shared connection pool
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        // The bot name is appended as a path segment; normalize away any
        // trailing slash so joins stay predictable.
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }
}

impl BotTransport for PoeClient {
    fn query(&self, credential: &str, bot: &str, prompt: &str) -> EventStream {
        let url = format!("{}/{}", self.base_url, bot);
        let request = self
            .client
            .post(&url)
            .bearer_auth(credential)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&QueryRequest::single_turn(prompt));

        Box::pin(stream! {
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    yield Err(UpstreamError::Http(e));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                yield Err(UpstreamError::Api { status, body });
                return;
            }

            let mut frames = response.bytes_stream().eventsource();
            while let Some(frame) = frames.next().await {
                let frame = match frame {
                    Ok(frame) => frame,
                    Err(e) => {
                        yield Err(UpstreamError::Protocol(e.to_string()));
                        return;
                    }
                };

                match map_event(&frame.event, frame.data) {
                    Some(Ok(BotEvent::Done)) => {
                        yield Ok(BotEvent::Done);
                        return;
                    }
                    Some(Ok(event)) => yield Ok(event),
                    Some(Err(e)) => {
                        yield Err(e);
                        return;
                    }
                    None => {}
                }
            }
            // Server closed without a done frame; treat as a normal end.
        })
    }
}
