//! OpenAI-compatible wire types
//!
//! The downstream surface of the gateway speaks the Chat Completions
//! format: one request shape, a buffered response object, and the
//! `chat.completion.chunk` framing used for SSE streaming. Only the
//! fields the gateway actually serves are modeled; unknown inbound
//! fields (temperature, max_tokens, ...) are accepted and ignored.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Request Types
// ============================================================================

/// A single conversation turn
///
/// `role` is free-form: history is flattened to text before it reaches the
/// upstream, so there is no closed role set to validate against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// An assistant-role message, as carried by response choices
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Inbound chat completion request
///
/// `model` names the upstream bot and is passed through opaquely. An empty
/// `messages` history is valid and composes to an empty prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
}

// ============================================================================
// Buffered Response Types
// ============================================================================

/// The single candidate of a buffered response
#[derive(Debug, Serialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

/// Token usage counters; `total_tokens` is always the sum of the other two
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatUsage {
    /// Build the usage block, deriving the total
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Buffered chat completion response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub choices: Vec<ChatChoice>,
    pub usage: ChatUsage,
}

impl ChatResponse {
    /// Wrap completed content in the standard single-choice envelope
    ///
    /// A fresh `id` is generated per call; `finish_reason` is always
    /// `"stop"` because the upstream offers no finer signal.
    pub fn new(content: String, usage: ChatUsage) -> Self {
        Self {
            id: format!("chatcmpl-{}", Uuid::new_v4()),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(content),
                finish_reason: "stop".to_string(),
            }],
            usage,
        }
    }
}

// ============================================================================
// Streaming Chunk Types
// ============================================================================

/// One frame of an incremental response
///
/// Every chunk of a response shares the same `id`/`created`/`model`.
/// Content chunks carry a delta and a null finish reason; the terminal
/// chunk carries an empty delta and `finish_reason: "stop"`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Serialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    // Serialized as null on content chunks, so no skip attribute here
    pub finish_reason: Option<String>,
}

/// Delta payload; with no content it serializes to `{}`
#[derive(Debug, Default, Serialize)]
pub struct ChunkDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// A content-bearing chunk
    pub fn delta(id: &str, created: i64, model: &str, content: String) -> Self {
        Self {
            id: id.to_string(),
            object: "chat.completion.chunk".to_string(),
            created,
            model: model.to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: ChunkDelta {
                    content: Some(content),
                },
                finish_reason: None,
            }],
        }
    }

    /// The terminal chunk closing an incremental response
    pub fn finish(id: &str, created: i64, model: &str) -> Self {
        Self {
            id: id.to_string(),
            object: "chat.completion.chunk".to_string(),
            created,
            model: model.to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: ChunkDelta::default(),
                finish_reason: Some("stop".to_string()),
            }],
        }
    }
}
