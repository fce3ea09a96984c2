//! Response assembly
//!
//! Both modes consume the same fragment stream. Buffered mode drains it
//! and returns one complete response with usage counters; incremental
//! mode re-emits each fragment as a `chat.completion.chunk` SSE frame,
//! then a terminal chunk and the `[DONE]` sentinel. Chunk streams are
//! generated lazily, so a slow reader stalls the upstream pull instead of
//! accumulating frames in memory.

use async_stream::stream;
use axum::response::sse::{Event, KeepAlive, Sse};
use chrono::Utc;
use futures::{Stream, StreamExt};
use uuid::Uuid;

use crate::openai::{ChatCompletionChunk, ChatResponse, ChatUsage};
use crate::tokens::count_tokens;
use crate::upstream::FragmentStream;

/// Drain the fragment stream into one buffered response
///
/// Fragments are concatenated without separators; the upstream already
/// delimits its output. The caller supplies the prompt-side token count,
/// the completion side is counted from the concatenated result.
pub(super) async fn buffered(prompt_tokens: u32, mut fragments: FragmentStream) -> ChatResponse {
    let mut content = String::new();
    while let Some(fragment) = fragments.next().await {
        content.push_str(&fragment.into_text());
    }

    let usage = ChatUsage::new(prompt_tokens, count_tokens(&content));
    ChatResponse::new(content, usage)
}

/// Re-emit fragments as chat completion chunks over SSE
///
/// Exactly one chunk per fragment in arrival order, all sharing one
/// response id, then one terminal chunk with an empty delta and
/// `finish_reason: "stop"`, then the `[DONE]` sentinel. The tail is
/// emitted unconditionally, so an empty upstream still produces a
/// well-formed response.
pub(super) fn incremental(
    model: String,
    mut fragments: FragmentStream,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let id = format!("chatcmpl-{}", Uuid::new_v4());
    let created = Utc::now().timestamp();

    let frames = stream! {
        while let Some(fragment) = fragments.next().await {
            let chunk = ChatCompletionChunk::delta(&id, created, &model, fragment.into_text());
            yield Event::default().json_data(&chunk);
        }

        yield Event::default().json_data(&ChatCompletionChunk::finish(&id, created, &model));
        yield Ok(Event::default().data("[DONE]"));
    };

    Sse::new(frames).keep_alive(KeepAlive::default())
}

/// Re-emit fragments as bare text frames
///
/// The browser test endpoint skips the chunk envelope entirely: each
/// fragment becomes one `data:` frame, closed by the same sentinel.
/// Carriage returns are dropped from fragment text; the SSE field format
/// cannot carry them.
pub(super) fn raw(
    mut fragments: FragmentStream,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let frames = stream! {
        while let Some(fragment) = fragments.next().await {
            // Event::data splits embedded newlines across data: lines but
            // panics on carriage returns, and fragment text is arbitrary
            // bot output.
            let text = fragment.into_text().replace('\r', "");
            yield Ok(Event::default().data(text));
        }
        yield Ok(Event::default().data("[DONE]"));
    };

    Sse::new(frames).keep_alive(KeepAlive::default())
}
