//! Upstream bot transport
//!
//! The gateway's view of the upstream is deliberately narrow: send one
//! prompt with a credential and a bot name, get back an ordered stream of
//! text. [`BotTransport`] is that seam. [`PoeClient`] implements it over
//! the Poe bot-query protocol, and [`open`] adapts the typed event stream
//! into the in-band [`Fragment`] sequence the response assemblers consume.
//!
//! # Stream contract
//!
//! Streams are pull-based: nothing is fetched ahead of the consumer, and
//! dropping a stream abandons the upstream call. A query is attempted
//! exactly once; any failure ends the stream after a single terminal
//! [`Fragment::Failure`], so downstream code never sees an error channel.

mod adapter;
mod poe;
#[cfg(test)]
pub(crate) mod testing;

pub use adapter::open;
pub use poe::PoeClient;

use futures::stream::BoxStream;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures surfaced by the upstream transport
///
/// None of these reach a downstream caller as an HTTP failure; the adapter
/// converts whichever occurs first into the final fragment of its stream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent, or the connection died mid-stream.
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the query outright (bad credential, unknown bot).
    #[error("upstream returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The event stream carried a frame that could not be decoded.
    #[error("malformed upstream event: {0}")]
    Protocol(String),

    /// The bot itself reported an error event.
    #[error("{text}")]
    Bot { text: String, allow_retry: bool },
}

// ─────────────────────────────────────────────────────────────────────────────
// Events and Fragments
// ─────────────────────────────────────────────────────────────────────────────

/// A decoded event from the upstream SSE stream
#[derive(Debug, Clone, PartialEq)]
pub enum BotEvent {
    /// Incremental text to append to the response.
    Text(String),
    /// Replacement text; forwarded downstream like ordinary content.
    ReplaceResponse(String),
    /// Normal end of stream.
    Done,
}

/// The unit consumed by the response assemblers
///
/// Failures travel the same channel as content, tagged so the process can
/// tell them apart, while the wire rendering keeps the `Error:` text form
/// callers have always received.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Ordinary bot output, granularity determined upstream.
    Content(String),
    /// A converted failure; always the last fragment of its stream.
    Failure(String),
}

impl Fragment {
    /// Whether this fragment is a converted failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Fragment::Failure(_))
    }

    /// Wire rendering of the fragment
    pub fn into_text(self) -> String {
        match self {
            Fragment::Content(text) => text,
            Fragment::Failure(message) => format!("Error: {}", message),
        }
    }
}

/// Ordered upstream events, transport errors in-stream
pub type EventStream = BoxStream<'static, Result<BotEvent, UpstreamError>>;

/// Ordered fragments after in-band failure conversion
pub type FragmentStream = BoxStream<'static, Fragment>;

/// The seam between the gateway and the bot protocol
///
/// One `query` call per inbound request. Implementations return lazily:
/// no network work happens until the stream is polled.
pub trait BotTransport: Send + Sync {
    /// Open one upstream query for `prompt` against `bot`.
    fn query(&self, credential: &str, bot: &str, prompt: &str) -> EventStream;
}
