//! Upstream stream adapter
//!
//! Converts the typed transport event stream into the fragment sequence
//! the response assemblers consume. Two jobs: drop empty frames while
//! preserving order, and convert a transport failure into exactly one
//! terminal [`Fragment::Failure`] so the stream always ends normally.

use std::sync::Arc;

use async_stream::stream;
use futures::StreamExt;

use super::{BotEvent, BotTransport, Fragment, FragmentStream};

/// Open one upstream query and adapt its events into fragments
///
/// The returned stream is pull-based: the transport is polled only when
/// the consumer asks for the next fragment, and dropping the stream
/// abandons the upstream call. After each fragment the task yields so the
/// consumer can flush before the next pull.
pub fn open(
    transport: Arc<dyn BotTransport>,
    credential: &str,
    bot: &str,
    prompt: &str,
) -> FragmentStream {
    let mut events = transport.query(credential, bot, prompt);

    Box::pin(stream! {
        while let Some(event) = events.next().await {
            match event {
                Ok(BotEvent::Text(text)) | Ok(BotEvent::ReplaceResponse(text)) => {
                    if text.is_empty() {
                        continue;
                    }
                    yield Fragment::Content(text);
                    tokio::task::yield_now().await;
                }
                Ok(BotEvent::Done) => break,
                Err(e) => {
                    tracing::warn!("Upstream failure delivered in-band: {}", e);
                    yield Fragment::Failure(e.to_string());
                    break;
                }
            }
        }
    })
}
