//! Scripted transport for exercising the pipeline without a network
//!
//! Replays a fixed event script per query and records every invocation,
//! so tests can assert both what reached the upstream and that rejected
//! requests never did.

use std::sync::{Arc, Mutex};

use super::{BotEvent, BotTransport, EventStream, UpstreamError};

/// Arguments of one recorded `query` call
#[derive(Debug, Clone)]
pub(crate) struct QueryRecord {
    pub credential: String,
    pub bot: String,
    pub prompt: String,
}

/// A transport that replays a fixed script of events
pub(crate) struct ScriptedTransport {
    // Err entries become bot errors; only the message matters to tests.
    script: Vec<Result<BotEvent, String>>,
    recorded: Mutex<Vec<QueryRecord>>,
}

impl ScriptedTransport {
    /// Replay `events`, then end the stream
    pub(crate) fn with_events(events: Vec<BotEvent>) -> Arc<Self> {
        Arc::new(Self {
            script: events.into_iter().map(Ok).collect(),
            recorded: Mutex::new(Vec::new()),
        })
    }

    /// Replay text frames, then end the stream
    pub(crate) fn with_texts(texts: &[&str]) -> Arc<Self> {
        Self::with_events(texts.iter().map(|t| BotEvent::Text(t.to_string())).collect())
    }

    /// Replay `events`, then fail with a bot error carrying `message`
    pub(crate) fn with_failure(events: Vec<BotEvent>, message: &str) -> Arc<Self> {
        let mut script: Vec<Result<BotEvent, String>> = events.into_iter().map(Ok).collect();
        script.push(Err(message.to_string()));
        Arc::new(Self {
            script,
            recorded: Mutex::new(Vec::new()),
        })
    }

    /// Number of queries opened against this transport
    pub(crate) fn calls(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    /// All recorded query arguments, in call order
    pub(crate) fn recorded(&self) -> Vec<QueryRecord> {
        self.recorded.lock().unwrap().clone()
    }
}

impl BotTransport for ScriptedTransport {
    fn query(&self, credential: &str, bot: &str, prompt: &str) -> EventStream {
        self.recorded.lock().unwrap().push(QueryRecord {
            credential: credential.to_string(),
            bot: bot.to_string(),
            prompt: prompt.to_string(),
        });

        let script = self.script.clone();
        Box::pin(futures::stream::iter(script.into_iter().map(|item| {
            item.map_err(|text| UpstreamError::Bot {
                text,
                allow_retry: false,
            })
        })))
    }
}
