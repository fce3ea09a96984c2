//! Shared gateway state

use std::sync::Arc;

use crate::upstream::BotTransport;

/// State cloned into every request handler
///
/// Everything here is immutable after startup, so concurrent requests
/// stay fully independent.
#[derive(Clone)]
pub struct GatewayState {
    /// Transport used for every upstream query
    pub(super) transport: Arc<dyn BotTransport>,
    /// Credential used when a request carries none
    pub(super) default_api_key: String,
}
