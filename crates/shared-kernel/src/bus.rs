//! Event bus abstractions.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::event::DynEvent;

/// Error returned by a subscriber; the bus wraps it with the event name.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A cross-context reaction to a published event.
///
/// Handlers run on the publishing task, in registration order. A handler that
/// does not recognize the concrete event type must return `Ok(())`.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DynEvent) -> Result<(), HandlerError>;
}

/// In-process publish/subscribe dispatcher keyed by event name.
///
/// Always constructed explicitly and injected into services so tests can
/// build isolated buses per case.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Registers a handler for an event name. No-op on an empty name.
    /// Subscriptions happen once at startup, before any publish.
    async fn subscribe(&self, event_name: &str, handler: Arc<dyn EventHandler>);

    /// Delivers events in order to the handlers subscribed to each name.
    ///
    /// The first handler error aborts the whole call: remaining handlers for
    /// the failing event and all later events are not delivered. The caller's
    /// future does not complete until every handler (and anything it calls,
    /// transitively) has completed.
    async fn publish(&self, events: &[DynEvent]) -> Result<(), PublishError>;
}

/// Errors raised while publishing events.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A subscriber failed; the event name identifies which cross-context
    /// reaction broke.
    #[error("handling {event_name:?} event: {source}")]
    Handler {
        event_name: &'static str,
        #[source]
        source: HandlerError,
    },
}

impl PublishError {
    /// The name of the event whose handler failed.
    pub fn event_name(&self) -> &'static str {
        match self {
            PublishError::Handler { event_name, .. } => event_name,
        }
    }
}
