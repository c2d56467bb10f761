//! In-memory event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::bus::{EventBus, EventHandler, PublishError};
use crate::event::DynEvent;

/// Process-wide fan-out dispatcher from event name to subscriber list.
///
/// Handlers run synchronously on the publishing task; there is no queue, no
/// dispatch task, and no retry. A handler may drive another service that
/// publishes again through this same bus; that re-entry terminates because
/// handlers subscribe to disjoint event names.
#[derive(Default)]
pub struct InMemoryEventBus {
    subscribers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
}

impl InMemoryEventBus {
    /// Creates a bus with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn subscribe(&self, event_name: &str, handler: Arc<dyn EventHandler>) {
        if event_name.is_empty() {
            return;
        }

        let mut subscribers = self.subscribers.write().await;
        subscribers
            .entry(event_name.to_owned())
            .or_default()
            .push(handler);
    }

    async fn publish(&self, events: &[DynEvent]) -> Result<(), PublishError> {
        for event in events {
            let event_name = event.event_name();

            // Snapshot the list so the read lock is released before any
            // handler runs; a handler may publish through this bus again.
            let handlers: Vec<Arc<dyn EventHandler>> = {
                let subscribers = self.subscribers.read().await;
                subscribers.get(event_name).cloned().unwrap_or_default()
            };

            tracing::debug!(event_name, subscribers = handlers.len(), "publishing event");

            for handler in handlers {
                handler
                    .handle(event)
                    .await
                    .map_err(|source| PublishError::Handler { event_name, source })?;
            }
        }

        Ok(())
    }
}
