//! Domain event model and the per-aggregate event recorder.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// A fact that happened inside a bounded context.
///
/// Events are immutable value structs named in past tense. The bus dispatches
/// purely on `event_name`; handlers downcast via `as_any` to the concrete
/// payload they expect and ignore everything else.
pub trait DomainEvent: fmt::Debug + Send + Sync + 'static {
    /// Namespaced event name, `"<context>.<subject>.<action>"`.
    fn event_name(&self) -> &'static str;

    /// When the fact occurred (caller-supplied, never read from a clock).
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Upcast for handler-side downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A pulled or published event, shared with subscribers.
pub type DynEvent = Arc<dyn DomainEvent>;

/// Buffer of not-yet-published domain events.
///
/// Embedded as a private field in each aggregate; only the code path owning
/// that aggregate may touch it, so it carries no locking of its own.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<DynEvent>,
}

impl EventRecorder {
    /// Appends an event to the buffer.
    pub fn record<E: DomainEvent>(&mut self, event: E) {
        self.events.push(Arc::new(event));
    }

    /// Returns the accumulated events in recording order and clears the
    /// buffer. A second consecutive call returns an empty vec.
    pub fn pull_events(&mut self) -> Vec<DynEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of events waiting to be pulled.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

// Pending events belong to the instance that recorded them. Repositories
// store value clones of aggregates; those snapshots must never re-publish,
// so a clone starts with an empty buffer.
impl Clone for EventRecorder {
    fn clone(&self) -> Self {
        Self::default()
    }
}
