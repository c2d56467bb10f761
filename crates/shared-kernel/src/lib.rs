//! Shared kernel for the bounded contexts.
//!
//! This crate provides the pieces every context depends on:
//! - `DomainEvent` trait and the `EventRecorder` aggregates embed
//! - `EventBus` / `EventHandler` abstractions for cross-context reactions
//! - `InMemoryEventBus`, the in-process fan-out implementation

pub mod bus;
pub mod event;
pub mod memory;

pub use bus::{EventBus, EventHandler, HandlerError, PublishError};
pub use event::{DomainEvent, DynEvent, EventRecorder};
pub use memory::InMemoryEventBus;
