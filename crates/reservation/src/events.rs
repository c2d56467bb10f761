//! Reservation domain events.

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::DomainEvent;

pub const RESERVATION_CREATED: &str = "reservation.created";
pub const RESERVATION_CONFIRMED: &str = "reservation.confirmed";
pub const RESERVATION_CANCELED: &str = "reservation.canceled";

/// A workspace was reserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreated {
    pub reservation_id: String,
    pub workspace_id: String,
    pub member_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for ReservationCreated {
    fn event_name(&self) -> &'static str {
        RESERVATION_CREATED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A pending reservation was confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfirmed {
    pub reservation_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for ReservationConfirmed {
    fn event_name(&self) -> &'static str {
        RESERVATION_CONFIRMED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A reservation was canceled, freeing its slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCanceled {
    pub reservation_id: String,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for ReservationCanceled {
    fn event_name(&self) -> &'static str {
        RESERVATION_CANCELED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
