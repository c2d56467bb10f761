//! Theater domain events.

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::DomainEvent;

pub const SEAT_PURCHASED: &str = "theater.seat.purchased";
pub const VIP_SEAT_PURCHASED: &str = "theater.seat.vip.purchased";

/// A seat was sold and a ticket minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatPurchased {
    pub ticket_id: String,
    pub show_id: String,
    pub customer_id: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for SeatPurchased {
    fn event_name(&self) -> &'static str {
        SEAT_PURCHASED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A VIP seat was sold. Always recorded after the matching `SeatPurchased`;
/// the kitchen context subscribes to this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipSeatPurchased {
    pub ticket_id: String,
    pub show_id: String,
    pub customer_id: String,
    pub seat_number: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for VipSeatPurchased {
    fn event_name(&self) -> &'static str {
        VIP_SEAT_PURCHASED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
