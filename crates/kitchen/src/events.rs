//! Kitchen domain events.

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::DomainEvent;

pub const COMPLIMENTARY_COFFEE_ISSUED: &str = "kitchen.complimentary.coffee.issued";
pub const COFFEE_VOUCHER_REDEEMED: &str = "kitchen.coffee.voucher.redeemed";
pub const PAID_COFFEE_ORDERED: &str = "kitchen.coffee.paid.ordered";

/// A complimentary coffee voucher was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplimentaryCoffeeIssued {
    pub voucher_id: String,
    pub customer_id: String,
    pub source: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for ComplimentaryCoffeeIssued {
    fn event_name(&self) -> &'static str {
        COMPLIMENTARY_COFFEE_ISSUED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A voucher was redeemed for a complimentary drink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoffeeVoucherRedeemed {
    pub voucher_id: String,
    pub customer_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for CoffeeVoucherRedeemed {
    fn event_name(&self) -> &'static str {
        COFFEE_VOUCHER_REDEEMED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A paid coffee order was placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaidCoffeeOrdered {
    pub order_id: String,
    pub customer_id: String,
    pub drink: String,
    pub price_cents: i64,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for PaidCoffeeOrdered {
    fn event_name(&self) -> &'static str {
        PAID_COFFEE_ORDERED
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
