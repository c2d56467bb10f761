//! CoffeeOrder aggregate.

use chrono::{DateTime, Utc};
use shared_kernel::{DynEvent, EventRecorder};

use crate::error::KitchenError;
use crate::events::PaidCoffeeOrdered;

/// A coffee order, paid or complimentary. Immutable after construction.
#[derive(Debug, Clone)]
pub struct CoffeeOrder {
    recorder: EventRecorder,
    id: String,
    customer_id: String,
    drink: String,
    price_cents: i64,
    complimentary: bool,
    created_at: DateTime<Utc>,
}

impl CoffeeOrder {
    /// Places a paid order and records `PaidCoffeeOrdered`.
    pub fn paid(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        drink: impl Into<String>,
        price_cents: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, KitchenError> {
        let mut order = Self::build(id, customer_id, drink, price_cents, false, created_at)?;
        if order.price_cents <= 0 {
            return Err(KitchenError::InvalidOrderPrice {
                cents: order.price_cents,
            });
        }

        order.recorder.record(PaidCoffeeOrdered {
            order_id: order.id.clone(),
            customer_id: order.customer_id.clone(),
            drink: order.drink.clone(),
            price_cents: order.price_cents,
            occurred_at: created_at,
        });

        Ok(order)
    }

    /// Places a complimentary order (price 0). Records no event of its own;
    /// the voucher redemption that produced it carries the fact.
    pub fn complimentary(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        drink: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, KitchenError> {
        Self::build(id, customer_id, drink, 0, true, created_at)
    }

    fn build(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        drink: impl Into<String>,
        price_cents: i64,
        complimentary: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, KitchenError> {
        let id = id.into();
        let customer_id = customer_id.into();
        let drink = drink.into();

        if id.is_empty() {
            return Err(KitchenError::OrderIdRequired);
        }
        if customer_id.is_empty() {
            return Err(KitchenError::OrderCustomerRequired);
        }
        if drink.is_empty() {
            return Err(KitchenError::DrinkRequired);
        }

        Ok(Self {
            recorder: EventRecorder::default(),
            id,
            customer_id,
            drink,
            price_cents,
            complimentary,
            created_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn drink(&self) -> &str {
        &self.drink
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn is_complimentary(&self) -> bool {
        self.complimentary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Hands the recorded events to the caller and clears the buffer.
    pub fn pull_events(&mut self) -> Vec<DynEvent> {
        self.recorder.pull_events()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::events::PAID_COFFEE_ORDERED;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn paid_order_records_one_event() {
        let mut order = CoffeeOrder::paid("order-1", "member-1", "espresso", 450, noon()).unwrap();

        assert!(!order.is_complimentary());
        assert_eq!(order.price_cents(), 450);

        let events = order.pull_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_name(), PAID_COFFEE_ORDERED);
    }

    #[test]
    fn paid_order_requires_a_positive_price() {
        assert!(matches!(
            CoffeeOrder::paid("order-1", "member-1", "espresso", 0, noon()),
            Err(KitchenError::InvalidOrderPrice { cents: 0 })
        ));
        assert!(matches!(
            CoffeeOrder::paid("order-1", "member-1", "espresso", -100, noon()),
            Err(KitchenError::InvalidOrderPrice { .. })
        ));
    }

    #[test]
    fn complimentary_order_is_free_and_silent() {
        let mut order =
            CoffeeOrder::complimentary("order-1", "member-1", "cappuccino", noon()).unwrap();

        assert!(order.is_complimentary());
        assert_eq!(order.price_cents(), 0);
        assert!(order.pull_events().is_empty());
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(
            CoffeeOrder::paid("", "member-1", "espresso", 450, noon()),
            Err(KitchenError::OrderIdRequired)
        ));
        assert!(matches!(
            CoffeeOrder::complimentary("order-1", "", "espresso", noon()),
            Err(KitchenError::OrderCustomerRequired)
        ));
        assert!(matches!(
            CoffeeOrder::complimentary("order-1", "member-1", "", noon()),
            Err(KitchenError::DrinkRequired)
        ));
    }
}
