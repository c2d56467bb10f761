//! Kitchen application service and the cross-context VIP handler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_kernel::{DynEvent, EventBus, EventHandler, HandlerError};
use theater::VipSeatPurchased;

use crate::error::KitchenError;
use crate::order::CoffeeOrder;
use crate::repository::{OrderRepository, VoucherRepository};
use crate::voucher::CoffeeVoucher;

/// Orchestrates voucher issuance/redemption and coffee orders.
pub struct KitchenService {
    voucher_repository: Arc<dyn VoucherRepository>,
    order_repository: Arc<dyn OrderRepository>,
    bus: Arc<dyn EventBus>,
}

impl KitchenService {
    pub fn new(
        voucher_repository: Arc<dyn VoucherRepository>,
        order_repository: Arc<dyn OrderRepository>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            voucher_repository,
            order_repository,
            bus,
        }
    }

    /// Issues a complimentary coffee voucher.
    #[tracing::instrument(skip(self))]
    pub async fn issue_complimentary_coffee(
        &self,
        voucher_id: &str,
        customer_id: &str,
        source: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<CoffeeVoucher, KitchenError> {
        let mut voucher = CoffeeVoucher::new(voucher_id, customer_id, source, issued_at)?;
        self.voucher_repository.save(&voucher).await?;

        let events = voucher.pull_events();
        self.publish(events).await?;

        tracing::info!(voucher_id, customer_id, "complimentary coffee issued");
        Ok(voucher)
    }

    /// Places a paid coffee order.
    #[tracing::instrument(skip(self))]
    pub async fn place_paid_order(
        &self,
        order_id: &str,
        customer_id: &str,
        drink: &str,
        price_cents: i64,
        ordered_at: DateTime<Utc>,
    ) -> Result<CoffeeOrder, KitchenError> {
        let mut order = CoffeeOrder::paid(order_id, customer_id, drink, price_cents, ordered_at)?;
        self.order_repository.save(&order).await?;

        let events = order.pull_events();
        self.publish(events).await?;

        Ok(order)
    }

    /// Redeems a voucher for a complimentary drink.
    ///
    /// Persists both the redeemed voucher and the resulting order, then
    /// publishes the voucher's events followed by the order's.
    #[tracing::instrument(skip(self))]
    pub async fn redeem_voucher(
        &self,
        voucher_id: &str,
        order_id: &str,
        drink: &str,
        redeemed_at: DateTime<Utc>,
    ) -> Result<CoffeeOrder, KitchenError> {
        let mut voucher = self.voucher_repository.get_by_id(voucher_id).await?;
        voucher.redeem(redeemed_at)?;

        let mut order =
            CoffeeOrder::complimentary(order_id, voucher.customer_id(), drink, redeemed_at)?;

        self.voucher_repository.save(&voucher).await?;
        self.order_repository.save(&order).await?;

        let mut events = voucher.pull_events();
        events.extend(order.pull_events());
        self.publish(events).await?;

        Ok(order)
    }

    /// All vouchers belonging to a customer.
    pub async fn list_vouchers_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<CoffeeVoucher>, KitchenError> {
        self.voucher_repository.list_by_customer(customer_id).await
    }

    /// All orders belonging to a customer.
    pub async fn list_orders_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<CoffeeOrder>, KitchenError> {
        self.order_repository.list_by_customer(customer_id).await
    }

    async fn publish(&self, events: Vec<DynEvent>) -> Result<(), KitchenError> {
        if events.is_empty() {
            return Ok(());
        }
        self.bus.publish(&events).await.map_err(Into::into)
    }
}

/// Reacts to the theater's `VipSeatPurchased` by issuing a free coffee
/// voucher with a deterministic id, `"free-coffee-<ticket_id>"`.
///
/// Because the id is derived from the ticket, redelivery of the same event
/// hits the repository's `VoucherAlreadyExists` contract and is treated as an
/// already-issued no-op. Wiring code subscribes this handler to
/// `theater::VIP_SEAT_PURCHASED`.
pub struct VipSeatPurchasedHandler {
    kitchen: Arc<KitchenService>,
}

impl VipSeatPurchasedHandler {
    pub fn new(kitchen: Arc<KitchenService>) -> Self {
        Self { kitchen }
    }
}

#[async_trait]
impl EventHandler for VipSeatPurchasedHandler {
    async fn handle(&self, event: &DynEvent) -> Result<(), HandlerError> {
        let Some(vip) = event.as_any().downcast_ref::<VipSeatPurchased>() else {
            return Ok(());
        };

        let voucher_id = format!("free-coffee-{}", vip.ticket_id);
        let source = format!("VIP seat {} for show {}", vip.seat_number, vip.show_id);

        match self
            .kitchen
            .issue_complimentary_coffee(&voucher_id, &vip.customer_id, &source, vip.occurred_at)
            .await
        {
            Ok(_) => Ok(()),
            Err(KitchenError::VoucherAlreadyExists { id }) => {
                tracing::debug!(voucher_id = %id, "voucher already issued, skipping");
                Ok(())
            }
            Err(err) => Err(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use shared_kernel::InMemoryEventBus;

    use super::*;
    use crate::repository::{InMemoryOrderRepository, InMemoryVoucherRepository};
    use crate::voucher::VoucherStatus;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    fn service() -> Arc<KitchenService> {
        Arc::new(KitchenService::new(
            Arc::new(InMemoryVoucherRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryEventBus::new()),
        ))
    }

    #[tokio::test]
    async fn issue_then_redeem_produces_a_complimentary_order() {
        let service = service();

        service
            .issue_complimentary_coffee("voucher-1", "member-1", "loyalty program", noon())
            .await
            .unwrap();

        let order = service
            .redeem_voucher("voucher-1", "order-1", "cappuccino", noon())
            .await
            .unwrap();
        assert!(order.is_complimentary());
        assert_eq!(order.price_cents(), 0);
        assert_eq!(order.customer_id(), "member-1");

        let vouchers = service.list_vouchers_by_customer("member-1").await.unwrap();
        assert_eq!(vouchers.len(), 1);
        assert_eq!(vouchers[0].status(), VoucherStatus::Redeemed);
        assert!(vouchers[0].redeemed_at().is_some());
    }

    #[tokio::test]
    async fn redeeming_twice_fails() {
        let service = service();
        service
            .issue_complimentary_coffee("voucher-1", "member-1", "loyalty program", noon())
            .await
            .unwrap();
        service
            .redeem_voucher("voucher-1", "order-1", "cappuccino", noon())
            .await
            .unwrap();

        let err = service
            .redeem_voucher("voucher-1", "order-2", "flat white", noon())
            .await
            .unwrap_err();
        assert!(matches!(err, KitchenError::VoucherNotRedeemable));
    }

    #[tokio::test]
    async fn redeeming_an_unknown_voucher_is_not_found() {
        let service = service();
        assert!(matches!(
            service
                .redeem_voucher("voucher-404", "order-1", "cappuccino", noon())
                .await,
            Err(KitchenError::VoucherNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn paid_orders_are_validated_and_listed() {
        let service = service();

        service
            .place_paid_order("order-1", "member-1", "espresso", 450, noon())
            .await
            .unwrap();
        let err = service
            .place_paid_order("order-2", "member-1", "espresso", 0, noon())
            .await
            .unwrap_err();
        assert!(matches!(err, KitchenError::InvalidOrderPrice { .. }));

        let orders = service.list_orders_by_customer("member-1").await.unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn vip_handler_issues_a_derived_voucher() {
        let service = service();
        let handler = VipSeatPurchasedHandler::new(service.clone());

        let event: DynEvent = Arc::new(VipSeatPurchased {
            ticket_id: "show-1-001".into(),
            show_id: "show-1".into(),
            customer_id: "member-77".into(),
            seat_number: "V1".into(),
            occurred_at: noon(),
        });

        handler.handle(&event).await.unwrap();

        let voucher = service
            .list_vouchers_by_customer("member-77")
            .await
            .unwrap()
            .pop()
            .unwrap();
        assert_eq!(voucher.id(), "free-coffee-show-1-001");
        assert_eq!(voucher.source(), "VIP seat V1 for show show-1");
        assert_eq!(voucher.status(), VoucherStatus::Issued);
    }

    #[tokio::test]
    async fn vip_handler_is_idempotent_under_redelivery() {
        let service = service();
        let handler = VipSeatPurchasedHandler::new(service.clone());

        let event: DynEvent = Arc::new(VipSeatPurchased {
            ticket_id: "show-1-001".into(),
            show_id: "show-1".into(),
            customer_id: "member-77".into(),
            seat_number: "V1".into(),
            occurred_at: noon(),
        });

        handler.handle(&event).await.unwrap();
        // Redelivery: no error, no duplicate voucher.
        handler.handle(&event).await.unwrap();

        let vouchers = service
            .list_vouchers_by_customer("member-77")
            .await
            .unwrap();
        assert_eq!(vouchers.len(), 1);
    }

    #[tokio::test]
    async fn vip_handler_ignores_other_events() {
        let service = service();
        let handler = VipSeatPurchasedHandler::new(service.clone());

        let event: DynEvent = Arc::new(theater::SeatPurchased {
            ticket_id: "show-1-001".into(),
            show_id: "show-1".into(),
            customer_id: "member-77".into(),
            seat_number: "A1".into(),
            price_cents: 2500,
            occurred_at: noon(),
        });

        handler.handle(&event).await.unwrap();
        assert!(service
            .list_vouchers_by_customer("member-77")
            .await
            .unwrap()
            .is_empty());
    }
}
