//! Wiring for the bounded contexts.
//!
//! Builds the in-memory repositories, the services, and the shared event
//! bus, and registers the cross-context subscriptions. The bus is an
//! explicitly injected object, never a hidden global; tests call
//! [`App::build`] to get an isolated universe per case.

use std::sync::Arc;

use kitchen::{
    InMemoryOrderRepository, InMemoryVoucherRepository, KitchenService, VipSeatPurchasedHandler,
};
use reservation::{InMemoryReservationRepository, ReservationService};
use shared_kernel::{EventBus, InMemoryEventBus};
use theater::{InMemoryShowRepository, TheaterService, VIP_SEAT_PURCHASED};

/// The wired services sharing one event bus.
pub struct App {
    pub bus: Arc<InMemoryEventBus>,
    pub reservations: Arc<ReservationService>,
    pub theater: Arc<TheaterService>,
    pub kitchen: Arc<KitchenService>,
}

impl App {
    /// Builds the services with in-memory storage and subscribes the kitchen
    /// to VIP seat purchases. Subscriptions are registered here, before any
    /// service call can emit the subscribed events.
    pub async fn build() -> Self {
        let bus = Arc::new(InMemoryEventBus::new());

        let reservations = Arc::new(ReservationService::new(
            Arc::new(InMemoryReservationRepository::new()),
            bus.clone(),
        ));
        let theater = Arc::new(TheaterService::new(
            Arc::new(InMemoryShowRepository::new()),
            bus.clone(),
        ));
        let kitchen = Arc::new(KitchenService::new(
            Arc::new(InMemoryVoucherRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
            bus.clone(),
        ));

        bus.subscribe(
            VIP_SEAT_PURCHASED,
            Arc::new(VipSeatPurchasedHandler::new(kitchen.clone())),
        )
        .await;

        Self {
            bus,
            reservations,
            theater,
            kitchen,
        }
    }
}
