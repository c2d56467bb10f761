//! Demo binary: drives every bounded context through its usual affairs.

use app::App;
use chrono::{Duration, Utc};
use theater::{Seat, SeatTier};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = App::build().await;
    let now = Utc::now();

    // Reservation context.
    let reservation = app
        .reservations
        .reserve_workspace(
            "res-1001",
            "workspace-42",
            "customer-7",
            now + Duration::hours(48),
            now + Duration::hours(56),
            now,
        )
        .await
        .expect("reserve workspace");
    app.reservations
        .confirm_reservation(reservation.id(), now + Duration::hours(1))
        .await
        .expect("confirm reservation");

    // Theater context: one standard and one VIP seat.
    app.theater
        .schedule_show(
            "show-1",
            "Foundations of DDD",
            now + Duration::hours(72),
            vec![
                Seat::new("A1", SeatTier::Standard, 2500),
                Seat::new("A2", SeatTier::Vip, 5000),
            ],
        )
        .await
        .expect("schedule show");

    app.theater
        .purchase_seat("show-1", "customer-7", "A1", now + Duration::hours(2))
        .await
        .expect("purchase standard seat");
    let vip_ticket = app
        .theater
        .purchase_seat("show-1", "customer-7", "A2", now + Duration::hours(3))
        .await
        .expect("purchase vip seat");
    tracing::info!(
        ticket_id = %vip_ticket.id,
        free_coffee = vip_ticket.includes_free_coffee,
        "vip ticket sold"
    );

    // Kitchen context: a paid order, then redeeming the voucher the VIP
    // purchase triggered through the bus.
    app.kitchen
        .place_paid_order("order-paid-1", "customer-7", "espresso", 450, now + Duration::hours(4))
        .await
        .expect("place paid order");

    let voucher_id = format!("free-coffee-{}", vip_ticket.id);
    let free_order = app
        .kitchen
        .redeem_voucher(&voucher_id, "order-free-1", "cappuccino", now + Duration::hours(5))
        .await
        .expect("redeem voucher");

    let vouchers = app
        .kitchen
        .list_vouchers_by_customer("customer-7")
        .await
        .expect("list vouchers");
    let orders = app
        .kitchen
        .list_orders_by_customer("customer-7")
        .await
        .expect("list orders");

    tracing::info!(
        vouchers = vouchers.len(),
        orders = orders.len(),
        free_drink = free_order.drink(),
        "demo finished"
    );
}
