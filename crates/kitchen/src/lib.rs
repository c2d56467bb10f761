//! Kitchen bounded context.
//!
//! The kitchen issues and redeems coffee vouchers and takes coffee orders.
//! It reacts to the theater's `VipSeatPurchased` event through the bus; the
//! voucher id is derived from the ticket id so redelivery is idempotent.

mod error;
mod events;
mod order;
mod repository;
mod service;
mod voucher;

pub use error::KitchenError;
pub use events::{
    COMPLIMENTARY_COFFEE_ISSUED, COFFEE_VOUCHER_REDEEMED, CoffeeVoucherRedeemed,
    ComplimentaryCoffeeIssued, PAID_COFFEE_ORDERED, PaidCoffeeOrdered,
};
pub use order::CoffeeOrder;
pub use repository::{
    InMemoryOrderRepository, InMemoryVoucherRepository, OrderRepository, VoucherRepository,
};
pub use service::{KitchenService, VipSeatPurchasedHandler};
pub use voucher::{CoffeeVoucher, VoucherStatus};
