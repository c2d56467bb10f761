//! Kitchen error types.

use shared_kernel::PublishError;
use thiserror::Error;

/// Errors that can occur during voucher and order operations.
#[derive(Debug, Error)]
pub enum KitchenError {
    /// Voucher id is required.
    #[error("voucher id is required")]
    VoucherIdRequired,

    /// Voucher customer id is required.
    #[error("voucher customer id is required")]
    VoucherCustomerRequired,

    /// Voucher source description is required.
    #[error("voucher source is required")]
    VoucherSourceRequired,

    /// Only issued vouchers can be redeemed; the transition is one-way.
    #[error("voucher is not redeemable")]
    VoucherNotRedeemable,

    /// No voucher with the given id exists.
    #[error("voucher not found: {id}")]
    VoucherNotFound { id: String },

    /// A voucher with this id is already stored. The VIP handler treats this
    /// as already-issued and succeeds.
    #[error("voucher already exists: {id}")]
    VoucherAlreadyExists { id: String },

    /// The voucher was modified concurrently; reload and retry.
    #[error("voucher {id} was modified concurrently")]
    VoucherConflict { id: String },

    /// Order id is required.
    #[error("order id is required")]
    OrderIdRequired,

    /// Order customer id is required.
    #[error("order customer id is required")]
    OrderCustomerRequired,

    /// A drink is required.
    #[error("drink is required")]
    DrinkRequired,

    /// Paid orders need a strictly positive price.
    #[error("order price must be positive: {cents}")]
    InvalidOrderPrice { cents: i64 },

    /// No order with the given id exists.
    #[error("order not found: {id}")]
    OrderNotFound { id: String },

    /// An order with this id is already stored.
    #[error("order already exists: {id}")]
    OrderAlreadyExists { id: String },

    /// A subscriber failed while the kitchen's events were published.
    #[error(transparent)]
    Publish(#[from] PublishError),
}
