//! Voucher and order repository traits with in-memory implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::KitchenError;
use crate::order::CoffeeOrder;
use crate::voucher::CoffeeVoucher;

/// Identity-indexed storage for vouchers.
///
/// The save contract is what makes VIP voucher issuance idempotent: a
/// never-persisted voucher whose id is already stored is rejected with
/// `VoucherAlreadyExists`, which the VIP handler treats as success.
#[async_trait]
pub trait VoucherRepository: Send + Sync {
    /// Persists the voucher.
    ///
    /// Fails with `VoucherAlreadyExists` when a never-persisted voucher
    /// collides with a stored id, and with `VoucherConflict` when the stored
    /// version no longer matches the one this copy was loaded at.
    async fn save(&self, voucher: &CoffeeVoucher) -> Result<(), KitchenError>;

    /// Loads a voucher by id.
    async fn get_by_id(&self, id: &str) -> Result<CoffeeVoucher, KitchenError>;

    /// All vouchers belonging to a customer, in unspecified order.
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<CoffeeVoucher>, KitchenError>;
}

/// Identity-indexed storage for orders. Orders are immutable, so saves are
/// insert-only.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the order; a duplicate id fails with `OrderAlreadyExists`.
    async fn save(&self, order: &CoffeeOrder) -> Result<(), KitchenError>;

    /// Loads an order by id.
    async fn get_by_id(&self, id: &str) -> Result<CoffeeOrder, KitchenError>;

    /// All orders belonging to a customer, in unspecified order.
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<CoffeeOrder>, KitchenError>;
}

/// In-memory voucher store for tests and the demo wiring.
#[derive(Default)]
pub struct InMemoryVoucherRepository {
    vouchers: RwLock<HashMap<String, CoffeeVoucher>>,
}

impl InMemoryVoucherRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoucherRepository for InMemoryVoucherRepository {
    #[tracing::instrument(skip_all, fields(voucher.id = voucher.id()))]
    async fn save(&self, voucher: &CoffeeVoucher) -> Result<(), KitchenError> {
        let mut vouchers = self.vouchers.write().await;

        if let Some(existing) = vouchers.get(voucher.id()) {
            if voucher.version() == 0 {
                return Err(KitchenError::VoucherAlreadyExists {
                    id: voucher.id().to_owned(),
                });
            }
            if existing.version() != voucher.version() {
                return Err(KitchenError::VoucherConflict {
                    id: voucher.id().to_owned(),
                });
            }
        }

        let mut stored = voucher.clone();
        stored.set_version(voucher.version() + 1);
        vouchers.insert(stored.id().to_owned(), stored);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<CoffeeVoucher, KitchenError> {
        let vouchers = self.vouchers.read().await;
        vouchers
            .get(id)
            .cloned()
            .ok_or_else(|| KitchenError::VoucherNotFound { id: id.to_owned() })
    }

    #[tracing::instrument(skip(self))]
    async fn list_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<CoffeeVoucher>, KitchenError> {
        let vouchers = self.vouchers.read().await;
        Ok(vouchers
            .values()
            .filter(|voucher| voucher.customer_id() == customer_id)
            .cloned()
            .collect())
    }
}

/// In-memory order store for tests and the demo wiring.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, CoffeeOrder>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    #[tracing::instrument(skip_all, fields(order.id = order.id()))]
    async fn save(&self, order: &CoffeeOrder) -> Result<(), KitchenError> {
        let mut orders = self.orders.write().await;

        if orders.contains_key(order.id()) {
            return Err(KitchenError::OrderAlreadyExists {
                id: order.id().to_owned(),
            });
        }

        orders.insert(order.id().to_owned(), order.clone());
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<CoffeeOrder, KitchenError> {
        let orders = self.orders.read().await;
        orders
            .get(id)
            .cloned()
            .ok_or_else(|| KitchenError::OrderNotFound { id: id.to_owned() })
    }

    #[tracing::instrument(skip(self))]
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<CoffeeOrder>, KitchenError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|order| order.customer_id() == customer_id)
            .cloned()
            .collect())
    }
}
