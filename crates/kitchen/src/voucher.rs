//! CoffeeVoucher aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::{DynEvent, EventRecorder};

use crate::error::KitchenError;
use crate::events::{CoffeeVoucherRedeemed, ComplimentaryCoffeeIssued};

/// Lifecycle state of a voucher. Redemption is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherStatus {
    Issued,
    Redeemed,
}

impl VoucherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherStatus::Issued => "issued",
            VoucherStatus::Redeemed => "redeemed",
        }
    }
}

impl std::fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A complimentary coffee entitlement for a customer.
///
/// The source records what earned it (e.g. which VIP seat). When the voucher
/// is issued in reaction to a theater event, its id is derived from the
/// ticket id, which is what makes redelivery idempotent at the repository.
#[derive(Debug, Clone)]
pub struct CoffeeVoucher {
    recorder: EventRecorder,
    id: String,
    customer_id: String,
    source: String,
    status: VoucherStatus,
    issued_at: DateTime<Utc>,
    redeemed_at: Option<DateTime<Utc>>,
    version: u64,
}

impl CoffeeVoucher {
    /// Issues a voucher and records `ComplimentaryCoffeeIssued`.
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        source: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, KitchenError> {
        let id = id.into();
        let customer_id = customer_id.into();
        let source = source.into();

        if id.is_empty() {
            return Err(KitchenError::VoucherIdRequired);
        }
        if customer_id.is_empty() {
            return Err(KitchenError::VoucherCustomerRequired);
        }
        if source.is_empty() {
            return Err(KitchenError::VoucherSourceRequired);
        }

        let mut voucher = Self {
            recorder: EventRecorder::default(),
            id,
            customer_id,
            source,
            status: VoucherStatus::Issued,
            issued_at,
            redeemed_at: None,
            version: 0,
        };

        voucher.recorder.record(ComplimentaryCoffeeIssued {
            voucher_id: voucher.id.clone(),
            customer_id: voucher.customer_id.clone(),
            source: voucher.source.clone(),
            occurred_at: issued_at,
        });

        Ok(voucher)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn status(&self) -> VoucherStatus {
        self.status
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn redeemed_at(&self) -> Option<DateTime<Utc>> {
        self.redeemed_at
    }

    /// Optimistic-concurrency counter; 0 until first persisted.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set by the repository when a persisted copy is stored or loaded.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Redeems the voucher and records `CoffeeVoucherRedeemed`.
    pub fn redeem(&mut self, at: DateTime<Utc>) -> Result<(), KitchenError> {
        if self.status != VoucherStatus::Issued {
            return Err(KitchenError::VoucherNotRedeemable);
        }

        self.status = VoucherStatus::Redeemed;
        self.redeemed_at = Some(at);
        self.recorder.record(CoffeeVoucherRedeemed {
            voucher_id: self.id.clone(),
            customer_id: self.customer_id.clone(),
            occurred_at: at,
        });

        Ok(())
    }

    /// Hands the recorded events to the caller and clears the buffer.
    pub fn pull_events(&mut self) -> Vec<DynEvent> {
        self.recorder.pull_events()
    }
}
