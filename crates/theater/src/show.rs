//! Show aggregate and its seat/ticket values.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::{DynEvent, EventRecorder};

use crate::error::ShowError;
use crate::events::{SeatPurchased, VipSeatPurchased};

/// Pricing tier of a seat. VIP purchases earn a complimentary coffee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatTier {
    Standard,
    Vip,
}

/// An unsold seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub number: String,
    pub tier: SeatTier,
    pub price_cents: i64,
}

impl Seat {
    pub fn new(number: impl Into<String>, tier: SeatTier, price_cents: i64) -> Self {
        Self {
            number: number.into(),
            tier,
            price_cents,
        }
    }
}

/// Proof of purchase for a sold seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub show_id: String,
    pub customer_id: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub includes_free_coffee: bool,
    pub purchased_at: DateTime<Utc>,
}

/// A scheduled show with its unsold seats and sold tickets.
///
/// A seat number is unique at construction; once sold it leaves the unsold
/// mapping and can never be resold. Ticket ids are `"<show_id>-<seq>"` with a
/// three-digit sequence, assigned from the count of already-sold tickets; the
/// repository's versioned save serializes that assignment against concurrent
/// purchases.
#[derive(Debug, Clone)]
pub struct Show {
    recorder: EventRecorder,
    id: String,
    title: String,
    starts_at: DateTime<Utc>,
    available_seats: HashMap<String, Seat>,
    sold_tickets: HashMap<String, Ticket>,
    version: u64,
}

impl Show {
    /// Creates a show with its initial seat configuration. Records no event.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
        seats: Vec<Seat>,
    ) -> Result<Self, ShowError> {
        let id = id.into();
        let title = title.into();

        if id.is_empty() {
            return Err(ShowError::IdRequired);
        }
        if title.is_empty() {
            return Err(ShowError::TitleRequired);
        }
        if seats.is_empty() {
            return Err(ShowError::NoSeatsConfigured);
        }

        let mut available_seats = HashMap::with_capacity(seats.len());
        for seat in seats {
            if seat.number.is_empty() {
                return Err(ShowError::SeatNumberRequired);
            }
            if seat.price_cents <= 0 {
                return Err(ShowError::InvalidSeatPrice {
                    cents: seat.price_cents,
                });
            }
            if available_seats.contains_key(&seat.number) {
                return Err(ShowError::DuplicateSeatNumber {
                    number: seat.number,
                });
            }
            available_seats.insert(seat.number.clone(), seat);
        }

        Ok(Self {
            recorder: EventRecorder::default(),
            id,
            title,
            starts_at,
            available_seats,
            sold_tickets: HashMap::new(),
            version: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Count of seats still for sale.
    pub fn remaining_seats(&self) -> usize {
        self.available_seats.len()
    }

    pub fn sold_tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.sold_tickets.values()
    }

    /// Optimistic-concurrency counter; 0 until first persisted.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set by the repository when a persisted copy is stored or loaded.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Sells a seat, minting a ticket and recording `SeatPurchased` (plus
    /// `VipSeatPurchased` for VIP seats, in that order).
    pub fn purchase_seat(
        &mut self,
        customer_id: impl Into<String>,
        seat_number: &str,
        purchased_at: DateTime<Utc>,
    ) -> Result<Ticket, ShowError> {
        let customer_id = customer_id.into();
        if customer_id.is_empty() {
            return Err(ShowError::CustomerRequired);
        }

        let seat = self
            .available_seats
            .remove(seat_number)
            .ok_or_else(|| ShowError::SeatNotFound {
                number: seat_number.to_owned(),
            })?;

        let ticket_id = format!("{}-{:03}", self.id, self.sold_tickets.len() + 1);
        let ticket = Ticket {
            id: ticket_id.clone(),
            show_id: self.id.clone(),
            customer_id: customer_id.clone(),
            seat_number: seat.number.clone(),
            price_cents: seat.price_cents,
            includes_free_coffee: seat.tier == SeatTier::Vip,
            purchased_at,
        };
        self.sold_tickets.insert(ticket_id.clone(), ticket.clone());

        self.recorder.record(SeatPurchased {
            ticket_id: ticket_id.clone(),
            show_id: self.id.clone(),
            customer_id: customer_id.clone(),
            seat_number: seat.number.clone(),
            price_cents: seat.price_cents,
            occurred_at: purchased_at,
        });
        if seat.tier == SeatTier::Vip {
            self.recorder.record(VipSeatPurchased {
                ticket_id,
                show_id: self.id.clone(),
                customer_id,
                seat_number: seat.number,
                occurred_at: purchased_at,
            });
        }

        Ok(ticket)
    }

    /// Hands the recorded events to the caller and clears the buffer.
    pub fn pull_events(&mut self) -> Vec<DynEvent> {
        self.recorder.pull_events()
    }
}
