//! Reservation bounded context.
//!
//! A `Reservation` holds a workspace for a member over a half-open time
//! range. The aggregate owns its lifecycle invariants; the repository owns
//! the one collection-wide invariant (no overlapping active reservations per
//! workspace); the service orchestrates validate → persist → publish.

mod error;
mod events;
mod repository;
mod reservation;
mod service;

pub use error::ReservationError;
pub use events::{
    RESERVATION_CANCELED, RESERVATION_CONFIRMED, RESERVATION_CREATED, ReservationCanceled,
    ReservationConfirmed, ReservationCreated,
};
pub use repository::{InMemoryReservationRepository, ReservationRepository};
pub use reservation::{Reservation, ReservationStatus};
pub use service::ReservationService;
