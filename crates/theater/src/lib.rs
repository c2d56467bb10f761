//! Theater bounded context.
//!
//! A `Show` owns its unsold seats and sold tickets. Selling a VIP seat
//! records an extra `VipSeatPurchased` event that the kitchen context reacts
//! to through the bus; the theater never calls the kitchen directly.

mod error;
mod events;
mod repository;
mod service;
mod show;

pub use error::ShowError;
pub use events::{SEAT_PURCHASED, SeatPurchased, VIP_SEAT_PURCHASED, VipSeatPurchased};
pub use repository::{InMemoryShowRepository, ShowRepository};
pub use service::TheaterService;
pub use show::{Seat, SeatTier, Show, Ticket};
