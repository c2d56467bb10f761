//! Theater error types.

use shared_kernel::PublishError;
use thiserror::Error;

/// Errors that can occur during show operations.
#[derive(Debug, Error)]
pub enum ShowError {
    /// Show id is required.
    #[error("show id is required")]
    IdRequired,

    /// Show title is required.
    #[error("show title is required")]
    TitleRequired,

    /// A show needs at least one seat.
    #[error("at least one seat is required")]
    NoSeatsConfigured,

    /// Every seat needs a number.
    #[error("seat number is required")]
    SeatNumberRequired,

    /// Seat prices must be strictly positive.
    #[error("seat price must be positive: {cents}")]
    InvalidSeatPrice { cents: i64 },

    /// Two seats share the same number.
    #[error("duplicate seat number: {number}")]
    DuplicateSeatNumber { number: String },

    /// Customer id is required.
    #[error("customer id is required")]
    CustomerRequired,

    /// The seat is absent from the unsold mapping (never configured, or
    /// already sold).
    #[error("seat is not available: {number}")]
    SeatNotFound { number: String },

    /// No show with the given id exists.
    #[error("show not found: {id}")]
    NotFound { id: String },

    /// A never-persisted show collides with an existing id.
    #[error("show already scheduled: {id}")]
    AlreadyScheduled { id: String },

    /// The show was modified concurrently; reload and retry.
    #[error("show {id} was modified concurrently")]
    Conflict { id: String },

    /// A subscriber failed while the show's events were published.
    #[error(transparent)]
    Publish(#[from] PublishError),
}
