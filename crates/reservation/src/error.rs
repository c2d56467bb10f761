//! Reservation error types.

use shared_kernel::PublishError;
use thiserror::Error;

use crate::reservation::ReservationStatus;

/// Errors that can occur during reservation operations.
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Reservation id is required.
    #[error("reservation id is required")]
    IdRequired,

    /// Workspace id is required.
    #[error("workspace id is required")]
    WorkspaceRequired,

    /// Member id is required.
    #[error("member id is required")]
    MemberRequired,

    /// The time range is empty or inverted.
    #[error("starts_at must be before ends_at")]
    InvalidTimeRange,

    /// An active reservation for the workspace overlaps the requested range.
    #[error("reservation time conflicts with an existing reservation")]
    TimeConflict,

    /// Only pending reservations can be confirmed.
    #[error("only pending reservations can be confirmed (current status: {status})")]
    CannotConfirm { status: ReservationStatus },

    /// The reservation is already canceled.
    #[error("reservation is already canceled")]
    CannotCancel,

    /// Cancellation requires a reason.
    #[error("cancel reason is required")]
    CancelReasonRequired,

    /// No reservation with the given id exists.
    #[error("reservation not found: {id}")]
    NotFound { id: String },

    /// A subscriber failed while the reservation's events were published.
    #[error(transparent)]
    Publish(#[from] PublishError),
}
