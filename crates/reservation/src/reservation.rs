//! Reservation aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::{DynEvent, EventRecorder};

use crate::error::ReservationError;
use crate::events::{ReservationCanceled, ReservationConfirmed, ReservationCreated};

/// Lifecycle state of a reservation. Cancellation is a state, not a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member's hold on a workspace over `[starts_at, ends_at)`.
///
/// The time range is immutable after creation. The aggregate never touches a
/// repository or the bus; it validates, mutates its own state, and records
/// events for the service to publish.
#[derive(Debug, Clone)]
pub struct Reservation {
    recorder: EventRecorder,
    id: String,
    workspace_id: String,
    member_id: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    status: ReservationStatus,
    cancel_reason: Option<String>,
}

impl Reservation {
    /// Creates a pending reservation and records `ReservationCreated`.
    ///
    /// Fails before any event is recorded if an id is empty or the range is
    /// empty/inverted.
    pub fn new(
        id: impl Into<String>,
        workspace_id: impl Into<String>,
        member_id: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, ReservationError> {
        let id = id.into();
        let workspace_id = workspace_id.into();
        let member_id = member_id.into();

        if id.is_empty() {
            return Err(ReservationError::IdRequired);
        }
        if workspace_id.is_empty() {
            return Err(ReservationError::WorkspaceRequired);
        }
        if member_id.is_empty() {
            return Err(ReservationError::MemberRequired);
        }
        if starts_at >= ends_at {
            return Err(ReservationError::InvalidTimeRange);
        }

        let mut reservation = Self {
            recorder: EventRecorder::default(),
            id,
            workspace_id,
            member_id,
            starts_at,
            ends_at,
            status: ReservationStatus::Pending,
            cancel_reason: None,
        };

        reservation.recorder.record(ReservationCreated {
            reservation_id: reservation.id.clone(),
            workspace_id: reservation.workspace_id.clone(),
            member_id: reservation.member_id.clone(),
            starts_at,
            ends_at,
            occurred_at: now,
        });

        Ok(reservation)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    /// A canceled reservation no longer blocks its slot.
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Canceled
    }

    /// Half-open interval overlap: a reservation ending exactly when another
    /// starts does not conflict.
    pub fn overlaps(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        starts_at < self.ends_at && self.starts_at < ends_at
    }

    /// Confirms a pending reservation and records `ReservationConfirmed`.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<(), ReservationError> {
        if self.status != ReservationStatus::Pending {
            return Err(ReservationError::CannotConfirm {
                status: self.status,
            });
        }

        self.status = ReservationStatus::Confirmed;
        self.recorder.record(ReservationConfirmed {
            reservation_id: self.id.clone(),
            occurred_at: now,
        });

        Ok(())
    }

    /// Cancels the reservation and records `ReservationCanceled`.
    ///
    /// Canceling a confirmed reservation is allowed; canceling twice is not.
    /// The reason is required regardless of current status.
    pub fn cancel(&mut self, reason: impl Into<String>, now: DateTime<Utc>) -> Result<(), ReservationError> {
        let reason = reason.into();
        if reason.is_empty() {
            return Err(ReservationError::CancelReasonRequired);
        }
        if self.status == ReservationStatus::Canceled {
            return Err(ReservationError::CannotCancel);
        }

        self.status = ReservationStatus::Canceled;
        self.cancel_reason = Some(reason.clone());
        self.recorder.record(ReservationCanceled {
            reservation_id: self.id.clone(),
            reason,
            occurred_at: now,
        });

        Ok(())
    }

    /// Hands the recorded events to the caller and clears the buffer.
    pub fn pull_events(&mut self) -> Vec<DynEvent> {
        self.recorder.pull_events()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::events::RESERVATION_CREATED;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap()
    }

    fn pending() -> Reservation {
        Reservation::new("res-1", "ws-1", "member-1", at(9), at(11), at(8)).unwrap()
    }

    #[test]
    fn new_reservation_is_pending_with_a_single_created_event() {
        let mut reservation = pending();

        assert_eq!(reservation.status(), ReservationStatus::Pending);
        assert!(reservation.is_active());

        let events = reservation.pull_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_name(), RESERVATION_CREATED);
        assert_eq!(events[0].occurred_at(), at(8));
    }

    #[test]
    fn empty_ids_are_rejected_before_recording_anything() {
        assert!(matches!(
            Reservation::new("", "ws-1", "member-1", at(9), at(11), at(8)),
            Err(ReservationError::IdRequired)
        ));
        assert!(matches!(
            Reservation::new("res-1", "", "member-1", at(9), at(11), at(8)),
            Err(ReservationError::WorkspaceRequired)
        ));
        assert!(matches!(
            Reservation::new("res-1", "ws-1", "", at(9), at(11), at(8)),
            Err(ReservationError::MemberRequired)
        ));
    }

    #[test]
    fn equal_or_inverted_range_is_invalid() {
        assert!(matches!(
            Reservation::new("res-1", "ws-1", "member-1", at(9), at(9), at(8)),
            Err(ReservationError::InvalidTimeRange)
        ));
        assert!(matches!(
            Reservation::new("res-1", "ws-1", "member-1", at(11), at(9), at(8)),
            Err(ReservationError::InvalidTimeRange)
        ));
    }

    #[test]
    fn overlap_uses_half_open_intervals() {
        let reservation = pending(); // [9, 11)

        assert!(reservation.overlaps(at(10), at(12)));
        assert!(reservation.overlaps(at(8), at(10)));
        assert!(reservation.overlaps(at(9), at(11)));
        // Adjacent ranges are allowed.
        assert!(!reservation.overlaps(at(11), at(13)));
        assert!(!reservation.overlaps(at(7), at(9)));
    }

    #[test]
    fn confirm_moves_pending_to_confirmed() {
        let mut reservation = pending();
        reservation.pull_events();

        reservation.confirm(at(8) + Duration::minutes(5)).unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Confirmed);
        let events = reservation.pull_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_name(), "reservation.confirmed");
    }

    #[test]
    fn confirm_rejects_non_pending_states() {
        let mut reservation = pending();
        reservation.confirm(at(8)).unwrap();

        assert!(matches!(
            reservation.confirm(at(8)),
            Err(ReservationError::CannotConfirm {
                status: ReservationStatus::Confirmed
            })
        ));

        reservation.cancel("plans changed", at(8)).unwrap();
        assert!(matches!(
            reservation.confirm(at(8)),
            Err(ReservationError::CannotConfirm {
                status: ReservationStatus::Canceled
            })
        ));
    }

    #[test]
    fn cancel_requires_a_reason_regardless_of_status() {
        let mut reservation = pending();
        assert!(matches!(
            reservation.cancel("", at(8)),
            Err(ReservationError::CancelReasonRequired)
        ));

        reservation.cancel("plans changed", at(8)).unwrap();
        // Reason check still fires before the status check.
        assert!(matches!(
            reservation.cancel("", at(8)),
            Err(ReservationError::CancelReasonRequired)
        ));
    }

    #[test]
    fn cancel_allows_confirmed_but_not_canceled() {
        let mut reservation = pending();
        reservation.confirm(at(8)).unwrap();

        reservation.cancel("member asked", at(8)).unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Canceled);
        assert_eq!(reservation.cancel_reason(), Some("member asked"));
        assert!(!reservation.is_active());

        assert!(matches!(
            reservation.cancel("again", at(8)),
            Err(ReservationError::CannotCancel)
        ));
    }

    #[test]
    fn pull_events_drains_once() {
        let mut reservation = pending();
        reservation.confirm(at(8)).unwrap();

        assert_eq!(reservation.pull_events().len(), 2);
        assert!(reservation.pull_events().is_empty());
    }

    #[test]
    fn failed_mutation_records_no_event() {
        let mut reservation = pending();
        reservation.pull_events();

        let _ = reservation.cancel("", at(8));
        assert!(reservation.pull_events().is_empty());
    }
}
