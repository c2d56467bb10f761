//! Reservation application service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared_kernel::{DynEvent, EventBus};

use crate::error::ReservationError;
use crate::repository::ReservationRepository;
use crate::reservation::Reservation;

/// Orchestrates reservation use cases: validate via the aggregate, persist,
/// then publish the pulled events.
pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    bus: Arc<dyn EventBus>,
}

impl ReservationService {
    pub fn new(repository: Arc<dyn ReservationRepository>, bus: Arc<dyn EventBus>) -> Self {
        Self { repository, bus }
    }

    /// Reserves a workspace for a member over `[starts_at, ends_at)`.
    ///
    /// Validation failures return before the repository is touched. The
    /// conflict pre-check excludes the reservation's own id so a retry that
    /// reuses the id stays idempotent. Publish failures propagate after the
    /// reservation has been saved (at-least-once delivery).
    #[tracing::instrument(skip(self))]
    pub async fn reserve_workspace(
        &self,
        reservation_id: &str,
        workspace_id: &str,
        member_id: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Reservation, ReservationError> {
        let mut reservation = Reservation::new(
            reservation_id,
            workspace_id,
            member_id,
            starts_at,
            ends_at,
            now,
        )?;

        let has_conflict = self
            .repository
            .has_active_conflict(
                reservation.workspace_id(),
                reservation.starts_at(),
                reservation.ends_at(),
                reservation.id(),
            )
            .await?;
        if has_conflict {
            return Err(ReservationError::TimeConflict);
        }

        self.repository.save(&reservation).await?;

        let events = reservation.pull_events();
        self.publish(events).await?;

        tracing::info!(reservation_id, workspace_id, "workspace reserved");
        Ok(reservation)
    }

    /// Confirms a pending reservation.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_reservation(
        &self,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ReservationError> {
        let mut reservation = self.repository.get_by_id(reservation_id).await?;
        reservation.confirm(now)?;
        self.repository.save(&reservation).await?;

        let events = reservation.pull_events();
        self.publish(events).await
    }

    /// Cancels a reservation, freeing its slot for new reservations.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_reservation(
        &self,
        reservation_id: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ReservationError> {
        let mut reservation = self.repository.get_by_id(reservation_id).await?;
        reservation.cancel(reason, now)?;
        self.repository.save(&reservation).await?;

        let events = reservation.pull_events();
        self.publish(events).await
    }

    /// Loads a reservation by id.
    pub async fn get_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<Reservation, ReservationError> {
        self.repository.get_by_id(reservation_id).await
    }

    async fn publish(&self, events: Vec<DynEvent>) -> Result<(), ReservationError> {
        if events.is_empty() {
            return Ok(());
        }
        self.bus.publish(&events).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use shared_kernel::InMemoryEventBus;

    use super::*;
    use crate::repository::InMemoryReservationRepository;
    use crate::reservation::ReservationStatus;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap()
    }

    fn service() -> ReservationService {
        ReservationService::new(
            Arc::new(InMemoryReservationRepository::new()),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[tokio::test]
    async fn reserve_persists_a_pending_reservation() {
        let service = service();

        let reservation = service
            .reserve_workspace("res-1", "ws-1", "member-1", at(9), at(11), at(8))
            .await
            .unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Pending);

        let loaded = service.get_reservation("res-1").await.unwrap();
        assert_eq!(loaded.status(), ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn validation_failure_skips_the_repository() {
        let service = service();

        let err = service
            .reserve_workspace("res-1", "ws-1", "member-1", at(11), at(9), at(8))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::InvalidTimeRange));

        assert!(matches!(
            service.get_reservation("res-1").await,
            Err(ReservationError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn overlapping_reservations_conflict() {
        let service = service();
        service
            .reserve_workspace("res-1", "ws-1", "member-1", at(9), at(11), at(8))
            .await
            .unwrap();

        let err = service
            .reserve_workspace("res-2", "ws-1", "member-2", at(10), at(12), at(8))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::TimeConflict));
    }

    #[tokio::test]
    async fn adjacent_reservations_do_not_conflict() {
        let service = service();
        service
            .reserve_workspace("res-1", "ws-1", "member-1", at(9), at(11), at(8))
            .await
            .unwrap();

        service
            .reserve_workspace("res-2", "ws-1", "member-2", at(11), at(13), at(8))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancellation_frees_the_slot() {
        let service = service();
        service
            .reserve_workspace("res-1", "ws-1", "member-1", at(9), at(11), at(8))
            .await
            .unwrap();
        service
            .cancel_reservation("res-1", "plans changed", at(8))
            .await
            .unwrap();

        // The previously conflicting window is available again.
        service
            .reserve_workspace("res-2", "ws-1", "member-2", at(10), at(12), at(8))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn confirm_then_confirm_again_fails() {
        let service = service();
        service
            .reserve_workspace("res-1", "ws-1", "member-1", at(9), at(11), at(8))
            .await
            .unwrap();

        service.confirm_reservation("res-1", at(8)).await.unwrap();
        assert_eq!(
            service.get_reservation("res-1").await.unwrap().status(),
            ReservationStatus::Confirmed
        );

        let err = service.confirm_reservation("res-1", at(8)).await.unwrap_err();
        assert!(matches!(err, ReservationError::CannotConfirm { .. }));
    }

    #[tokio::test]
    async fn operations_on_unknown_ids_are_not_found() {
        let service = service();

        assert!(matches!(
            service.confirm_reservation("res-404", at(8)).await,
            Err(ReservationError::NotFound { .. })
        ));
        assert!(matches!(
            service.cancel_reservation("res-404", "why", at(8)).await,
            Err(ReservationError::NotFound { .. })
        ));
    }
}
