//! Reservation repository trait and in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::ReservationError;
use crate::reservation::Reservation;

/// Identity-indexed storage for reservations.
///
/// The conflict query lives here rather than on the aggregate because it
/// spans the whole collection. A persistent implementation must honor the
/// same contracts, including the save-time conflict re-check.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persists the reservation, overwriting any entry with the same id.
    ///
    /// For an active reservation, the no-conflict invariant is re-validated
    /// atomically with the write (excluding the reservation's own id), so two
    /// racing reservations for an overlapping window cannot both land.
    async fn save(&self, reservation: &Reservation) -> Result<(), ReservationError>;

    /// Loads a reservation by id.
    async fn get_by_id(&self, id: &str) -> Result<Reservation, ReservationError>;

    /// True iff some other non-canceled reservation for the workspace
    /// overlaps `[starts_at, ends_at)`.
    async fn has_active_conflict(
        &self,
        workspace_id: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        excluding_id: &str,
    ) -> Result<bool, ReservationError>;
}

/// In-memory reservation store for tests and the demo wiring.
#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: RwLock<HashMap<String, Reservation>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflicts_with(
    reservations: &HashMap<String, Reservation>,
    workspace_id: &str,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    excluding_id: &str,
) -> bool {
    reservations.values().any(|other| {
        other.id() != excluding_id
            && other.workspace_id() == workspace_id
            && other.is_active()
            && other.overlaps(starts_at, ends_at)
    })
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    #[tracing::instrument(skip_all, fields(reservation.id = reservation.id()))]
    async fn save(&self, reservation: &Reservation) -> Result<(), ReservationError> {
        let mut reservations = self.reservations.write().await;

        // Re-check under the exclusive lock: the service's advisory pre-check
        // and this save are otherwise not atomic against concurrent callers.
        if reservation.is_active()
            && conflicts_with(
                &reservations,
                reservation.workspace_id(),
                reservation.starts_at(),
                reservation.ends_at(),
                reservation.id(),
            )
        {
            return Err(ReservationError::TimeConflict);
        }

        reservations.insert(reservation.id().to_owned(), reservation.clone());
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Reservation, ReservationError> {
        let reservations = self.reservations.read().await;
        reservations
            .get(id)
            .cloned()
            .ok_or_else(|| ReservationError::NotFound { id: id.to_owned() })
    }

    #[tracing::instrument(skip(self))]
    async fn has_active_conflict(
        &self,
        workspace_id: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        excluding_id: &str,
    ) -> Result<bool, ReservationError> {
        let reservations = self.reservations.read().await;
        Ok(conflicts_with(
            &reservations,
            workspace_id,
            starts_at,
            ends_at,
            excluding_id,
        ))
    }
}
