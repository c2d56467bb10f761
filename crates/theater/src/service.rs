//! Theater application service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared_kernel::{DynEvent, EventBus};

use crate::error::ShowError;
use crate::repository::ShowRepository;
use crate::show::{Seat, Show, Ticket};

/// Orchestrates show scheduling and seat sales.
pub struct TheaterService {
    repository: Arc<dyn ShowRepository>,
    bus: Arc<dyn EventBus>,
}

impl TheaterService {
    pub fn new(repository: Arc<dyn ShowRepository>, bus: Arc<dyn EventBus>) -> Self {
        Self { repository, bus }
    }

    /// Schedules a show with its seat configuration. Scheduling records no
    /// events, so nothing is published.
    #[tracing::instrument(skip(self, seats))]
    pub async fn schedule_show(
        &self,
        show_id: &str,
        title: &str,
        starts_at: DateTime<Utc>,
        seats: Vec<Seat>,
    ) -> Result<Show, ShowError> {
        let show = Show::new(show_id, title, starts_at, seats)?;
        self.repository.save(&show).await?;

        tracing::info!(show_id, remaining = show.remaining_seats(), "show scheduled");
        Ok(show)
    }

    /// Sells a seat and publishes the resulting events (one for a standard
    /// seat, two for VIP). Returns the minted ticket.
    #[tracing::instrument(skip(self))]
    pub async fn purchase_seat(
        &self,
        show_id: &str,
        customer_id: &str,
        seat_number: &str,
        purchased_at: DateTime<Utc>,
    ) -> Result<Ticket, ShowError> {
        let mut show = self.repository.get_by_id(show_id).await?;
        let ticket = show.purchase_seat(customer_id, seat_number, purchased_at)?;
        self.repository.save(&show).await?;

        let events = show.pull_events();
        self.publish(events).await?;

        Ok(ticket)
    }

    /// Loads a show by id.
    pub async fn get_show(&self, show_id: &str) -> Result<Show, ShowError> {
        self.repository.get_by_id(show_id).await
    }

    async fn publish(&self, events: Vec<DynEvent>) -> Result<(), ShowError> {
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
    use crate::repository::InMemoryShowRepository;
    use crate::show::SeatTier;

    fn curtain() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 19, 30, 0).unwrap()
    }

    fn service() -> TheaterService {
        TheaterService::new(
            Arc::new(InMemoryShowRepository::new()),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    fn seats() -> Vec<Seat> {
        vec![
            Seat::new("A1", SeatTier::Standard, 2500),
            Seat::new("V1", SeatTier::Vip, 9000),
        ]
    }

    #[tokio::test]
    async fn schedule_then_purchase() {
        let service = service();
        service
            .schedule_show("show-1", "Opening Night", curtain(), seats())
            .await
            .unwrap();

        let ticket = service
            .purchase_seat("show-1", "member-1", "A1", curtain())
            .await
            .unwrap();
        assert_eq!(ticket.id, "show-1-001");

        let show = service.get_show("show-1").await.unwrap();
        assert_eq!(show.remaining_seats(), 1);
    }

    #[tokio::test]
    async fn invalid_configuration_is_not_persisted() {
        let service = service();
        let err = service
            .schedule_show("show-1", "", curtain(), seats())
            .await
            .unwrap_err();
        assert!(matches!(err, ShowError::TitleRequired));

        assert!(matches!(
            service.get_show("show-1").await,
            Err(ShowError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn purchasing_from_an_unknown_show_is_not_found() {
        let service = service();
        assert!(matches!(
            service
                .purchase_seat("show-404", "member-1", "A1", curtain())
                .await,
            Err(ShowError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn the_second_purchase_of_a_seat_fails() {
        let service = service();
        service
            .schedule_show("show-1", "Opening Night", curtain(), seats())
            .await
            .unwrap();

        service
            .purchase_seat("show-1", "member-1", "A1", curtain())
            .await
            .unwrap();
        let err = service
            .purchase_seat("show-1", "member-2", "A1", curtain())
            .await
            .unwrap_err();
        assert!(matches!(err, ShowError::SeatNotFound { .. }));
    }
}
