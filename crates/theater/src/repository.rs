//! Show repository trait and in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ShowError;
use crate::show::Show;

/// Identity-indexed storage for shows.
///
/// Saves are versioned: the whole load-mutate-save cycle for a show is
/// serialized by compare-and-swap on the aggregate version, so concurrent
/// purchases cannot mint the same ticket sequence number.
#[async_trait]
pub trait ShowRepository: Send + Sync {
    /// Persists the show.
    ///
    /// Fails with `AlreadyScheduled` when a never-persisted show collides
    /// with a stored id, and with `Conflict` when the stored version no
    /// longer matches the one this copy was loaded at.
    async fn save(&self, show: &Show) -> Result<(), ShowError>;

    /// Loads a show by id.
    async fn get_by_id(&self, id: &str) -> Result<Show, ShowError>;
}

/// In-memory show store for tests and the demo wiring.
#[derive(Default)]
pub struct InMemoryShowRepository {
    shows: RwLock<HashMap<String, Show>>,
}

impl InMemoryShowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShowRepository for InMemoryShowRepository {
    #[tracing::instrument(skip_all, fields(show.id = show.id()))]
    async fn save(&self, show: &Show) -> Result<(), ShowError> {
        let mut shows = self.shows.write().await;

        if let Some(existing) = shows.get(show.id()) {
            if show.version() == 0 {
                return Err(ShowError::AlreadyScheduled {
                    id: show.id().to_owned(),
                });
            }
            if existing.version() != show.version() {
                return Err(ShowError::Conflict {
                    id: show.id().to_owned(),
                });
            }
        }

        let mut stored = show.clone();
        stored.set_version(show.version() + 1);
        shows.insert(stored.id().to_owned(), stored);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Show, ShowError> {
        let shows = self.shows.read().await;
        shows
            .get(id)
            .cloned()
            .ok_or_else(|| ShowError::NotFound { id: id.to_owned() })
    }
}
