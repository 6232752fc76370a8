//! Store abstraction used by the HTTP layer.
//!
//! Handlers talk to a [`SavedCityStore`] trait object so the PostgreSQL
//! backend can be swapped for an in-process double in tests.

use async_trait::async_trait;
use cityspire_core::types::DbId;

use crate::models::profile::OwnerRef;
use crate::models::saved_city::{CreateSavedCity, SavedCity, SavedCitySummary};
use crate::repositories::SavedCityRepo;
use crate::DbPool;

/// Persistence operations for saved cities.
#[async_trait]
pub trait SavedCityStore: Send + Sync {
    /// Insert a new saved city owned by `owner`.
    async fn create(
        &self,
        owner: &OwnerRef,
        input: &CreateSavedCity,
    ) -> Result<SavedCity, sqlx::Error>;

    /// List the saved cities owned by `owner_id`.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<SavedCitySummary>, sqlx::Error>;

    /// Load a single saved city, or `None` if it does not exist.
    async fn find_by_id(&self, id: DbId) -> Result<Option<SavedCity>, sqlx::Error>;

    /// Delete by id. Idempotent: returns `false` when nothing was deleted.
    async fn remove(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// [`SavedCityStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgSavedCityStore {
    pool: DbPool,
}

impl PgSavedCityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavedCityStore for PgSavedCityStore {
    async fn create(
        &self,
        owner: &OwnerRef,
        input: &CreateSavedCity,
    ) -> Result<SavedCity, sqlx::Error> {
        SavedCityRepo::create(&self.pool, owner, input).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<SavedCitySummary>, sqlx::Error> {
        SavedCityRepo::list_by_owner(&self.pool, owner_id).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<SavedCity>, sqlx::Error> {
        SavedCityRepo::find_by_id(&self.pool, id).await
    }

    async fn remove(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let removed = SavedCityRepo::delete(&self.pool, id).await?;
        if !removed {
            tracing::debug!(saved_city_id = id, "Delete matched no rows");
        }
        Ok(removed)
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
