//! Repository for the `saved_cities` table.
//!
//! Every method is a single SQL statement; there are no multi-statement
//! transactions.

use cityspire_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::OwnerRef;
use crate::models::saved_city::{CreateSavedCity, SavedCity, SavedCitySummary};

/// Column list for full `saved_cities` rows.
const COLUMNS: &str = "id, name, city_id, user_id";

/// Provides data access for saved cities.
pub struct SavedCityRepo;

impl SavedCityRepo {
    /// Insert a saved city owned by `owner`.
    ///
    /// The owner's `profiles` row is upserted in the same statement so the
    /// foreign key on `user_id` always holds.
    pub async fn create(
        pool: &PgPool,
        owner: &OwnerRef,
        input: &CreateSavedCity,
    ) -> Result<SavedCity, sqlx::Error> {
        let query = format!(
            "WITH owner AS ( \
                 INSERT INTO profiles (id, email, name) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (id) DO UPDATE SET \
                     email = COALESCE(EXCLUDED.email, profiles.email), \
                     name = COALESCE(EXCLUDED.name, profiles.name), \
                     updated_at = NOW() \
                 RETURNING id \
             ) \
             INSERT INTO saved_cities (name, city_id, user_id) \
             SELECT $4, $5, owner.id FROM owner \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedCity>(&query)
            .bind(&owner.id)
            .bind(&owner.email)
            .bind(&owner.name)
            .bind(&input.name)
            .bind(&input.city_id)
            .fetch_one(pool)
            .await
    }

    /// List the saved cities owned by `user_id`, oldest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<SavedCitySummary>, sqlx::Error> {
        sqlx::query_as::<_, SavedCitySummary>(
            "SELECT id, name, city_id FROM saved_cities WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Find a saved city by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SavedCity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM saved_cities WHERE id = $1");
        sqlx::query_as::<_, SavedCity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a saved city by id. Returns `true` if a row was removed.
    ///
    /// Deleting an id that no longer exists is not an error.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_cities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
