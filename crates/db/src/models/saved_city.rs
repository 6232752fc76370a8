//! Saved city models and DTOs.

use cityspire_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `saved_cities` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SavedCity {
    pub id: DbId,
    pub name: String,
    pub city_id: String,
    pub user_id: String,
}

/// Owner-scoped listing projection; omits `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SavedCitySummary {
    pub id: DbId,
    pub name: String,
    pub city_id: String,
}

impl From<SavedCity> for SavedCitySummary {
    fn from(city: SavedCity) -> Self {
        Self {
            id: city.id,
            name: city.name,
            city_id: city.city_id,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Insert payload. The owner is supplied separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSavedCity {
    pub name: String,
    pub city_id: String,
}
