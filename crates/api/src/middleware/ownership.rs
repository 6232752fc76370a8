//! Ownership gate for routes addressing a saved city by `{id}`.
//!
//! The record is loaded and compared against the caller before the handler
//! body runs, so a handler that takes [`OwnedSavedCity`] can only ever see
//! a record the caller owns.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use cityspire_core::error::CoreError;
use cityspire_core::ownership::{authorize, Access, ENTITY_SAVED_CITY};
use cityspire_db::models::saved_city::SavedCity;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::path::parse_id;
use crate::state::AppState;

/// An authenticated caller together with a saved city they own.
///
/// ```ignore
/// async fn remove(owned: OwnedSavedCity) -> AppResult<Json<()>> {
///     // owned.city.user_id == owned.user.user_id here
///     Ok(Json(()))
/// }
/// ```
pub struct OwnedSavedCity {
    pub user: AuthUser,
    pub city: SavedCity,
}

impl FromRequestParts<AppState> for OwnedSavedCity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let id = parse_id("id", &raw_id)?;

        let record = state.store.find_by_id(id).await?;
        let access = authorize(&user.user_id, record.as_ref().map(|c| c.user_id.as_str()));

        if access != Access::Allow {
            tracing::warn!(
                user_id = %user.user_id,
                saved_city_id = id,
                ?access,
                "Ownership check denied",
            );
        }
        access.into_result(id)?;

        let city = record.ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_SAVED_CITY,
            id,
        }))?;

        Ok(OwnedSavedCity { user, city })
    }
}
