//! Handlers for the `/saved` resource.
//!
//! Listing is always scoped to the caller and creation always stamps the
//! caller as owner, so only deletion needs the ownership gate.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cityspire_core::error::CoreError;
use cityspire_db::models::saved_city::{CreateSavedCity, SavedCity, SavedCitySummary};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::OwnedSavedCity;
use crate::state::AppState;

/// Request body for `POST /saved`.
///
/// Any other fields (including `user_id`) are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSavedCityRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[serde(alias = "city_id")]
    #[validate(length(min = 1, max = 255, message = "city_state must be 1-255 characters"))]
    pub city_state: String,
}

impl CreateSavedCityRequest {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            city_state: self.city_state.trim().to_string(),
        }
    }
}

/// Response body for `POST /saved`.
#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub added: SavedCity,
}

/// Response body for `DELETE /saved/{id}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /saved
///
/// List the caller's saved cities as `{id, name, city_id}`.
pub async fn list_saved(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SavedCitySummary>>> {
    let cities = state.store.list_by_owner(&auth.user_id).await?;
    Ok(Json(cities))
}

/// POST /saved
///
/// Save a city for the caller. Returns 201 with `{ "added": record }`.
pub async fn create_saved(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateSavedCityRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let input = input.trimmed();
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let create = CreateSavedCity {
        name: input.name,
        city_id: input.city_state,
    };
    let added = state.store.create(&auth.owner(), &create).await?;

    tracing::info!(
        user_id = %auth.user_id,
        saved_city_id = added.id,
        "Saved city created",
    );

    Ok((StatusCode::CREATED, Json(AddedResponse { added })))
}

/// DELETE /saved/{id}
///
/// Remove a saved city the caller owns. Ownership is checked by the
/// [`OwnedSavedCity`] extractor before this body runs.
pub async fn delete_saved(
    owned: OwnedSavedCity,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.store.remove(owned.city.id).await?;

    tracing::info!(
        user_id = %owned.user.user_id,
        saved_city_id = owned.city.id,
        "Saved city deleted",
    );

    Ok(Json(MessageResponse { message: "deleted" }))
}
