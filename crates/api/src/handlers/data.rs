//! Handlers for the `/data` resource.
//!
//! Each endpoint forwards to the scoring service exactly once and relays
//! the decoded body. None of them touch the saved-city store.

use axum::extract::{Path, State};
use axum::Json;
use cityspire_core::metrics::RecommendQuery;
use cityspire_ds::Prediction;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::path::parse_id;
use crate::state::AppState;

/// GET /data/predict/{city_state}
///
/// Predict by `"City, State"`. The returned `id_num` is resolved through
/// the lookup table and `city`/`state` are added to the body.
pub async fn predict_by_name(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(city_state): Path<String>,
) -> AppResult<Json<Prediction>> {
    let prediction = state.ds.predict(&city_state).await?;
    let (city, st) = state.cities.lookup_parts(prediction.id_num)?;

    Ok(Json(prediction.with_city_state(city, st)))
}

/// GET /data/id_num/{id}
///
/// Predict by city id. The id is translated to `"City, State"` for the
/// upstream call; the body is relayed as received, without a city/state
/// splice since the caller already knows which city it asked about.
pub async fn predict_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_id("id_num", &raw_id)?;
    let city_state = state.cities.lookup(id)?;

    Ok(Json(state.ds.predict_raw(city_state).await?))
}

/// GET /data/recommend/{population}/{crime_rate}/{rental_rate}/{walk_score}
///
/// Metrics are validated before the upstream call is made; the list is
/// relayed as received.
pub async fn recommend(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((population, crime_rate, rental_rate, walk_score)): Path<(String, String, String, String)>,
) -> AppResult<Json<serde_json::Value>> {
    let query = RecommendQuery::parse(&population, &crime_rate, &rental_rate, &walk_score)?;

    let rows = state.ds.recommend(&query).await?;
    tracing::debug!(
        count = rows.as_array().map(Vec::len),
        "Recommendations received"
    );

    Ok(Json(rows))
}

/// GET /data/state_id/{id}
pub async fn state_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    Ok(Json(state.ds.state_id(&id).await?))
}

/// GET /data/viz/{state}
pub async fn viz(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(us_state): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    Ok(Json(state.ds.viz(&us_state).await?))
}
