//! Route definitions for the scoring service proxy endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::data;
use crate::state::AppState;

/// Scoring service routes under `/data`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data/predict/{city_state}", get(data::predict_by_name))
        .route("/data/id_num/{id}", get(data::predict_by_id))
        .route(
            "/data/recommend/{population}/{crime_rate}/{rental_rate}/{walk_score}",
            get(data::recommend),
        )
        .route("/data/state_id/{id}", get(data::state_id))
        .route("/data/viz/{state}", get(data::viz))
}
