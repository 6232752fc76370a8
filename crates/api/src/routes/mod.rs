pub mod data;
pub mod health;
pub mod saved;

use axum::Router;

use crate::state::AppState;

/// Build the authenticated route tree.
///
/// Route hierarchy:
///
/// ```text
/// /data/predict/{city_state}                                      predict by name
/// /data/id_num/{id}                                               predict by id
/// /data/recommend/{population}/{crime_rate}/{rental_rate}/{walk_score}
/// /data/state_id/{id}                                             reverse lookup
/// /data/viz/{state}                                               visualization
///
/// /saved                                                          list, create
/// /saved/{id}                                                     delete (owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(data::router()).merge(saved::router())
}
