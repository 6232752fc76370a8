//! Route definitions for the saved cities resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::saved;
use crate::state::AppState;

/// Saved city routes.
///
/// ```text
/// GET    /saved       -> list_saved
/// POST   /saved       -> create_saved
/// DELETE /saved/{id}  -> delete_saved
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/saved", get(saved::list_saved).post(saved::create_saved))
        .route("/saved/{id}", delete(saved::delete_saved))
}
