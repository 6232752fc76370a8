use std::sync::Arc;

use cityspire_core::city_lookup::CityLookup;
use cityspire_db::store::SavedCityStore;
use cityspire_ds::DsClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc` and read-only after
/// startup apart from the store, which delegates concurrency to its backend.
#[derive(Clone)]
pub struct AppState {
    /// Saved-city persistence.
    pub store: Arc<dyn SavedCityStore>,
    /// Scoring service client, constructed once at startup.
    pub ds: Arc<DsClient>,
    /// City id to `"City, State"` table.
    pub cities: Arc<CityLookup>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
