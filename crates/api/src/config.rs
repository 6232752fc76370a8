use std::path::PathBuf;
use std::time::Duration;

use cityspire_ds::DsConfig;

use crate::auth::jwt::JwtConfig;

/// Default location of the city lookup table.
const DEFAULT_CITY_LOOKUP_PATH: &str = "data/city_lookup.json";

/// Server configuration loaded from environment variables.
///
/// All optional fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). Must exceed the
    /// scoring service timeout so upstream stalls surface as upstream
    /// errors.
    pub request_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Scoring service connection settings.
    pub ds: DsConfig,
    /// JSON file holding the city id to `"City, State"` table.
    pub city_lookup_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CITY_LOOKUP_PATH`     | `data/city_lookup.json`    |
    ///
    /// See [`JwtConfig::from_env`] and [`DsConfig::from_env`] for the
    /// required auth and scoring service variables.
    ///
    /// # Panics
    ///
    /// Panics if a value does not parse, or if the scoring service timeout
    /// is not lower than the request timeout.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let city_lookup_path = std::env::var("CITY_LOOKUP_PATH")
            .unwrap_or_else(|_| DEFAULT_CITY_LOOKUP_PATH.into())
            .into();

        let ds = DsConfig::from_env();
        assert!(
            ds.timeout < Duration::from_secs(request_timeout_secs),
            "DS_TIMEOUT_SECS must be lower than REQUEST_TIMEOUT_SECS"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            ds,
            city_lookup_path,
        }
    }
}
