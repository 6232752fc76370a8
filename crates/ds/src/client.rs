//! REST client for the scoring service endpoints.
//!
//! Wraps the four GET operations (`/predict`, `/recommend`, `/state_id`,
//! `/viz/{state}`) using [`reqwest`]. A [`DsClient`] is built once at
//! startup and shared by reference; it holds no per-request state.

use std::time::Duration;

use cityspire_core::metrics::RecommendQuery;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;

use crate::models::Prediction;

/// Default bound on a single scoring service call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Connection settings for the scoring service.
#[derive(Debug, Clone)]
pub struct DsConfig {
    /// Base URL, e.g. `https://ds.example.com`.
    pub base_url: String,
    /// Optional bearer token sent on every request.
    pub api_token: Option<String>,
    /// Total time allowed per call, connect through body.
    pub timeout: Duration,
}

impl DsConfig {
    /// Load scoring service settings from environment variables.
    ///
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `DS_API_URL`      | **yes**  | --      |
    /// | `DS_API_TOKEN`    | no       | --      |
    /// | `DS_TIMEOUT_SECS` | no       | `20`    |
    ///
    /// # Panics
    ///
    /// Panics if `DS_API_URL` is not set or `DS_TIMEOUT_SECS` is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let base_url = std::env::var("DS_API_URL").expect("DS_API_URL must be set in the environment");
        let api_token = std::env::var("DS_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let timeout_secs: u64 = std::env::var("DS_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DS_TIMEOUT_SECS must be a valid u64");
        assert!(timeout_secs > 0, "DS_TIMEOUT_SECS must be positive");

        Self {
            base_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Errors from the scoring service client.
#[derive(Debug, thiserror::Error)]
pub enum DsError {
    /// The configured base URL cannot be used to build request URLs.
    #[error("Invalid scoring service URL: {0}")]
    InvalidBaseUrl(String),

    /// The configured token is not a valid header value.
    #[error("Scoring service token contains invalid header characters")]
    InvalidToken,

    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// No complete response arrived within [`DsConfig::timeout`].
    #[error("Scoring service did not respond within {0:?}")]
    Timeout(Duration),

    /// A 2xx response whose body is not the expected JSON shape.
    #[error("Scoring service returned an undecodable body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The scoring service returned a non-2xx status code.
    #[error("Scoring service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the scoring service.
#[derive(Debug, Clone)]
pub struct DsClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    timeout: Duration,
}

impl DsClient {
    /// Build a client from configuration.
    pub fn new(config: &DsConfig) -> Result<Self, DsError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| DsError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Self::with_client(client, &config.base_url, config.timeout)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    ///
    /// `timeout` is only used for error reporting; the bound itself must
    /// already be configured on `client`.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, DsError> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| DsError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DsError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Predict metrics for a `"City, State"` string, decoding `id_num`.
    ///
    /// `GET /predict?city_state=...`
    pub async fn predict(&self, city_state: &str) -> Result<Prediction, DsError> {
        let url = self.endpoint(&["predict"])?;
        self.get_json(url, &[("city_state", city_state)]).await
    }

    /// Same call as [`predict`](Self::predict), with the body left undecoded.
    pub async fn predict_raw(&self, city_state: &str) -> Result<serde_json::Value, DsError> {
        let url = self.endpoint(&["predict"])?;
        self.get_json(url, &[("city_state", city_state)]).await
    }

    /// Recommend cities close to the given metrics. The body is returned
    /// undecoded.
    ///
    /// `GET /recommend?population=...&crime_rate=...&rental_rate=...&walk_score=...`
    pub async fn recommend(&self, query: &RecommendQuery) -> Result<serde_json::Value, DsError> {
        let url = self.endpoint(&["recommend"])?;
        self.get_json(url, query).await
    }

    /// Reverse lookup of a city key.
    ///
    /// `GET /state_id?city_state=...`. The body is returned undecoded.
    pub async fn state_id(&self, city_state: &str) -> Result<serde_json::Value, DsError> {
        let url = self.endpoint(&["state_id"])?;
        self.get_json(url, &[("city_state", city_state)]).await
    }

    /// Visualization payload for a state, passed through as-is.
    ///
    /// `GET /viz/{state}`
    pub async fn viz(&self, state: &str) -> Result<serde_json::Value, DsError> {
        let url = self.endpoint(&["viz", state])?;
        self.get_json(url, &[] as &[(&str, &str)]).await
    }

    // ---- private helpers ----

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, DsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DsError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a GET and decode a successful JSON body.
    async fn get_json<Q, T>(&self, url: reqwest::Url, query: &Q) -> Result<T, DsError>
    where
        Q: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(url = %url, "Calling scoring service");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body).map_err(DsError::Decode)
    }

    fn transport_error(&self, err: reqwest::Error) -> DsError {
        if err.is_timeout() {
            DsError::Timeout(self.timeout)
        } else {
            DsError::Request(err)
        }
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`DsError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
