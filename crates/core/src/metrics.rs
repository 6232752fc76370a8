//! Recommendation metrics parsed from request path segments.
//!
//! The scoring service takes the four metrics as query parameters. They are
//! parsed and range-checked here so malformed input is rejected before any
//! outbound call is made.

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// Upper bound of the walk score scale.
pub const MAX_WALK_SCORE: f64 = 100.0;

/// Validated input for the scoring service's `/recommend` operation.
///
/// Field names match the upstream query parameter names. Values serialize
/// in their shortest decimal form, so `"5760"` is forwarded as `5760`
/// rather than `5760.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendQuery {
    #[serde(serialize_with = "as_decimal")]
    pub population: f64,
    #[serde(serialize_with = "as_decimal")]
    pub crime_rate: f64,
    #[serde(serialize_with = "as_decimal")]
    pub rental_rate: f64,
    #[serde(serialize_with = "as_decimal")]
    pub walk_score: f64,
}

impl RecommendQuery {
    /// Parse the four raw path segments.
    pub fn parse(
        population: &str,
        crime_rate: &str,
        rental_rate: &str,
        walk_score: &str,
    ) -> Result<Self, CoreError> {
        let query = Self {
            population: parse_metric("population", population)?,
            crime_rate: parse_metric("crime_rate", crime_rate)?,
            rental_rate: parse_metric("rental_rate", rental_rate)?,
            walk_score: parse_metric("walk_score", walk_score)?,
        };

        if query.walk_score > MAX_WALK_SCORE {
            return Err(CoreError::Validation(format!(
                "walk_score must not exceed {MAX_WALK_SCORE} (got {})",
                query.walk_score
            )));
        }

        Ok(query)
    }
}

/// Parse a single metric as a finite, non-negative number.
fn parse_metric(name: &str, raw: &str) -> Result<f64, CoreError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        CoreError::Validation(format!("{name} must be a number (got '{raw}')"))
    })?;

    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number (got '{raw}')"
        )));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must not be negative (got {value})"
        )));
    }

    Ok(value)
}

fn as_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
