//! Response payloads returned by the scoring service.

use cityspire_core::types::DbId;
use serde::{Deserialize, Deserializer, Serialize};

/// A prediction returned by `/predict`, decoded when the caller needs the
/// city id.
///
/// Only `id_num` is interpreted; every other field the service returns
/// (`population`, `crime_rate`, `rental_rate`, `walk_score`, ...) is kept
/// in `fields` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(deserialize_with = "integral_id")]
    pub id_num: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Prediction {
    /// Attach a city/state pair resolved from the lookup table.
    pub fn with_city_state(mut self, city: &str, state: &str) -> Self {
        self.city = Some(city.to_string());
        self.state = Some(state.to_string());
        self
    }
}

/// Accept any integral JSON number for an id, including `5760.0` as
/// written by float-typed dataframes.
fn integral_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DbId, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(id) = number.as_i64() {
        return Ok(id);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= DbId::MIN as f64 && f < DbId::MAX as f64 => {
            Ok(f as DbId)
        }
        _ => Err(serde::de::Error::custom(format!(
            "id_num must be an integer, got {number}"
        ))),
    }
}
